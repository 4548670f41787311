//! Timetable event type and clock-time parsing.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Whether a class is going ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Running,
    Cancelled,
}

/// One scheduled interval on a single day.
///
/// The interval is half-open: an event is active from `start` up to, but
/// not including, `end`. Fields are private so every `Event` in existence
/// satisfies `start < end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    label: String,
    secondary_label: Option<String>,
    start: NaiveTime,
    end: NaiveTime,
    status: EventStatus,
}

impl Event {
    /// Create a running event. Both times are truncated to the minute.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTimeRange`] if `end <= start`.
    pub fn new(
        label: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let label = label.into();
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { label, start, end });
        }
        Ok(Self {
            label,
            secondary_label: None,
            start,
            end,
            status: EventStatus::Running,
        })
    }

    pub fn with_secondary_label(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_label = Some(secondary.into());
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn secondary_label(&self) -> Option<&str> {
        self.secondary_label.as_deref()
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == EventStatus::Running
    }

    /// True if `at` falls inside `[start, end)`.
    pub fn contains(&self, at: NaiveTime) -> bool {
        self.start <= at && at < self.end
    }

    /// Check if this event overlaps with another. Touching intervals do not.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Drop seconds and sub-second precision.
pub(crate) fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

const CLOCK_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// Parse clock text as sent by the timetable portal.
///
/// Accepts `9:00 AM`, `09:00PM`, `13:45` and `13:45:00`, optionally
/// prefixed with a date and `" - "` (`7/02/2025 - 9:00 AM`).
///
/// # Errors
/// Returns [`ValidationError::UnparsableTime`] naming `field` when none of
/// the formats match.
pub fn parse_clock_time(field: &str, text: &str) -> Result<NaiveTime, ValidationError> {
    let raw = text.rsplit(" - ").next().unwrap_or(text).trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .map(truncate_to_minute)
        .ok_or_else(|| ValidationError::UnparsableTime {
            field: field.to_string(),
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn new_rejects_empty_and_inverted_ranges() {
        assert!(matches!(
            Event::new("Maths", hm(9, 0), hm(9, 0)),
            Err(ValidationError::InvalidTimeRange { .. })
        ));
        assert!(Event::new("Maths", hm(10, 0), hm(9, 0)).is_err());
        assert!(Event::new("Maths", hm(9, 0), hm(9, 1)).is_ok());
    }

    #[test]
    fn new_truncates_seconds() {
        let start = NaiveTime::from_hms_opt(9, 0, 59).unwrap();
        let end = NaiveTime::from_hms_opt(9, 0, 30).unwrap();
        // Both collapse to 09:00, which is an empty interval.
        assert!(Event::new("Blip", start, end).is_err());

        let ev = Event::new("Maths", start, hm(10, 0)).unwrap();
        assert_eq!(ev.start(), hm(9, 0));
    }

    #[test]
    fn overlap_is_half_open() {
        let a = Event::new("A", hm(9, 0), hm(10, 0)).unwrap();
        let b = Event::new("B", hm(10, 0), hm(11, 0)).unwrap();
        let c = Event::new("C", hm(9, 59), hm(10, 30)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(a.contains(hm(9, 0)));
        assert!(!a.contains(hm(10, 0)));
    }

    #[test]
    fn builder_sets_optional_fields() {
        let ev = Event::new("Chemistry", hm(12, 0), hm(13, 0))
            .unwrap()
            .with_secondary_label("Lab A")
            .with_status(EventStatus::Cancelled);
        assert_eq!(ev.secondary_label(), Some("Lab A"));
        assert!(!ev.is_running());
    }

    #[test]
    fn parses_portal_clock_formats() {
        assert_eq!(parse_clock_time("start", "9:00 AM").unwrap(), hm(9, 0));
        assert_eq!(parse_clock_time("start", "02:30 PM").unwrap(), hm(14, 30));
        assert_eq!(parse_clock_time("start", "12:05 AM").unwrap(), hm(0, 5));
        assert_eq!(parse_clock_time("start", "13:45").unwrap(), hm(13, 45));
        assert_eq!(parse_clock_time("start", "13:45:10").unwrap(), hm(13, 45));
        assert_eq!(
            parse_clock_time("start", "7/02/2025 - 9:00 AM").unwrap(),
            hm(9, 0)
        );
    }

    #[test]
    fn unparsable_time_names_field() {
        let err = parse_clock_time("finish", "after lunch").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnparsableTime {
                field: "finish".into(),
                value: "after lunch".into(),
            }
        );
    }
}
