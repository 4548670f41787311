//! One timetable refresh: descriptors in, validated and laid-out events out.
//!
//! A snapshot never carries anything over from the previous refresh. Bad
//! records are dropped individually and reported alongside the result.

use chrono::NaiveTime;
use serde::Serialize;

use crate::descriptor::EventDescriptor;
use crate::directory::Directory;
use crate::error::{Result, ValidationError};
use crate::timeline::{lookup, Event, Layout, Lookup};

/// A descriptor that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    /// Position in the descriptor batch.
    pub index: usize,
    pub title_line: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

fn serialize_display<S: serde::Serializer>(
    error: &ValidationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Validated events for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timetable {
    /// Timed events, in descriptor order.
    pub events: Vec<Event>,
    /// Labels of all-day entries, which are not placed on the timeline.
    pub all_day: Vec<String>,
    pub rejected: Vec<Rejected>,
}

impl Timetable {
    /// Build a timetable from one retrieval's descriptors.
    ///
    /// Never fails as a whole: each invalid descriptor is logged and listed
    /// in [`Timetable::rejected`].
    pub fn build(descriptors: &[EventDescriptor], directory: &Directory) -> Self {
        let mut timetable = Self::default();

        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.all_day {
                timetable.all_day.push(descriptor.label().to_string());
                continue;
            }
            match descriptor.to_event(directory) {
                Ok(event) => timetable.events.push(event),
                Err(error) => {
                    tracing::warn!(
                        index,
                        title = %descriptor.title_line,
                        %error,
                        "dropping invalid timetable entry"
                    );
                    timetable.rejected.push(Rejected {
                        index,
                        title_line: descriptor.title_line.clone(),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            events = timetable.events.len(),
            all_day = timetable.all_day.len(),
            rejected = timetable.rejected.len(),
            "built timetable snapshot"
        );
        timetable
    }

    /// Build from a JSON array of descriptors.
    ///
    /// # Errors
    /// Returns an error only if the JSON itself is malformed; invalid
    /// entries are rejected individually as in [`Timetable::build`].
    pub fn from_json(json: &str, directory: &Directory) -> Result<Self> {
        let descriptors: Vec<EventDescriptor> = serde_json::from_str(json)?;
        Ok(Self::build(&descriptors, directory))
    }

    /// Lane layout of the timed events.
    pub fn layout(&self) -> Layout {
        Layout::compute(self.events.clone())
    }

    /// Current and next event at `at`.
    pub fn lookup(&self, at: NaiveTime) -> Lookup<'_, Event> {
        lookup(&self.events, at)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.all_day.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn invalid_descriptor_is_dropped_and_rest_laid_out() {
        let descriptors = vec![
            EventDescriptor::new("(Maths)", "9:00 AM", "10:30 AM"),
            EventDescriptor::new("(Broken)", "10:00 AM", "10:00 AM"),
            EventDescriptor::new("(English)", "10:00 AM", "11:30 AM"),
        ];
        let timetable = Timetable::build(&descriptors, &Directory::default());

        assert_eq!(timetable.events.len(), 2);
        assert_eq!(timetable.rejected.len(), 1);
        assert_eq!(timetable.rejected[0].index, 1);
        assert_eq!(timetable.rejected[0].title_line, "(Broken)");

        let layout = timetable.layout();
        let lanes: Vec<(&str, usize, usize)> = layout
            .iter()
            .map(|e| (e.event.label(), e.lane, e.lane_count))
            .collect();
        assert_eq!(lanes, vec![("Maths", 0, 2), ("English", 1, 2)]);
    }

    #[test]
    fn all_day_entries_are_set_aside() {
        let mut excursion = EventDescriptor::new("(Excursion)", "12:00 AM", "11:59 PM");
        excursion.all_day = true;
        let descriptors = vec![excursion, EventDescriptor::new("(Maths)", "9:00", "10:00")];

        let timetable = Timetable::build(&descriptors, &Directory::default());
        assert_eq!(timetable.all_day, vec!["Excursion".to_string()]);
        assert_eq!(timetable.events.len(), 1);
        assert!(timetable.rejected.is_empty());
    }

    #[test]
    fn empty_snapshot() {
        let timetable = Timetable::build(&[], &Directory::default());
        assert!(timetable.is_empty());
        assert!(timetable.layout().is_empty());
        let found = timetable.lookup(hm(10, 0));
        assert!(found.current.is_none());
        assert!(found.next.is_none());
    }

    #[test]
    fn from_json_reports_malformed_batches() {
        let timetable = Timetable::from_json(
            r#"[{"title_line":"(Maths)","start":"9:00","finish":"10:00"}]"#,
            &Directory::default(),
        )
        .unwrap();
        assert_eq!(timetable.events.len(), 1);

        let err = Timetable::from_json("{not json", &Directory::default()).unwrap_err();
        assert!(matches!(err, crate::error::CoreError::Json(_)));
    }

    #[test]
    fn rejected_serializes_error_message() {
        let descriptors = vec![EventDescriptor::new("(Broken)", "soon", "later")];
        let timetable = Timetable::build(&descriptors, &Directory::default());
        let json = serde_json::to_value(&timetable).unwrap();
        let message = json["rejected"][0]["error"].as_str().unwrap();
        assert!(message.contains("soon"));
    }
}
