//! Raw timetable records as handed over by the retrieval client.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::error::ValidationError;
use crate::timeline::{parse_clock_time, Event, EventStatus};

static PARENTHESISED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("Invalid regex"));

/// Last representable minute of the day, used for classes finishing at midnight.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

fn default_true() -> bool {
    true
}

/// One timetable entry before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Free text line, e.g. `"11 MATHS (Maths) - MC1 - JSM"`.
    pub title_line: String,
    /// Abbreviated title shown by the portal.
    #[serde(default)]
    pub short_title: Option<String>,
    /// Start clock text, optionally prefixed with a date.
    pub start: String,
    /// Finish clock text, optionally prefixed with a date.
    pub finish: String,
    /// False when the class has been cancelled.
    #[serde(default = "default_true")]
    pub running: bool,
    #[serde(default)]
    pub all_day: bool,
}

impl EventDescriptor {
    pub fn new(
        title_line: impl Into<String>,
        start: impl Into<String>,
        finish: impl Into<String>,
    ) -> Self {
        Self {
            title_line: title_line.into(),
            short_title: None,
            start: start.into(),
            finish: finish.into(),
            running: true,
            all_day: false,
        }
    }

    /// Primary label: the text inside the first parentheses of the title
    /// line, or the whole line when there are none or they are empty.
    pub fn label(&self) -> &str {
        PARENTHESISED
            .captures(&self.title_line)
            .and_then(|captures| captures.get(1))
            .map(|inner| inner.as_str().trim())
            .filter(|inner| !inner.is_empty())
            .unwrap_or_else(|| self.title_line.trim())
    }

    /// Validate into an [`Event`], filling the secondary label from
    /// `directory`.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if a time cannot be parsed or the
    /// finish is not after the start.
    ///
    /// A finish of `00:00` after a later start means midnight at the end of
    /// the day and is stored as 23:59.
    pub fn to_event(&self, directory: &Directory) -> Result<Event, ValidationError> {
        let start = parse_clock_time("start", &self.start)?;
        let mut end = parse_clock_time("finish", &self.finish)?;
        if end == NaiveTime::MIN && start > end {
            end = end_of_day();
        }
        let mut event = Event::new(self.label(), start, end)?;
        if let Some(secondary) = directory.describe(&self.title_line) {
            event = event.with_secondary_label(secondary);
        }
        if !self.running {
            event = event.with_status(EventStatus::Cancelled);
        }
        Ok(event)
    }
}
