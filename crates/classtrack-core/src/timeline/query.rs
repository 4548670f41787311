//! "Now" and "next" lookup over a day's events.

use chrono::NaiveTime;
use serde::Serialize;

use super::event::Event;
use super::layout::{LaidOutEvent, Layout};

/// Anything that wraps a timetable [`Event`].
pub trait Scheduled {
    fn event(&self) -> &Event;
}

impl Scheduled for Event {
    fn event(&self) -> &Event {
        self
    }
}

impl Scheduled for LaidOutEvent {
    fn event(&self) -> &Event {
        &self.event
    }
}

/// Result of a lookup at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup<'a, T = Event> {
    /// Most recently started running event covering the instant.
    pub current: Option<&'a T>,
    /// Earliest event starting strictly after the instant.
    pub next: Option<&'a T>,
}

/// Find the current and next event at `at`.
///
/// Cancelled events are never current but may still be next. Ties on start
/// time go to the earlier position in `items`.
pub fn lookup<T: Scheduled>(items: &[T], at: NaiveTime) -> Lookup<'_, T> {
    let mut current: Option<&T> = None;
    let mut next: Option<&T> = None;

    for item in items {
        let event = item.event();
        if event.is_running() && event.contains(at) {
            // Strictly greater keeps the first of equal starts.
            if current.map_or(true, |c| event.start() > c.event().start()) {
                current = Some(item);
            }
        } else if event.start() > at && next.map_or(true, |n| event.start() < n.event().start()) {
            next = Some(item);
        }
    }

    Lookup { current, next }
}

impl Layout {
    /// [`lookup`] over the laid-out events.
    pub fn lookup(&self, at: NaiveTime) -> Lookup<'_, LaidOutEvent> {
        lookup(self.entries(), at)
    }
}
