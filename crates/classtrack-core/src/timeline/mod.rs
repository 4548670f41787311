//! Day timeline for a timetable.
//!
//! This module provides:
//! - The validated [`Event`] interval type
//! - Sweep-line lane layout for overlapping events
//! - Geometry mapping of lanes onto a canvas
//! - Current/next lookup at a given instant

mod event;
mod geometry;
mod layout;
mod query;

pub use event::{parse_clock_time, Event, EventStatus};
pub use geometry::{event_rect, DisplayWindow, EventRect, LaneWidth, Padding, Rect};
pub use layout::{LaidOutEvent, Layout};
pub use query::{lookup, Lookup, Scheduled};
