//! # classtrack Core Library
//!
//! This library provides the logic behind the classtrack timetable widget:
//! laying a school day's classes out on a timeline and telling which class
//! is on now and which is next. Retrieval from the school portal, drawing
//! and window management live outside this crate.
//!
//! ## Architecture
//!
//! - **Timeline**: validated [`Event`] intervals, sweep-line lane
//!   [`Layout`], canvas geometry and current/next [`lookup`]
//! - **Descriptors**: raw portal records normalized into events, with
//!   teacher and room names resolved from a [`Directory`]
//! - **Timetable**: one refresh cycle, dropping bad records individually
//! - **Storage**: TOML-based configuration
//!
//! Everything here is a pure function of its inputs; nothing is carried
//! from one refresh to the next.

pub mod descriptor;
pub mod directory;
pub mod error;
pub mod storage;
pub mod timeline;
pub mod timetable;

pub use descriptor::EventDescriptor;
pub use directory::{Directory, Room, StaffMember};
pub use error::{ConfigError, CoreError, ValidationError};
pub use storage::Config;
pub use timeline::{
    event_rect, lookup, DisplayWindow, Event, EventRect, EventStatus, LaidOutEvent, LaneWidth,
    Layout, Lookup, Padding, Rect,
};
pub use timetable::{Rejected, Timetable};
