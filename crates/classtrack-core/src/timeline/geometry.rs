//! Mapping laid-out events onto a rectangular canvas.
//!
//! Time runs top to bottom across the display window; lanes split the
//! canvas width into equal columns. Coordinates are abstract units for
//! whatever renderer consumes them.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::layout::{LaidOutEvent, Layout};
use crate::error::ValidationError;

/// The `[start, end)` time range covered by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl DisplayWindow {
    /// # Errors
    /// Returns [`ValidationError::InvalidWindow`] if `end <= start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Offset of `at` along an axis of length `extent`, clamped to the
    /// window.
    pub fn project(&self, at: NaiveTime, extent: f64) -> f64 {
        let at = at.clamp(self.start, self.end);
        let span = seconds(self.end) - seconds(self.start);
        (seconds(at) - seconds(self.start)) * extent / span
    }

    /// True if `[start, end)` shares any time with the window.
    pub fn intersects(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start < self.end && self.start < end
    }
}

impl Default for DisplayWindow {
    /// 08:00 to 20:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

fn seconds(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight())
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Insets applied to each event box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Shrinks the box on the left and right.
    pub horizontal: f64,
    /// Shrinks the box on the top and bottom.
    pub vertical: f64,
    /// Boxes are never shorter than this.
    pub min_height: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            horizontal: 10.0,
            vertical: 5.0,
            min_height: 10.0,
        }
    }
}

/// How wide lanes are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneWidth {
    /// Columns split by each overlap component's own lane count.
    #[default]
    PerComponent,
    /// Every event uses the day's widest lane count, so columns line up
    /// across the whole timeline.
    Uniform,
}

/// Box for one event.
///
/// A `lane_count` of zero is treated as one column.
pub fn event_rect(
    lane: usize,
    lane_count: usize,
    start: NaiveTime,
    end: NaiveTime,
    window: &DisplayWindow,
    canvas: &Rect,
    padding: &Padding,
) -> Rect {
    let top = canvas.y + window.project(start, canvas.height) + padding.vertical;
    let bottom = canvas.y + window.project(end, canvas.height) - padding.vertical;
    let height = (bottom - top).max(padding.min_height.max(f64::EPSILON));

    let column_width = canvas.width / lane_count.max(1) as f64;
    let x = canvas.x + lane as f64 * column_width + padding.horizontal;
    let width = (column_width - 2.0 * padding.horizontal).max(0.0);

    Rect::new(x, top, width, height)
}

/// A laid-out event paired with its box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRect<'a> {
    pub entry: &'a LaidOutEvent,
    pub rect: Rect,
}

impl Layout {
    /// Boxes for every event visible in `window`.
    ///
    /// Events entirely outside the window are skipped.
    pub fn rects(
        &self,
        window: &DisplayWindow,
        canvas: &Rect,
        padding: &Padding,
        width: LaneWidth,
    ) -> Vec<EventRect<'_>> {
        self.iter()
            .filter(|entry| window.intersects(entry.event.start(), entry.event.end()))
            .map(|entry| {
                let columns = match width {
                    LaneWidth::PerComponent => entry.lane_count,
                    LaneWidth::Uniform => self.max_lane_count(),
                };
                EventRect {
                    entry,
                    rect: event_rect(
                        entry.lane,
                        columns,
                        entry.event.start(),
                        entry.event.end(),
                        window,
                        canvas,
                        padding,
                    ),
                }
            })
            .collect()
    }
}
