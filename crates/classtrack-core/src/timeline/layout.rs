//! Lane assignment for overlapping events.
//!
//! Events are swept in time order. Each start claims the lowest free lane,
//! each end releases it, and whenever the active set drains to zero the
//! current overlap component is closed. Every event of a component gets the
//! component's peak concurrency as its lane count, so quiet parts of the day
//! do not inherit the column split of a busy period.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::NaiveTime;
use serde::Serialize;

use super::event::Event;

/// An event together with its display lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaidOutEvent {
    pub event: Event,
    /// Zero-based lane index within the component.
    pub lane: usize,
    /// Number of lanes the event's overlap component needs.
    pub lane_count: usize,
    /// Index of the overlap component, in time order.
    pub component: usize,
}

/// Ends sort before starts at the same instant, so a lane freed at `t` can
/// be reused by an event starting at `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Edge {
    End,
    Start,
}

/// Lane assignment for one timetable snapshot.
///
/// Entries keep the order of the input events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
    entries: Vec<LaidOutEvent>,
    component_count: usize,
    max_lane_count: usize,
}

impl Layout {
    /// Lay out a day's events.
    ///
    /// Simultaneous starts are ordered by input position, so the same input
    /// always produces the same lanes.
    pub fn compute(events: Vec<Event>) -> Self {
        // (instant, edge, event start, input index): the tuple order is the
        // sweep order.
        let mut boundaries: Vec<(NaiveTime, Edge, NaiveTime, usize)> =
            Vec::with_capacity(events.len() * 2);
        for (index, event) in events.iter().enumerate() {
            boundaries.push((event.start(), Edge::Start, event.start(), index));
            boundaries.push((event.end(), Edge::End, event.start(), index));
        }
        boundaries.sort_unstable();

        let mut lanes = vec![0usize; events.len()];
        let mut components = vec![0usize; events.len()];
        let mut peaks: Vec<usize> = Vec::new();
        let mut free: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
        let mut next_lane = 0usize;
        let mut active = 0usize;

        for (_, edge, _, index) in boundaries {
            match edge {
                Edge::Start => {
                    if active == 0 {
                        peaks.push(0);
                        free.clear();
                        next_lane = 0;
                    }
                    let lane = match free.pop() {
                        Some(Reverse(lane)) => lane,
                        None => {
                            next_lane += 1;
                            next_lane - 1
                        }
                    };
                    lanes[index] = lane;
                    components[index] = peaks.len() - 1;
                    active += 1;
                    if let Some(peak) = peaks.last_mut() {
                        *peak = (*peak).max(active);
                    }
                }
                Edge::End => {
                    free.push(Reverse(lanes[index]));
                    active -= 1;
                }
            }
        }

        let entries: Vec<LaidOutEvent> = events
            .into_iter()
            .enumerate()
            .map(|(index, event)| LaidOutEvent {
                event,
                lane: lanes[index],
                lane_count: peaks[components[index]],
                component: components[index],
            })
            .collect();

        let max_lane_count = peaks.iter().copied().max().unwrap_or(0);
        tracing::debug!(
            events = entries.len(),
            components = peaks.len(),
            max_lane_count,
            "computed timetable layout"
        );

        Self {
            entries,
            component_count: peaks.len(),
            max_lane_count,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaidOutEvent> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[LaidOutEvent] {
        &self.entries
    }

    /// Number of independent overlap components.
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Widest lane count over the whole day.
    pub fn max_lane_count(&self) -> usize {
        self.max_lane_count
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a LaidOutEvent;
    type IntoIter = std::slice::Iter<'a, LaidOutEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
