//! Sweep events and the priority queue that drives the sweep
//!
//! Events are ordered by decreasing y of their key point, ties broken by
//! increasing x, so the sweep line moves top to bottom and left to right.
//! Stale circle events are removed lazily: `remove` marks the event id and
//! `pop` silently drops marked entries, so a removed event is never
//! dispatched.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use glam::DVec2;

use super::beach_line::NodeId;
use super::voronoi::CellId;

/// Identity of a pushed circle event, used for lazy removal
pub(crate) type EventId = u64;

/// What a popped event means to the sweep
#[derive(Debug, Clone, Copy)]
pub(crate) enum EventKind {
    /// The sweep line reached a site; `cell` is the cell grown around it
    Site { cell: CellId },
    /// Three arcs' sites became cocircular; `arc` is the middle arc that
    /// disappears when the event fires
    Circle { arc: NodeId, id: EventId },
}

/// An entry in the sweep queue: a key point plus its meaning
///
/// The key point is the site for site events and the bottommost circle
/// point for circle events.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event {
    pub point: DVec2,
    pub kind: EventKind,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    /// Max-heap priority: larger y wins, then smaller x.
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .y
            .total_cmp(&other.point.y)
            .then_with(|| other.point.x.total_cmp(&self.point.x))
    }
}

/// Priority queue over sweep events with lazy circle-event removal
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Event>,
    cancelled: HashSet<EventId>,
    next_id: EventId,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a site event. Site events are never removed.
    pub fn push_site(&mut self, site: DVec2, cell: CellId) {
        self.heap.push(Event {
            point: site,
            kind: EventKind::Site { cell },
        });
    }

    /// Queue a circle event for the given collapsing arc and return the id
    /// under which it can later be removed.
    pub fn push_circle(&mut self, point: DVec2, arc: NodeId) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        self.heap.push(Event {
            point,
            kind: EventKind::Circle { arc, id },
        });
        id
    }

    /// Mark a previously pushed circle event as stale. O(1); the entry is
    /// physically dropped when it surfaces in `pop`.
    pub fn remove(&mut self, id: EventId) {
        self.cancelled.insert(id);
    }

    /// Pop the next live event, skipping cancelled circle events.
    pub fn pop(&mut self) -> Option<Event> {
        while let Some(event) = self.heap.pop() {
            if let EventKind::Circle { id, .. } = event.kind {
                if self.cancelled.remove(&id) {
                    continue;
                }
            }
            return Some(event);
        }
        None
    }
}
