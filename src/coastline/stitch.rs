//! Coastline stitching
//!
//! Chains boundary segments that share endpoints into ordered polylines,
//! one group per (kind, feature number).
//!
//! Matching is first-match in discovery order. Segments live in an arena
//! indexed by canonical endpoint key; each bucket keeps insertion order so
//! the first unconsumed entry of a bucket is the first match a linear scan
//! over the remaining segments would find.

use std::collections::HashMap;

use super::types::{BoundaryKind, BoundarySegment, Point, PointKey, Polyline, ITERATION_CAP};

// =============================================================================
// SEGMENT ARENA
// =============================================================================

/// Index-addressable store of one feature's segments with consumed markers
pub struct SegmentArena<'a> {
    segments: Vec<&'a BoundarySegment>,
    consumed: Vec<bool>,
    by_endpoint: HashMap<PointKey, Vec<usize>>,
    /// Every index below this is consumed
    cursor: usize,
    remaining: usize,
}

impl<'a> SegmentArena<'a> {
    pub fn new(segments: Vec<&'a BoundarySegment>) -> Self {
        let mut by_endpoint: HashMap<PointKey, Vec<usize>> = HashMap::new();
        for (idx, seg) in segments.iter().enumerate() {
            let start = seg.start.key();
            let end = seg.end.key();
            by_endpoint.entry(start).or_default().push(idx);
            if end != start {
                by_endpoint.entry(end).or_default().push(idx);
            }
        }

        let remaining = segments.len();
        Self {
            consumed: vec![false; segments.len()],
            segments,
            by_endpoint,
            cursor: 0,
            remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    fn consume(&mut self, idx: usize) -> &'a BoundarySegment {
        debug_assert!(!self.consumed[idx]);
        self.consumed[idx] = true;
        self.remaining -= 1;
        self.segments[idx]
    }

    /// Take the first unconsumed segment in discovery order.
    pub fn take_first(&mut self) -> Option<&'a BoundarySegment> {
        while self.cursor < self.segments.len() && self.consumed[self.cursor] {
            self.cursor += 1;
        }
        if self.cursor < self.segments.len() {
            Some(self.consume(self.cursor))
        } else {
            None
        }
    }

    /// Take the first unconsumed segment touching `key`.
    pub fn take_touching(&mut self, key: PointKey) -> Option<&'a BoundarySegment> {
        let bucket = self.by_endpoint.get_mut(&key)?;

        // Consumed entries at the front never match again
        let skip = bucket.iter().take_while(|&&idx| self.consumed[idx]).count();
        bucket.drain(..skip);

        let idx = *bucket.first()?;
        bucket.remove(0);
        Some(self.consume(idx))
    }
}

// =============================================================================
// STITCHING
// =============================================================================

/// Assemble one feature's segments into polylines.
///
/// Each polyline starts from the first remaining segment and is extended
/// from its end point until it returns to its start, no segment touches the
/// current point, or [`ITERATION_CAP`] steps have been taken.
pub fn stitch_feature(
    kind: BoundaryKind,
    feature_number: usize,
    segments: &[&BoundarySegment],
) -> Vec<Polyline> {
    let mut arena = SegmentArena::new(segments.to_vec());
    let mut polylines = Vec::new();

    while let Some(seed) = arena.take_first() {
        let anchor = seed.start.key();
        let mut current = seed.end.key();
        let mut points: Vec<Point> = vec![seed.start, seed.end];
        let mut closed = current == anchor;

        let mut steps = 0;
        while !closed && steps < ITERATION_CAP {
            let Some(next) = arena.take_touching(current) else {
                break;
            };
            let Some(point) = next.other_end(current) else {
                break;
            };
            points.push(point);
            current = point.key();
            closed = current == anchor;
            steps += 1;
        }

        polylines.push(Polyline { kind, feature_number, points, closed });
    }

    polylines
}

/// Stitch every feature of every kind.
///
/// Land features come first, then lakes. Within a kind, feature numbers are
/// scanned from 0 upward and scanning stops at the first number that has no
/// segments.
pub fn stitch_coastlines(segments: &[BoundarySegment]) -> Vec<Polyline> {
    let mut groups: HashMap<(BoundaryKind, usize), Vec<&BoundarySegment>> = HashMap::new();
    for seg in segments {
        groups.entry((seg.kind, seg.feature_number)).or_default().push(seg);
    }

    let mut polylines = Vec::new();
    for kind in BoundaryKind::ALL {
        let mut number = 0;
        while let Some(group) = groups.get(&(kind, number)) {
            polylines.extend(stitch_feature(kind, number, group));
            number += 1;
        }
    }

    polylines
}
