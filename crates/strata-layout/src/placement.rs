//! Child-to-track placement along one axis.
//!
//! Explicit grid lines always win. Children without them are placed by the
//! tracks their geometry overlaps, then by their center, and finally on the
//! last track, so every child ends up in exactly one bucket.

use strata_core::{Axis, CellAssignment, ChildCapture, TrackList};
use tracing::trace;

/// Left and right edge of a track, relative to the container origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f64,
    pub right: f64,
}

/// Output of [`resolve_placements`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementResult {
    /// One bucket per track, keyed by start index, in capture order
    pub assigned: Vec<Vec<CellAssignment>>,
    pub bounds: Vec<TrackBounds>,
}

impl PlacementResult {
    /// All assignments, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &CellAssignment> {
        self.assigned.iter().flatten()
    }

    /// The assignment made for the child at `child`, if any.
    pub fn for_child(&self, child: usize) -> Option<&CellAssignment> {
        self.iter().find(|a| a.child == child)
    }
}

/// Edges of each track, with `gap` between consecutive tracks.
pub fn track_bounds(tracks: &TrackList, gap: f64) -> Vec<TrackBounds> {
    let mut offset = 0.0;
    tracks
        .iter()
        .enumerate()
        .map(|(i, length)| {
            let left = offset + i as f64 * gap;
            offset += length;
            TrackBounds { left, right: left + length }
        })
        .collect()
}

/// Assign each child a start track, end track and span along `axis`.
///
/// `origin` is the container's coordinate along `axis` in the same space as
/// the child bounds. An empty track list places nothing.
pub fn resolve_placements(
    tracks: &TrackList,
    gap: f64,
    origin: f64,
    axis: Axis,
    children: &[ChildCapture],
) -> PlacementResult {
    let bounds = track_bounds(tracks, gap);
    let mut assigned = vec![Vec::new(); bounds.len()];
    let Some(last) = bounds.len().checked_sub(1) else {
        return PlacementResult { assigned, bounds };
    };

    for (index, child) in children.iter().enumerate() {
        let (start, end) = match explicit_range(child, axis, last) {
            Some(range) => range,
            None => {
                let (position, length) = child.bounds.extent(axis);
                let left = position - origin;
                geometric_range(&bounds, left, left + length).unwrap_or_else(|| {
                    let track = center_track(&bounds, left + length / 2.0).unwrap_or(last);
                    (track, track)
                })
            }
        };

        let assignment = CellAssignment {
            child: index,
            start,
            end,
            span: end - start + 1,
        };
        trace!(?axis, child = index, start, end, "placed child");
        assigned[start].push(assignment);
    }

    PlacementResult { assigned, bounds }
}

/// Start and end from captured grid lines, clamped to `0..=last`.
fn explicit_range(child: &ChildCapture, axis: Axis, last: usize) -> Option<(usize, usize)> {
    let placement = child.placement.along(axis);
    let clamp = |line: i64| line.clamp(0, last as i64) as usize;

    let start = clamp(placement.start?);
    let end = match (placement.end, placement.span) {
        (Some(end), _) => clamp(end),
        (None, Some(span)) => clamp((start as i64).saturating_add(span.max(1) - 1)),
        (None, None) => start,
    };
    Some((start, end.max(start)))
}

/// First and last track overlapped by the half-open range `[left, right)`.
fn geometric_range(bounds: &[TrackBounds], left: f64, right: f64) -> Option<(usize, usize)> {
    let mut hits = bounds
        .iter()
        .enumerate()
        .filter(|(_, b)| right > b.left && left < b.right)
        .map(|(i, _)| i);
    let first = hits.next()?;
    Some((first, hits.last().unwrap_or(first)))
}

/// First track whose right edge is at or past `center`.
fn center_track(bounds: &[TrackBounds], center: f64) -> Option<usize> {
    bounds.iter().position(|b| center <= b.right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{Bounds, GridPlacement, NodeId};

    fn child(x: f64, width: f64) -> ChildCapture {
        ChildCapture::new(NodeId(0), Bounds::new(x, 0.0, width, 40.0))
    }

    fn columns() -> TrackList {
        TrackList::new(vec![100.0, 100.0, 100.0])
    }

    #[test]
    fn test_track_bounds_include_gaps() {
        let bounds = track_bounds(&columns(), 10.0);
        assert_eq!(bounds[0], TrackBounds { left: 0.0, right: 100.0 });
        assert_eq!(bounds[1], TrackBounds { left: 110.0, right: 210.0 });
        assert_eq!(bounds[2], TrackBounds { left: 220.0, right: 320.0 });
    }

    #[test]
    fn test_geometry_spanning_tracks() {
        let result = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &[child(90.0, 150.0)]);
        let assignment = result.assigned[0][0];
        assert_eq!(assignment.start, 0);
        assert!(assignment.end >= 1);
        assert!(assignment.span >= 2);
    }

    #[test]
    fn test_explicit_lines_beat_geometry() {
        let c = child(250.0, 20.0).with_placement(GridPlacement::columns(0, 1));
        let result = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &[c]);
        let assignment = result.for_child(0).unwrap();
        assert_eq!((assignment.start, assignment.end, assignment.span), (0, 1, 2));
        assert!(result.assigned[2].is_empty());
    }

    #[test]
    fn test_explicit_span_and_clamping() {
        let spanned = child(0.0, 10.0).with_placement(GridPlacement {
            column_start: Some(1),
            column_span: Some(5),
            ..Default::default()
        });
        let past_end = child(0.0, 10.0).with_placement(GridPlacement {
            column_start: Some(7),
            ..Default::default()
        });
        let negative = child(250.0, 10.0).with_placement(GridPlacement {
            column_start: Some(-3),
            column_end: Some(-5),
            ..Default::default()
        });
        let result = resolve_placements(
            &columns(),
            0.0,
            0.0,
            Axis::Horizontal,
            &[spanned, past_end, negative],
        );

        let a = result.for_child(0).unwrap();
        assert_eq!((a.start, a.end, a.span), (1, 2, 2));
        let b = result.for_child(1).unwrap();
        assert_eq!((b.start, b.end, b.span), (2, 2, 1));
        let c = result.for_child(2).unwrap();
        assert_eq!((c.start, c.end, c.span), (0, 0, 1));
    }

    #[test]
    fn test_extreme_lines_saturate() {
        let huge = GridPlacement {
            column_start: Some(1),
            column_span: Some(i64::MAX),
            row_start: Some(1),
            row_span: Some(i64::MAX),
            ..Default::default()
        };
        let outer = GridPlacement {
            column_start: Some(i64::MIN),
            column_end: Some(i64::MAX),
            row_start: Some(i64::MAX),
            row_end: Some(i64::MIN),
            ..Default::default()
        };
        let children = [
            ChildCapture::new(NodeId(0), Bounds::new(0.0, 0.0, 10.0, 10.0)).with_placement(huge),
            ChildCapture::new(NodeId(1), Bounds::new(0.0, 0.0, 10.0, 10.0)).with_placement(outer),
        ];

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let result = resolve_placements(&columns(), 0.0, 0.0, axis, &children);
            let a = result.for_child(0).unwrap();
            assert_eq!((a.start, a.end, a.span), (1, 2, 2));
        }

        let across = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &children);
        let b = across.for_child(1).unwrap();
        assert_eq!((b.start, b.end, b.span), (0, 2, 3));
        let down = resolve_placements(&columns(), 0.0, 0.0, Axis::Vertical, &children);
        let b = down.for_child(1).unwrap();
        assert_eq!((b.start, b.end, b.span), (2, 2, 1));
    }

    #[test]
    fn test_origin_is_subtracted() {
        let result = resolve_placements(&columns(), 0.0, 1000.0, Axis::Horizontal, &[child(1110.0, 50.0)]);
        assert_eq!(result.for_child(0).unwrap().start, 1);
    }

    #[test]
    fn test_zero_width_falls_back_to_center() {
        // Sits exactly on the boundary between track 0 and track 1
        let result = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &[child(100.0, 0.0)]);
        assert_eq!(result.for_child(0).unwrap().start, 0);

        // Inside a gap
        let result = resolve_placements(&columns(), 20.0, 0.0, Axis::Horizontal, &[child(105.0, 0.0)]);
        assert_eq!(result.for_child(0).unwrap().start, 1);
    }

    #[test]
    fn test_outside_every_track_lands_on_last() {
        let result = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &[child(900.0, 0.0)]);
        let assignment = result.for_child(0).unwrap();
        assert_eq!((assignment.start, assignment.span), (2, 1));
    }

    #[test]
    fn test_vertical_axis_uses_row_lines() {
        let c = ChildCapture::new(NodeId(3), Bounds::new(500.0, 150.0, 10.0, 10.0)).with_placement(
            GridPlacement {
                column_start: Some(2),
                row_end: Some(2),
                ..Default::default()
            },
        );
        let rows = TrackList::new(vec![100.0, 100.0, 100.0]);
        let result = resolve_placements(&rows, 0.0, 0.0, Axis::Vertical, &[c]);
        // No row start, so geometry decides and the row end is ignored
        assert_eq!(result.for_child(0).unwrap().start, 1);
        assert_eq!(result.for_child(0).unwrap().span, 1);
    }

    #[test]
    fn test_empty_tracks_place_nothing() {
        let result = resolve_placements(&TrackList::default(), 0.0, 0.0, Axis::Horizontal, &[child(0.0, 10.0)]);
        assert!(result.assigned.is_empty());
        assert!(result.for_child(0).is_none());
    }

    #[test]
    fn test_buckets_keep_capture_order() {
        let children = [child(10.0, 10.0), child(150.0, 10.0), child(20.0, 10.0)];
        let result = resolve_placements(&columns(), 0.0, 0.0, Axis::Horizontal, &children);
        let first: Vec<usize> = result.assigned[0].iter().map(|a| a.child).collect();
        assert_eq!(first, vec![0, 2]);
        assert_eq!(result.assigned[1][0].child, 1);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use strata_core::{Bounds, GridPlacement, NodeId};

    fn line() -> impl Strategy<Value = Option<i64>> {
        proptest::option::of(prop_oneof![-4i64..12, any::<i64>()])
    }

    proptest! {
        #[test]
        fn every_child_gets_one_valid_assignment(
            widths in proptest::collection::vec(0.0f64..300.0, 1..8),
            gap in 0.0f64..20.0,
            vertical in any::<bool>(),
            kids in proptest::collection::vec(
                (-200.0f64..2000.0, 0.0f64..400.0, line(), line(), line()),
                0..16,
            ),
        ) {
            let tracks = TrackList::new(widths.clone());
            let children: Vec<ChildCapture> = kids
                .iter()
                .map(|(p, len, start, end, span)| {
                    ChildCapture::new(NodeId(0), Bounds::new(*p, *p, *len, *len)).with_placement(GridPlacement {
                        column_start: *start,
                        column_end: *end,
                        column_span: *span,
                        row_start: *start,
                        row_end: *end,
                        row_span: *span,
                    })
                })
                .collect();

            let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
            let result = resolve_placements(&tracks, gap, 0.0, axis, &children);
            prop_assert_eq!(result.iter().count(), children.len());
            for (bucket, assignments) in result.assigned.iter().enumerate() {
                for a in assignments {
                    prop_assert_eq!(a.start, bucket);
                    prop_assert!(a.end >= a.start && a.end < widths.len());
                    prop_assert_eq!(a.span, a.end - a.start + 1);
                }
            }
        }
    }
}
