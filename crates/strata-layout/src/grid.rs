//! Resolution of one grid container's templates into concrete tracks.

use strata_core::{AreaGrid, AreaMap, GridContainer, TrackList};
use strata_parser::{build_area_map, parse_area_spec, parse_track_spec_with_limit, MAX_TRACKS};
use tracing::debug;

use crate::rows::ROW_TOLERANCE_PX;
use crate::sizer::size_tracks;

/// Options for grid resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    /// Distance within which children are grouped into one implicit row
    pub row_tolerance: f64,
    /// Cap on the number of tracks a template may expand to
    pub max_tracks: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_tolerance: ROW_TOLERANCE_PX,
            max_tracks: MAX_TRACKS,
        }
    }
}

impl GridOptions {
    pub fn with_row_tolerance(mut self, tolerance: f64) -> Self {
        self.row_tolerance = tolerance.max(0.0);
        self
    }

    pub fn with_max_tracks(mut self, max_tracks: usize) -> Self {
        self.max_tracks = max_tracks.max(1);
        self
    }
}

/// A parsed area template and the named boxes derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAreas {
    pub grid: AreaGrid,
    pub map: AreaMap,
}

/// Track geometry for both axes of a container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedGrid {
    /// Column widths, `None` without a column template
    pub columns: Option<TrackList>,
    /// Row heights, `None` without a row template
    pub rows: Option<TrackList>,
    pub areas: Option<ResolvedAreas>,
    pub column_gap: f64,
    pub row_gap: f64,
}

impl ResolvedGrid {
    /// Parse and size every template the container carries.
    ///
    /// Pure: the same container and options always resolve identically.
    pub fn resolve(container: &GridContainer, options: &GridOptions) -> Self {
        let column_gap = container.column_gap().max(0.0);
        let row_gap = container.row_gap().max(0.0);

        let sized = |spec: Option<&str>, total: f64, gap: f64| {
            spec.and_then(|s| parse_track_spec_with_limit(s, total, gap, options.max_tracks))
                .map(|tracks| size_tracks(&tracks, total, gap))
        };
        let columns = sized(container.columns.as_deref(), container.width, column_gap);
        let rows = sized(container.rows.as_deref(), container.height, row_gap);

        let areas = container
            .areas
            .as_deref()
            .and_then(parse_area_spec)
            .and_then(|grid| build_area_map(&grid).map(|map| ResolvedAreas { grid, map }));

        debug!(
            node = container.node.0,
            columns = columns.as_ref().map_or(0, TrackList::len),
            rows = rows.as_ref().map_or(0, TrackList::len),
            areas = areas.as_ref().map_or(0, |a| a.map.len()),
            "resolved grid tracks"
        );

        Self {
            columns,
            rows,
            areas,
            column_gap,
            row_gap,
        }
    }

    /// Column widths for an area layout of `count` columns.
    ///
    /// Each column takes its template track when there is a positive one at
    /// that index, otherwise an equal share of the width.
    pub fn area_columns(&self, count: usize, width: f64) -> TrackList {
        area_tracks(self.columns.as_ref(), count, width, self.column_gap)
    }

    /// Row heights for an area layout of `count` rows.
    pub fn area_rows(&self, count: usize, height: f64) -> TrackList {
        area_tracks(self.rows.as_ref(), count, height, self.row_gap)
    }
}

fn area_tracks(template: Option<&TrackList>, count: usize, total: f64, gap: f64) -> TrackList {
    let equal = TrackList::equal(count, total, gap);
    TrackList::new(
        equal
            .iter()
            .enumerate()
            .map(|(i, share)| {
                template
                    .and_then(|tracks| tracks.get(i))
                    .filter(|length| *length > 0.0)
                    .unwrap_or(share)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{AreaBox, NodeId};

    #[test]
    fn test_resolve_columns_and_rows() {
        let container = GridContainer::new(NodeId(1), 600.0, 300.0)
            .with_columns("100px 2fr 1fr")
            .with_rows("1fr 2fr")
            .with_gap(0.0);
        let grid = ResolvedGrid::resolve(&container, &GridOptions::default());

        let columns = grid.columns.unwrap();
        assert_eq!(columns.len(), 3);
        assert!((columns.get(0).unwrap() - 100.0).abs() < 0.001);
        let rows = grid.rows.unwrap();
        assert!((rows.get(0).unwrap() - 100.0).abs() < 0.001);
        assert!((rows.get(1).unwrap() - 200.0).abs() < 0.001);
        assert!(grid.areas.is_none());
    }

    #[test]
    fn test_row_gap_overrides_gap() {
        let container = GridContainer::new(NodeId(1), 210.0, 210.0)
            .with_columns("1fr 1fr")
            .with_rows("1fr 1fr")
            .with_gap(10.0)
            .with_row_gap(0.0);
        let grid = ResolvedGrid::resolve(&container, &GridOptions::default());
        assert!((grid.columns.unwrap().get(0).unwrap() - 100.0).abs() < 0.001);
        assert!((grid.rows.unwrap().get(0).unwrap() - 105.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_templates_are_none() {
        let container = GridContainer::new(NodeId(1), 600.0, 300.0).with_columns("  ");
        let grid = ResolvedGrid::resolve(&container, &GridOptions::default());
        assert!(grid.columns.is_none());
        assert!(grid.rows.is_none());
    }

    #[test]
    fn test_areas_resolved() {
        let container = GridContainer::new(NodeId(1), 300.0, 200.0).with_areas("'a a b' 'c d b'");
        let grid = ResolvedGrid::resolve(&container, &GridOptions::default());
        let areas = grid.areas.unwrap();
        assert_eq!(areas.grid.rows(), 2);
        assert_eq!(
            areas.map.get("b"),
            Some(&AreaBox { row_start: 0, row_end: 1, col_start: 2, col_end: 2 })
        );

        let container = GridContainer::new(NodeId(1), 300.0, 200.0).with_areas("'. .'");
        assert!(ResolvedGrid::resolve(&container, &GridOptions::default()).areas.is_none());
    }

    #[test]
    fn test_area_tracks_fall_back_per_index() {
        let container = GridContainer::new(NodeId(1), 320.0, 200.0)
            .with_columns("100px 200px")
            .with_rows("0px 50px")
            .with_gap(10.0);
        let grid = ResolvedGrid::resolve(&container, &GridOptions::default());

        assert_eq!(grid.area_columns(2, 320.0).as_slice(), &[100.0, 200.0]);
        // The third column has no template track and takes (320 - 20) / 3
        let columns = grid.area_columns(3, 320.0);
        assert_eq!(columns.len(), 3);
        assert!((columns.get(0).unwrap() - 100.0).abs() < 0.001);
        assert!((columns.get(1).unwrap() - 200.0).abs() < 0.001);
        assert!((columns.get(2).unwrap() - 100.0).abs() < 0.001);
        assert_eq!(grid.area_columns(1, 320.0).as_slice(), &[100.0]);

        // A zero-height track also takes the equal share
        let rows = grid.area_rows(2, 200.0);
        assert!((rows.get(0).unwrap() - 95.0).abs() < 0.001);
        assert!((rows.get(1).unwrap() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_track_cap_option() {
        let container = GridContainer::new(NodeId(1), 600.0, 300.0).with_columns("repeat(50, 10px)");
        let options = GridOptions::default().with_max_tracks(4);
        let grid = ResolvedGrid::resolve(&container, &options);
        assert_eq!(grid.columns.unwrap().len(), 4);
    }
}
