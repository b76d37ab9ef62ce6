//! Core value types for grid reconstruction.

use glam::DVec2;
use indexmap::IndexMap;

/// Identity of a node inside a container builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Start coordinate and length along an axis.
    pub fn extent(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.x, self.width),
            Axis::Vertical => (self.y, self.height),
        }
    }

    /// Bounds translated into a coordinate space whose origin is `origin`.
    pub fn relative_to(&self, origin: DVec2) -> Bounds {
        Bounds::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }
}

/// A layout axis. Horizontal is the column axis, vertical the row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// How a stacking container sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingMode {
    /// Keep the size it was given
    #[default]
    Fixed,
    /// Shrink or grow to wrap the content
    Hug,
}

/// Distribution of items inside a stacking container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    #[cfg_attr(feature = "serde", serde(default, rename = "paddingTop"))]
    pub top: f64,
    #[cfg_attr(feature = "serde", serde(default, rename = "paddingRight"))]
    pub right: f64,
    #[cfg_attr(feature = "serde", serde(default, rename = "paddingBottom"))]
    pub bottom: f64,
    #[cfg_attr(feature = "serde", serde(default, rename = "paddingLeft"))]
    pub left: f64,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Padding with each side rounded to whole pixels.
    pub fn rounded(&self) -> Self {
        Self {
            top: self.top.round(),
            right: self.right.round(),
            bottom: self.bottom.round(),
            left: self.left.round(),
        }
    }
}

/// Extra sizing data attached to a track written as `minmax(<length>, <fr>)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMaxMeta {
    /// The hard lower bound in pixels
    pub min_px: f64,
    /// The fractional share the track may grow to
    pub max_fr: f64,
}

/// One track of a grid template, before sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Track {
    /// Fixed size in pixels, optionally floored/grown by minmax metadata
    Fixed { px: f64, minmax: Option<MinMaxMeta> },
    /// Fraction of the remaining space (fr units)
    Fractional(f64),
}

impl Track {
    /// A plain fixed track.
    pub fn fixed(px: f64) -> Self {
        Self::Fixed { px, minmax: None }
    }

    /// A fixed track carrying `minmax(<min_px>px, <max_fr>fr)` metadata.
    pub fn min_max(min_px: f64, max_fr: f64) -> Self {
        Self::Fixed {
            px: min_px,
            minmax: Some(MinMaxMeta { min_px, max_fr }),
        }
    }

    pub fn fractional(fr: f64) -> Self {
        Self::Fractional(fr)
    }

    pub fn is_fractional(&self) -> bool {
        matches!(self, Self::Fractional(_))
    }
}

/// Resolved pixel lengths for one axis of one grid container.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackList(Vec<f64>);

impl TrackList {
    pub fn new(lengths: Vec<f64>) -> Self {
        Self(lengths)
    }

    /// `count` equal tracks filling `total` with `gap` between them.
    pub fn equal(count: usize, total: f64, gap: f64) -> Self {
        if count == 0 {
            return Self::default();
        }
        let available = (total - gap * (count - 1) as f64).max(0.0);
        Self(vec![available / count as f64; count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of all tracks plus the gaps between them.
    pub fn total_with_gaps(&self, gap: f64) -> f64 {
        self.0.iter().sum::<f64>() + gap * self.0.len().saturating_sub(1) as f64
    }

    /// Sum of `span` tracks starting at `start`, without gaps.
    ///
    /// Tracks past the end of the list contribute nothing.
    pub fn span_length(&self, start: usize, span: usize) -> f64 {
        self.0.iter().skip(start).take(span).sum()
    }

    /// Merged length of a span including the `span - 1` inner gaps.
    pub fn span_extent(&self, start: usize, span: usize, gap: f64) -> f64 {
        self.span_length(start, span) + gap * span.saturating_sub(1) as f64
    }
}

/// Row-major grid of area names; `.` marks an unnamed cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaGrid(pub Vec<Vec<String>>);

impl AreaGrid {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.len()
    }

    /// Number of columns (the widest row).
    pub fn columns(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.0.get(row).and_then(|r| r.get(column)).map(String::as_str)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> {
        self.0.iter().map(Vec::as_slice)
    }
}

/// Inclusive, 0-based bounding box of a named area inside an [`AreaGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaBox {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl AreaBox {
    /// A box covering a single cell.
    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            row_start: row,
            row_end: row,
            col_start: column,
            col_end: column,
        }
    }

    /// Grow the box to include a cell.
    pub fn include(&mut self, row: usize, column: usize) {
        self.row_start = self.row_start.min(row);
        self.row_end = self.row_end.max(row);
        self.col_start = self.col_start.min(column);
        self.col_end = self.col_end.max(column);
    }

    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start + 1
    }

    pub fn col_span(&self) -> usize {
        self.col_end - self.col_start + 1
    }
}

/// Area name to bounding box, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaMap(IndexMap<String, AreaBox>);

impl AreaMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Record an occurrence of `name` at a cell, growing its box.
    pub fn include(&mut self, name: &str, row: usize, column: usize) {
        match self.0.get_mut(name) {
            Some(area) => area.include(row, column),
            None => {
                self.0.insert(name.to_string(), AreaBox::cell(row, column));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AreaBox> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AreaBox)> {
        self.0.iter().map(|(name, area)| (name.as_str(), area))
    }
}

/// Explicit grid-line placement captured for a child, 0-based.
///
/// Values are stored as captured; resolution clamps them into range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPlacement {
    #[cfg_attr(feature = "serde", serde(default, rename = "gridColumnStart"))]
    pub column_start: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, rename = "gridColumnEnd"))]
    pub column_end: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, rename = "gridColumnSpan"))]
    pub column_span: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, rename = "gridRowStart"))]
    pub row_start: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, rename = "gridRowEnd"))]
    pub row_end: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default, rename = "gridRowSpan"))]
    pub row_span: Option<i64>,
}

/// Placement along a single axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisPlacement {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub span: Option<i64>,
}

impl GridPlacement {
    /// Create a placement for a specific cell.
    pub fn cell(column: i64, row: i64) -> Self {
        Self {
            column_start: Some(column),
            row_start: Some(row),
            ..Default::default()
        }
    }

    /// Create a placement covering columns `start..=end`.
    pub fn columns(start: i64, end: i64) -> Self {
        Self {
            column_start: Some(start),
            column_end: Some(end),
            ..Default::default()
        }
    }

    /// Whether any row data was captured.
    pub fn has_row(&self) -> bool {
        self.row_start.is_some() || self.row_span.is_some()
    }

    /// The placement along one axis (horizontal = columns).
    pub fn along(&self, axis: Axis) -> AxisPlacement {
        match axis {
            Axis::Horizontal => AxisPlacement {
                start: self.column_start,
                end: self.column_end,
                span: self.column_span,
            },
            Axis::Vertical => AxisPlacement {
                start: self.row_start,
                end: self.row_end,
                span: self.row_span,
            },
        }
    }
}

/// A captured child of a grid container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildCapture {
    pub node: NodeId,
    /// Geometry in the same space as the container origin
    pub bounds: Bounds,
    pub placement: GridPlacement,
    pub area: Option<String>,
}

impl ChildCapture {
    pub fn new(node: NodeId, bounds: Bounds) -> Self {
        Self {
            node,
            bounds,
            placement: GridPlacement::default(),
            area: None,
        }
    }

    pub fn with_placement(mut self, placement: GridPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }
}

/// Resolved placement of one child along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAssignment {
    /// Index of the child in its container's capture order
    pub child: usize,
    pub start: usize,
    pub end: usize,
    pub span: usize,
}

/// Everything captured about one grid container.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridContainer {
    pub node: NodeId,
    /// Origin of the coordinate space the child bounds are expressed in
    pub origin: DVec2,
    pub width: f64,
    pub height: f64,
    pub columns: Option<String>,
    pub rows: Option<String>,
    pub areas: Option<String>,
    pub gap: f64,
    pub row_gap: Option<f64>,
    pub children: Vec<ChildCapture>,
}

impl GridContainer {
    pub fn new(node: NodeId, width: f64, height: f64) -> Self {
        Self {
            node,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_columns(mut self, spec: impl Into<String>) -> Self {
        self.columns = Some(spec.into());
        self
    }

    pub fn with_rows(mut self, spec: impl Into<String>) -> Self {
        self.rows = Some(spec.into());
        self
    }

    pub fn with_areas(mut self, spec: impl Into<String>) -> Self {
        self.areas = Some(spec.into());
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_row_gap(mut self, gap: f64) -> Self {
        self.row_gap = Some(gap);
        self
    }

    pub fn with_child(mut self, child: ChildCapture) -> Self {
        self.children.push(child);
        self
    }

    pub fn column_gap(&self) -> f64 {
        self.gap
    }

    pub fn row_gap(&self) -> f64 {
        self.row_gap.unwrap_or(self.gap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_list_span_extent() {
        let tracks = TrackList::new(vec![100.0, 50.0, 25.0]);
        assert!((tracks.span_extent(0, 2, 10.0) - 160.0).abs() < 0.001);
        assert!((tracks.span_extent(1, 1, 10.0) - 50.0).abs() < 0.001);
        // Tracks past the end contribute nothing
        assert!((tracks.span_length(2, 5) - 25.0).abs() < 0.001);
        assert!((tracks.total_with_gaps(10.0) - 195.0).abs() < 0.001);
    }

    #[test]
    fn test_equal_tracks_fill_total() {
        let tracks = TrackList::equal(3, 320.0, 10.0);
        assert_eq!(tracks.len(), 3);
        assert!((tracks.total_with_gaps(10.0) - 320.0).abs() < 0.001);
        assert!(TrackList::equal(0, 320.0, 10.0).is_empty());
    }

    #[test]
    fn test_area_box_grows() {
        let mut area = AreaBox::cell(1, 2);
        area.include(0, 0);
        area.include(1, 1);
        assert_eq!(area, AreaBox { row_start: 0, row_end: 1, col_start: 0, col_end: 2 });
        assert_eq!(area.row_span(), 2);
        assert_eq!(area.col_span(), 3);
    }

    #[test]
    fn test_area_grid_columns_uses_widest_row() {
        let grid = AreaGrid(vec![
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into(), "e".into()],
        ]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(1, 2), Some("e"));
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_placement_along_axis() {
        let placement = GridPlacement {
            column_start: Some(1),
            row_span: Some(2),
            ..Default::default()
        };
        assert!(placement.has_row());
        assert_eq!(placement.along(Axis::Horizontal).start, Some(1));
        assert_eq!(placement.along(Axis::Vertical).span, Some(2));
        assert!(!GridPlacement::columns(0, 1).has_row());
    }

    #[test]
    fn test_bounds_relative_to_origin() {
        let bounds = Bounds::new(110.0, 40.0, 50.0, 20.0).relative_to(DVec2::new(100.0, 30.0));
        assert!((bounds.x - 10.0).abs() < 0.001);
        assert!((bounds.y - 10.0).abs() < 0.001);
        assert_eq!(bounds.extent(Axis::Vertical), (10.0, 20.0));
    }
}
