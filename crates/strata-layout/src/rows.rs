//! Row recovery for grids without a usable row template.

use std::collections::BTreeMap;

use strata_core::ChildCapture;
use tracing::trace;

/// Vertical distance within which two children count as the same row.
pub const ROW_TOLERANCE_PX: f64 = 6.0;

/// Children sharing a row, as indices into the capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    /// Representative top edge (the first member's rounded `y`)
    pub y: f64,
    pub members: Vec<usize>,
}

/// Group children by their rounded top edge.
///
/// Each child joins the first existing row whose representative `y` is within
/// `tolerance`, otherwise it opens a new row. Rows keep first-seen order and
/// members keep capture order.
pub fn group_rows(children: &[ChildCapture], tolerance: f64) -> Vec<RowGroup> {
    let mut rows: Vec<RowGroup> = Vec::new();
    for (index, child) in children.iter().enumerate() {
        let y = child.bounds.y.round();
        match rows.iter_mut().find(|row| (row.y - y).abs() <= tolerance) {
            Some(row) => row.members.push(index),
            None => rows.push(RowGroup { y, members: vec![index] }),
        }
    }
    trace!(rows = rows.len(), children = children.len(), "grouped rows by position");
    rows
}

/// Group children by captured row line, ordered by line.
///
/// A child with only a row span goes to line 0. A child with no row data is
/// bucketed by `round(y / container_height)`. Returns `None` when no child
/// carries row data.
pub fn group_explicit_rows(children: &[ChildCapture], container_height: f64) -> Option<Vec<RowGroup>> {
    if !children.iter().any(|c| c.placement.has_row()) {
        return None;
    }

    let height = if container_height > 0.0 { container_height } else { 1.0 };
    let mut lines: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, child) in children.iter().enumerate() {
        let line = match (child.placement.row_start, child.placement.row_span) {
            (Some(start), _) => start,
            (None, Some(_)) => 0,
            (None, None) => (child.bounds.y / height).round() as i64,
        };
        lines.entry(line).or_default().push(index);
    }

    Some(
        lines
            .into_values()
            .map(|members| {
                let y = members
                    .iter()
                    .map(|&i| children[i].bounds.y.round())
                    .fold(f64::INFINITY, f64::min);
                RowGroup { y, members }
            })
            .collect(),
    )
}
