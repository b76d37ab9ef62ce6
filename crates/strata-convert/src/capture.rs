//! Whole-capture conversion into a [`LayerTree`].
//!
//! Frames carrying flex metadata become stacking containers directly. Frames
//! carrying grid metadata are rebuilt with [`convert_grid`], children before
//! parents, each grid independently of the others.

use glam::DVec2;
use serde::Serialize;
use strata_core::{Axis, CaptureError, ChildCapture, GridContainer, Layer, LayoutMeta, NodeId, SizingMode};
use strata_parser::parse_gap;
use tracing::{debug, info_span, warn};

use crate::builder::ContainerBuilder;
use crate::convert::{convert_grid, ConvertOptions, Diagnostic, GridOutcome};
use crate::flex::{apply_flex, apply_padding};
use crate::tree::{LayerNode, LayerTree};

/// Summary of a capture conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Grid frames that were rebuilt
    pub converted: Vec<NodeId>,
    /// Grid frames left as they were (no children, or a failed rebuild)
    pub skipped: Vec<NodeId>,
    /// Children removed because they matched no grid area
    pub unplaced: Vec<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A converted capture.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: LayerTree,
    pub root: NodeId,
    pub report: ConversionReport,
}

/// Parse a capture document.
pub fn from_json(json: &str) -> Result<Layer, CaptureError> {
    serde_json::from_str(json).map_err(|e| CaptureError::InvalidDocument { message: e.to_string() })
}

/// Build a layer tree from `layer` and convert every grid frame in it.
///
/// Missing coordinates on any layer abort the conversion. Failures while
/// rebuilding a grid do not; they are reported and the grid is left flat.
pub fn convert_capture(layer: &Layer, options: &ConvertOptions) -> Result<Conversion, CaptureError> {
    let span = info_span!("convert_capture", root = %layer.display_name());
    let _guard = span.enter();

    let mut tree = LayerTree::new();
    let mut report = ConversionReport::default();
    let root = insert_layer(&mut tree, None, layer, options, &mut report)?;

    debug!(
        nodes = tree.len(),
        converted = report.converted.len(),
        skipped = report.skipped.len(),
        "converted capture"
    );
    Ok(Conversion { tree, root, report })
}

fn insert_layer(
    tree: &mut LayerTree,
    parent: Option<NodeId>,
    layer: &Layer,
    options: &ConvertOptions,
    report: &mut ConversionReport,
) -> Result<NodeId, CaptureError> {
    let bounds = layer.bounds()?;
    let id = tree.next_id();
    let mut node = LayerNode::new(id, layer.kind).with_bounds(bounds);
    node.name = layer.name.clone();
    match parent {
        Some(parent) => tree.add_child(parent, node),
        None => tree.add_root(node),
    };

    let mut children = Vec::with_capacity(layer.children.len());
    for child in &layer.children {
        let child_id = insert_layer(tree, Some(id), child, options, report)?;
        children.push(ChildCapture {
            node: child_id,
            bounds: child.bounds()?,
            placement: child.placement,
            area: child.grid_area.clone(),
        });
    }

    if !layer.kind.is_container() {
        return Ok(id);
    }

    match &layer.layout {
        Some(LayoutMeta::Flex(flex)) => {
            apply_padding(tree, id, &layer.padding)?;
            apply_flex(tree, id, flex)?;
        }
        Some(LayoutMeta::Grid(meta)) => {
            apply_padding(tree, id, &layer.padding)?;
            // No native grid: the frame stacks vertically around the rebuilt content
            tree.set_axis(id, Axis::Vertical)?;
            tree.set_sizing(id, SizingMode::Hug, SizingMode::Fixed)?;

            let gap = meta.gap.as_ref().map(parse_gap).unwrap_or_default();
            let mut container = GridContainer::new(id, bounds.width, bounds.height)
                .with_origin(DVec2::new(bounds.x, bounds.y))
                .with_gap(gap.column)
                .with_row_gap(gap.row);
            container.columns = meta.template.clone();
            container.rows = meta.rows.clone();
            container.areas = meta.areas.clone();
            container.children = children;

            record(report, id, convert_grid(tree, &container, options));
        }
        Some(LayoutMeta::Other) | None => {}
    }
    Ok(id)
}

fn record(report: &mut ConversionReport, node: NodeId, outcome: GridOutcome) {
    match outcome {
        GridOutcome::Converted(grid) => {
            report.converted.push(node);
            report.unplaced.extend(grid.unplaced);
            report.diagnostics.extend(grid.diagnostics);
        }
        GridOutcome::Skipped => report.skipped.push(node),
        GridOutcome::Failed(diagnostic) => {
            warn!(node = node.0, "grid left unconverted");
            report.skipped.push(node);
            report.diagnostics.push(diagnostic);
        }
    }
}
