//! Flexbox metadata mapped onto a stacking container.

use strata_core::{Alignment, Axis, FlexMeta, NodeId, Padding, RebuildError, SizingMode};
use strata_parser::parse_gap;

use crate::builder::ContainerBuilder;

/// Configure `node` as the stacking container a flex container maps to.
///
/// `direction: column` stacks vertically, anything else horizontally. The gap
/// along the stacking axis becomes item spacing. The primary axis hugs its
/// content and the counter axis keeps its size.
pub fn apply_flex<B: ContainerBuilder>(builder: &mut B, node: NodeId, meta: &FlexMeta) -> Result<(), RebuildError> {
    let axis = match meta.direction.as_deref() {
        Some(direction) if direction.starts_with("column") => Axis::Vertical,
        _ => Axis::Horizontal,
    };
    builder.set_axis(node, axis)?;

    if let Some(gap) = &meta.gap {
        let gap = parse_gap(gap);
        let spacing = match axis {
            Axis::Horizontal => gap.column,
            Axis::Vertical => gap.row,
        };
        builder.set_spacing(node, spacing.round())?;
    }

    if meta.align.is_some() || meta.justify.is_some() {
        builder.set_alignment(
            node,
            primary_alignment(meta.justify.as_deref()),
            counter_alignment(meta.align.as_deref()),
        )?;
    }

    builder.set_sizing(node, SizingMode::Hug, SizingMode::Fixed)
}

/// Map `align-items` to counter-axis alignment.
pub fn counter_alignment(align: Option<&str>) -> Alignment {
    match align {
        Some(a) if a.contains("center") => Alignment::Center,
        Some(a) if a.contains("end") => Alignment::End,
        _ => Alignment::Start,
    }
}

/// Map `justify-content` to primary-axis alignment.
pub fn primary_alignment(justify: Option<&str>) -> Alignment {
    match justify {
        Some(j) if j.contains("center") => Alignment::Center,
        Some(j) if j.contains("space-between") => Alignment::SpaceBetween,
        Some(j) if j.contains("end") => Alignment::End,
        _ => Alignment::Start,
    }
}

/// Apply captured padding, rounded to whole pixels.
pub fn apply_padding<B: ContainerBuilder>(builder: &mut B, node: NodeId, padding: &Padding) -> Result<(), RebuildError> {
    builder.set_padding(node, padding.rounded())
}
