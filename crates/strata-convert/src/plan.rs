//! The nesting a grid container is rebuilt into, decided up front.
//!
//! A [`StackPlan`] is computed without touching the builder, so every decision
//! can be inspected and tested before a single node moves.

use glam::DVec2;
use serde::Serialize;
use strata_core::{Axis, ChildCapture, GridContainer, SizingMode, TrackList};
use strata_layout::{
    group_explicit_rows, group_rows, resolve_placements, GridOptions, PlacementResult, ResolvedAreas, ResolvedGrid,
};
use tracing::debug;

/// Which rebuild strategy a plan follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanBranch {
    /// Rows of cells derived from `grid-template-areas`
    Areas,
    /// One column container per column track
    Columns,
    /// One row container per row
    Rows,
}

/// A captured child moved into a planned container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Index into the container's children
    pub child: usize,
    /// New size, or `None` to keep the captured size
    pub size: Option<DVec2>,
}

/// An entry of a planned container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlanItem {
    Stack(PlanContainer),
    Place(Placement),
}

/// A stacking container to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanContainer {
    pub axis: Axis,
    pub primary: SizingMode,
    pub counter: SizingMode,
    pub spacing: f64,
    /// Fixed size, or `None` to leave the builder default
    pub size: Option<DVec2>,
    pub items: Vec<PlanItem>,
}

impl PlanContainer {
    /// A container hugging its content along `axis` and fixed across it.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            primary: SizingMode::Hug,
            counter: SizingMode::Fixed,
            spacing: 0.0,
            size: None,
            items: Vec::new(),
        }
    }

    pub fn with_sizing(mut self, primary: SizingMode, counter: SizingMode) -> Self {
        self.primary = primary;
        self.counter = counter;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(DVec2::new(width, height));
        self
    }

    /// Containers nested directly inside this one.
    pub fn stacks(&self) -> impl Iterator<Item = &PlanContainer> {
        self.items.iter().filter_map(|item| match item {
            PlanItem::Stack(stack) => Some(stack),
            PlanItem::Place(_) => None,
        })
    }

    /// Children placed directly inside this container.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.items.iter().filter_map(|item| match item {
            PlanItem::Place(placement) => Some(placement),
            PlanItem::Stack(_) => None,
        })
    }

    /// Number of containers in this subtree, this one included.
    pub fn container_count(&self) -> usize {
        1 + self.stacks().map(PlanContainer::container_count).sum::<usize>()
    }

    /// Every placement in this subtree, depth first.
    pub fn all_placements(&self) -> Vec<Placement> {
        let mut out = Vec::new();
        self.collect_placements(&mut out);
        out
    }

    fn collect_placements(&self, out: &mut Vec<Placement>) {
        for item in &self.items {
            match item {
                PlanItem::Stack(stack) => stack.collect_placements(out),
                PlanItem::Place(placement) => out.push(*placement),
            }
        }
    }
}

/// The complete rebuild of one grid container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackPlan {
    pub branch: PlanBranch,
    /// The wrapper that replaces the container's children
    pub root: PlanContainer,
    /// Children that no planned container receives
    pub unplaced: Vec<usize>,
}

/// Decide how to rebuild `container`.
///
/// Returns `None` when the container has no children.
pub fn plan_grid(container: &GridContainer, grid: &ResolvedGrid, options: &GridOptions) -> Option<StackPlan> {
    if container.children.is_empty() {
        return None;
    }

    let plan = if let Some(areas) = &grid.areas {
        plan_areas(container, grid, areas)
    } else {
        match &grid.columns {
            Some(columns) if columns.len() > 1 => plan_columns(container, grid, columns),
            _ => plan_rows(container, grid, options),
        }
    };

    debug!(
        node = container.node.0,
        branch = ?plan.branch,
        containers = plan.root.container_count(),
        unplaced = plan.unplaced.len(),
        "planned grid rebuild"
    );
    Some(plan)
}

fn plan_areas(container: &GridContainer, grid: &ResolvedGrid, areas: &ResolvedAreas) -> StackPlan {
    let row_count = areas.grid.rows();
    let column_count = areas.grid.columns();
    let columns = grid.area_columns(column_count, container.width);
    let rows = grid.area_rows(row_count, container.height);

    // cells[row][column] collects the children anchored in that cell
    let mut cells: Vec<Vec<Vec<Placement>>> = vec![vec![Vec::new(); column_count]; row_count];
    let mut unplaced = Vec::new();

    for (index, child) in container.children.iter().enumerate() {
        let area = child.area.as_deref().and_then(|name| areas.map.get(name));
        let Some(area) = area else {
            unplaced.push(index);
            continue;
        };
        let size = DVec2::new(
            columns.span_extent(area.col_start, area.col_span(), grid.column_gap),
            rows.span_extent(area.row_start, area.row_span(), grid.row_gap),
        );
        match cells.get_mut(area.row_start).and_then(|row| row.get_mut(area.col_start)) {
            Some(cell) => cell.push(Placement { child: index, size: Some(size) }),
            None => unplaced.push(index),
        }
    }

    let mut root = PlanContainer::new(Axis::Vertical).with_spacing(grid.row_gap);
    for row_cells in cells {
        let mut row = PlanContainer::new(Axis::Horizontal).with_spacing(grid.column_gap);
        for (column, placements) in row_cells.into_iter().enumerate() {
            let mut cell = PlanContainer::new(Axis::Vertical)
                .with_size(columns.get(column).unwrap_or(0.0), container.height);
            cell.items = placements.into_iter().map(PlanItem::Place).collect();
            row.items.push(PlanItem::Stack(cell));
        }
        root.items.push(PlanItem::Stack(row));
    }

    StackPlan {
        branch: PlanBranch::Areas,
        root,
        unplaced,
    }
}

fn plan_columns(container: &GridContainer, grid: &ResolvedGrid, columns: &TrackList) -> StackPlan {
    let result = resolve_placements(
        columns,
        grid.column_gap,
        container.origin.x,
        Axis::Horizontal,
        &container.children,
    );

    let mut root = PlanContainer::new(Axis::Horizontal).with_spacing(grid.column_gap);
    for width in columns.iter() {
        let column = PlanContainer::new(Axis::Vertical)
            .with_spacing(grid.row_gap)
            .with_size(width, container.height);
        root.items.push(PlanItem::Stack(column));
    }
    fill_columns(&mut root, &result, container, columns, grid.column_gap);

    StackPlan {
        branch: PlanBranch::Columns,
        root,
        unplaced: Vec::new(),
    }
}

/// Rows come from captured row lines, or failing those from tolerance
/// grouping. A row template is not consulted.
fn plan_rows(container: &GridContainer, grid: &ResolvedGrid, options: &GridOptions) -> StackPlan {
    let mut root = PlanContainer::new(Axis::Vertical).with_spacing(grid.row_gap);

    let groups = group_explicit_rows(&container.children, container.height)
        .unwrap_or_else(|| group_rows(&container.children, options.row_tolerance));
    for group in groups {
        let mut row = PlanContainer::new(Axis::Horizontal)
            .with_sizing(SizingMode::Hug, SizingMode::Hug)
            .with_spacing(grid.column_gap);
        row.items = group
            .members
            .into_iter()
            .map(|child| PlanItem::Place(Placement { child, size: None }))
            .collect();
        root.items.push(PlanItem::Stack(row));
    }

    StackPlan {
        branch: PlanBranch::Rows,
        root,
        unplaced: Vec::new(),
    }
}

/// Move each bucket of `result` into the matching column container of `root`.
///
/// Buckets are ordered top to bottom. Spanning children grow to the merged
/// width of their columns.
fn fill_columns(
    root: &mut PlanContainer,
    result: &PlacementResult,
    container: &GridContainer,
    columns: &TrackList,
    gap: f64,
) {
    let children: &[ChildCapture] = &container.children;

    for (item, bucket) in root.items.iter_mut().zip(&result.assigned) {
        let PlanItem::Stack(column) = item else {
            continue;
        };
        let mut bucket = bucket.clone();
        bucket.sort_by(|a, b| children[a.child].bounds.y.total_cmp(&children[b.child].bounds.y));

        for assignment in bucket {
            let bounds = children[assignment.child].bounds;
            let size = (assignment.span > 1).then(|| {
                let width = columns.span_extent(assignment.start, assignment.span, gap);
                DVec2::new(width, bounds.height)
            });
            column.items.push(PlanItem::Place(Placement {
                child: assignment.child,
                size,
            }));
        }
    }
}
