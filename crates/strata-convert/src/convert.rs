//! Conversion of a single grid container.

use serde::Serialize;
use strata_core::{GridContainer, NodeId};
use strata_layout::{GridOptions, ResolvedGrid};
use tracing::{debug, warn};

use crate::apply::apply_plan;
use crate::builder::ContainerBuilder;
use crate::plan::{plan_grid, PlanBranch};

/// Options for grid conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    pub grid: GridOptions,
    /// Round sizes to whole pixels when resizing
    pub round_sizes: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            round_sizes: true,
        }
    }
}

impl ConvertOptions {
    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_round_sizes(mut self, round: bool) -> Self {
        self.round_sizes = round;
        self
    }
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A builder call failed and the container kept its original children
    RebuildFailed,
    /// A child had no area to go to and was removed from the container
    Unplaced,
}

/// An advisory message about one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub node: NodeId,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// A container that was rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedGrid {
    pub wrapper: NodeId,
    pub branch: PlanBranch,
    /// Containers created, the wrapper included
    pub containers: usize,
    pub placed: usize,
    pub unplaced: Vec<NodeId>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of converting one grid container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GridOutcome {
    Converted(ConvertedGrid),
    /// Nothing to convert (no children)
    Skipped,
    /// The rebuild failed; the original children are in place
    Failed(Diagnostic),
}

impl GridOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    /// Every diagnostic the conversion produced.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match self {
            Self::Converted(grid) => grid.diagnostics.iter().collect(),
            Self::Skipped => Vec::new(),
            Self::Failed(diagnostic) => vec![diagnostic],
        }
    }
}

/// Rebuild one grid container as nested stacking containers.
///
/// Never fails: a failed rebuild leaves the original children in place and
/// comes back as [`GridOutcome::Failed`].
pub fn convert_grid<B: ContainerBuilder>(builder: &mut B, container: &GridContainer, options: &ConvertOptions) -> GridOutcome {
    let grid = ResolvedGrid::resolve(container, &options.grid);
    let Some(plan) = plan_grid(container, &grid, &options.grid) else {
        debug!(node = container.node.0, "grid has no children, skipping");
        return GridOutcome::Skipped;
    };

    match apply_plan(builder, container, &plan, options.round_sizes) {
        Ok(applied) => {
            let diagnostics: Vec<Diagnostic> = applied
                .unplaced
                .iter()
                .map(|&node| {
                    warn!(grid = container.node.0, child = node.0, "child matches no grid area");
                    Diagnostic {
                        node,
                        kind: DiagnosticKind::Unplaced,
                        message: format!("Child {node:?} matches no grid area and was removed"),
                    }
                })
                .collect();

            GridOutcome::Converted(ConvertedGrid {
                wrapper: applied.wrapper,
                branch: plan.branch,
                containers: applied.containers,
                placed: applied.placed.len(),
                unplaced: applied.unplaced,
                diagnostics,
            })
        }
        Err(err) => {
            warn!(node = container.node.0, error = %err.error, rollback_failures = err.rollback.len(), "grid conversion failed");
            let mut message = format!("Grid conversion failed: {}", err.error);
            if !err.rollback.is_empty() {
                let rollback: Vec<String> = err.rollback.iter().map(ToString::to_string).collect();
                message.push_str(&format!("; restoring children also failed: {}", rollback.join(", ")));
            }
            GridOutcome::Failed(Diagnostic {
                node: container.node,
                kind: DiagnosticKind::RebuildFailed,
                message,
            })
        }
    }
}
