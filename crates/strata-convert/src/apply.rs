//! Carrying out a [`StackPlan`] against a builder.
//!
//! Application runs in three phases:
//!
//! 1. Build every planned container. Nothing is attached to the live tree yet.
//! 2. Move each placed child into its container, resizing it when planned.
//! 3. Detach unplaced children and attach the wrapper to the grid container.
//!
//! If a call fails during phases 2 or 3, every captured child is restored to
//! its captured size and re-attached to the grid container in capture order.
//! The wrapper is detached and left orphaned.

use glam::DVec2;
use strata_core::{GridContainer, NodeId, RebuildError};
use thiserror::Error;
use tracing::{debug, trace};

use crate::builder::ContainerBuilder;
use crate::plan::{PlanContainer, PlanItem, Placement, StackPlan};

/// Result of a successful application.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    /// The wrapper now holding the container's content
    pub wrapper: NodeId,
    /// Number of containers created, the wrapper included
    pub containers: usize,
    pub placed: Vec<NodeId>,
    /// Children removed from the container without a new home
    pub unplaced: Vec<NodeId>,
}

/// A failed application.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct ApplyError {
    /// The builder call that failed
    pub error: RebuildError,
    /// Failures while restoring the original children
    pub rollback: Vec<RebuildError>,
}

impl From<RebuildError> for ApplyError {
    fn from(error: RebuildError) -> Self {
        Self {
            error,
            rollback: Vec::new(),
        }
    }
}

/// Apply `plan` to `container`, rounding sizes to whole pixels when `round_sizes`.
pub fn apply_plan<B: ContainerBuilder>(
    builder: &mut B,
    container: &GridContainer,
    plan: &StackPlan,
    round_sizes: bool,
) -> Result<Applied, ApplyError> {
    let round = |size: DVec2| if round_sizes { size.round() } else { size };

    let mut targets = Vec::new();
    let wrapper = build_container(builder, &plan.root, round, &mut targets)?;
    debug!(node = container.node.0, wrapper = wrapper.0, containers = plan.root.container_count(), "built containers");

    let mut moved = false;
    match move_children(builder, container, plan, wrapper, &targets, round, &mut moved) {
        Ok((placed, unplaced)) => Ok(Applied {
            wrapper,
            containers: plan.root.container_count(),
            placed,
            unplaced,
        }),
        Err(error) => {
            let rollback = if moved { restore(builder, container, wrapper) } else { Vec::new() };
            Err(ApplyError { error, rollback })
        }
    }
}

/// Create `plan` and its nested containers, recording where children go.
fn build_container<B: ContainerBuilder>(
    builder: &mut B,
    plan: &PlanContainer,
    round: impl Fn(DVec2) -> DVec2 + Copy,
    targets: &mut Vec<(NodeId, Placement)>,
) -> Result<NodeId, RebuildError> {
    let node = builder.create_container()?;
    builder.set_axis(node, plan.axis)?;
    builder.set_sizing(node, plan.primary, plan.counter)?;
    if plan.spacing > 0.0 {
        builder.set_spacing(node, plan.spacing)?;
    }
    if let Some(size) = plan.size.map(round) {
        builder.resize(node, size.x, size.y)?;
    }

    for item in &plan.items {
        match item {
            PlanItem::Stack(stack) => {
                let child = build_container(builder, stack, round, targets)?;
                builder.append(node, child)?;
            }
            PlanItem::Place(placement) => targets.push((node, *placement)),
        }
    }
    Ok(node)
}

fn move_children<B: ContainerBuilder>(
    builder: &mut B,
    container: &GridContainer,
    plan: &StackPlan,
    wrapper: NodeId,
    targets: &[(NodeId, Placement)],
    round: impl Fn(DVec2) -> DVec2,
    moved: &mut bool,
) -> Result<(Vec<NodeId>, Vec<NodeId>), RebuildError> {
    let child_node = |index: usize| {
        container
            .children
            .get(index)
            .map(|c| c.node)
            .ok_or_else(|| RebuildError::Host(format!("plan refers to missing child {index}")))
    };

    let mut placed = Vec::with_capacity(targets.len());
    for (target, placement) in targets {
        let child = child_node(placement.child)?;
        *moved = true;
        builder.detach(child)?;
        if let Some(size) = placement.size.map(&round) {
            builder.resize(child, size.x, size.y)?;
        }
        builder.append(*target, child)?;
        trace!(child = child.0, target = target.0, "moved child");
        placed.push(child);
    }

    let mut unplaced = Vec::with_capacity(plan.unplaced.len());
    for &index in &plan.unplaced {
        let child = child_node(index)?;
        *moved = true;
        builder.detach(child)?;
        unplaced.push(child);
    }

    builder.append(container.node, wrapper)?;
    Ok((placed, unplaced))
}

/// Put every captured child back into the container, in capture order.
fn restore<B: ContainerBuilder>(builder: &mut B, container: &GridContainer, wrapper: NodeId) -> Vec<RebuildError> {
    let mut failures = Vec::new();
    if let Err(e) = builder.detach(wrapper) {
        failures.push(e);
    }

    for child in &container.children {
        let steps = [
            builder.detach(child.node),
            builder.resize(child.node, child.bounds.width, child.bounds.height),
            builder.append(container.node, child.node),
        ];
        failures.extend(steps.into_iter().filter_map(Result::err));
    }
    failures
}
