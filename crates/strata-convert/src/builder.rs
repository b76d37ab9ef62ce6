//! The container-building capability conversion runs against.

use strata_core::{Alignment, Axis, NodeId, Padding, RebuildError, SizingMode};

/// Operations a host surface offers for building stacking containers.
///
/// Conversion only ever calls these. Implementations are assumed to be
/// driven from a single thread; nothing here is reentrant.
pub trait ContainerBuilder {
    /// Create a new, unattached stacking container.
    fn create_container(&mut self) -> Result<NodeId, RebuildError>;

    /// Set the stacking axis of a container.
    fn set_axis(&mut self, node: NodeId, axis: Axis) -> Result<(), RebuildError>;

    /// Set sizing along the stacking axis (`primary`) and across it (`counter`).
    fn set_sizing(&mut self, node: NodeId, primary: SizingMode, counter: SizingMode) -> Result<(), RebuildError>;

    /// Set the spacing between consecutive items.
    fn set_spacing(&mut self, node: NodeId, spacing: f64) -> Result<(), RebuildError>;

    fn set_padding(&mut self, node: NodeId, padding: Padding) -> Result<(), RebuildError>;

    /// Set item alignment along and across the stacking axis.
    ///
    /// Grid conversion never calls this; hosts without alignment support can
    /// keep the default.
    fn set_alignment(&mut self, node: NodeId, primary: Alignment, counter: Alignment) -> Result<(), RebuildError> {
        let _ = (node, primary, counter);
        Ok(())
    }

    /// Detach a node from its parent. Detaching an unattached node is a no-op.
    fn detach(&mut self, node: NodeId) -> Result<(), RebuildError>;

    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> Result<(), RebuildError>;

    /// Append an unattached node as the last child of `parent`.
    fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), RebuildError>;
}
