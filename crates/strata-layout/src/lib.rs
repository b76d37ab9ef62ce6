//! Track sizing and placement for captured grid containers.
//!
//! This crate turns the parsed grid values of one container into concrete
//! geometry and decides which track each child belongs to.
//!
//! # Architecture
//!
//! 1. **Sizing**: [`size_tracks`] resolves parsed tracks into a [`TrackList`]
//! 2. **Placement**: [`resolve_placements`] buckets children by start track,
//!    honoring explicit grid lines before falling back to geometry
//! 3. **Rows**: [`group_rows`] and [`group_explicit_rows`] recover rows for
//!    grids without a usable row template
//!
//! [`ResolvedGrid::resolve`] runs the parsers and the sizer for both axes of a
//! container in one go.
//!
//! [`TrackList`]: strata_core::TrackList

mod grid;
mod placement;
mod rows;
mod sizer;

pub use grid::{GridOptions, ResolvedAreas, ResolvedGrid};
pub use placement::{resolve_placements, track_bounds, PlacementResult, TrackBounds};
pub use rows::{group_explicit_rows, group_rows, RowGroup, ROW_TOLERANCE_PX};
pub use sizer::{resolve_track_spec, size_tracks};
