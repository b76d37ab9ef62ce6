//! Core types, capture model, and error types for strata.
//!
//! This crate provides the foundational types shared by the other strata crates:
//! - Geometry and grid value types (tracks, area boxes, placements)
//! - The per-container grid input aggregate
//! - The captured layer model handed over by the capture stage
//! - Error types

pub mod capture;
pub mod errors;
pub mod types;

pub use capture::*;
pub use errors::*;
pub use types::*;
