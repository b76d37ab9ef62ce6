//! Rebuilds captured grid containers as nested stacking containers.
//!
//! Conversion is split into a pure decision and a batched application:
//!
//! 1. [`plan_grid`] decides the full nesting for one container as an
//!    immutable [`StackPlan`]
//! 2. [`apply_plan`] carries it out against a [`ContainerBuilder`], restoring
//!    the original children if any builder call fails
//!
//! [`convert_grid`] runs both for one container and never fails; problems are
//! reported as [`Diagnostic`]s. [`convert_capture`] walks a whole captured
//! layer tree into an in-memory [`LayerTree`], converting every grid frame.
//!
//! # Example
//!
//! ```
//! use strata_convert::{convert_capture, from_json, ConvertOptions};
//!
//! let json = r#"{
//!     "type": "FRAME", "x": 0, "y": 0, "width": 200, "height": 100,
//!     "layout": { "type": "grid", "template": "1fr 1fr" },
//!     "children": [
//!         { "type": "RECTANGLE", "x": 0, "y": 0, "width": 100, "height": 50 },
//!         { "type": "RECTANGLE", "x": 100, "y": 0, "width": 100, "height": 50 }
//!     ]
//! }"#;
//!
//! let layer = from_json(json).unwrap();
//! let conversion = convert_capture(&layer, &ConvertOptions::default()).unwrap();
//! assert_eq!(conversion.report.converted.len(), 1);
//! ```

mod apply;
mod builder;
mod capture;
mod convert;
mod flex;
mod plan;
mod tree;

pub use apply::{apply_plan, Applied, ApplyError};
pub use builder::ContainerBuilder;
pub use capture::{convert_capture, from_json, Conversion, ConversionReport};
pub use convert::{convert_grid, ConvertOptions, ConvertedGrid, Diagnostic, DiagnosticKind, GridOutcome};
pub use flex::{apply_flex, apply_padding, counter_alignment, primary_alignment};
pub use plan::{plan_grid, PlanBranch, PlanContainer, PlanItem, Placement, StackPlan};
pub use tree::{LayerNode, LayerTree, StackConfig};
