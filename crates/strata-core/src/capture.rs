//! Layers as handed over by the capture stage.
//!
//! A capture is a tree of [`Layer`]s with absolute page coordinates. Frames may
//! carry layout metadata describing the flex or grid container they came from.

use crate::errors::CaptureError;
use crate::types::{Bounds, GridPlacement, Padding};

/// Kind of a captured layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum LayerKind {
    #[default]
    Frame,
    Group,
    Rectangle,
    Text,
    Svg,
    Component,
}

impl LayerKind {
    /// Whether layers of this kind can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Frame | Self::Group | Self::Component)
    }
}

/// A gap as captured: either a bare number or a CSS length string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum GapValue {
    Number(f64),
    Text(String),
}

/// Flexbox metadata of a captured container.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlexMeta {
    /// `row` or `column`
    pub direction: Option<String>,
    pub gap: Option<GapValue>,
    /// The container's `align-items`
    pub align: Option<String>,
    /// The container's `justify-content`
    pub justify: Option<String>,
}

/// Grid metadata of a captured container.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridMeta {
    /// `grid-template-columns`
    pub template: Option<String>,
    /// `grid-template-rows`
    pub rows: Option<String>,
    /// `grid-template-areas`
    pub areas: Option<String>,
    pub gap: Option<GapValue>,
}

/// Layout metadata attached to a frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum LayoutMeta {
    Flex(FlexMeta),
    Grid(GridMeta),
    /// Any other display type; carries no stacking information
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

/// One captured layer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Layer {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: LayerKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: Option<f64>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub padding: Padding,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: Option<LayoutMeta>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub placement: GridPlacement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid_area: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<Layer>,
}

impl Layer {
    pub fn new(kind: LayerKind, bounds: Bounds) -> Self {
        Self {
            kind,
            x: Some(bounds.x),
            y: Some(bounds.y),
            width: Some(bounds.width),
            height: Some(bounds.height),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_layout(mut self, layout: LayoutMeta) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_placement(mut self, placement: GridPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.grid_area = Some(area.into());
        self
    }

    pub fn with_child(mut self, child: Layer) -> Self {
        self.children.push(child);
        self
    }

    /// Display name used in diagnostics.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| format!("{:?}", self.kind))
    }

    /// Absolute bounds of the layer.
    ///
    /// Coordinates are required; a missing size falls back to one pixel so the
    /// layer stays resizable.
    pub fn bounds(&self) -> Result<Bounds, CaptureError> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(Bounds::new(
                x,
                y,
                self.width.filter(|w| *w > 0.0).unwrap_or(1.0),
                self.height.filter(|h| *h > 0.0).unwrap_or(1.0),
            )),
            _ => Err(CaptureError::MissingCoordinates {
                name: self.display_name(),
            }),
        }
    }

    pub fn grid_meta(&self) -> Option<&GridMeta> {
        match &self.layout {
            Some(LayoutMeta::Grid(grid)) => Some(grid),
            _ => None,
        }
    }
}
