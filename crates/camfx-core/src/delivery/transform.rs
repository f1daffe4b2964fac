//! Transformation segments understood by the delivery service.

use std::fmt;

/// Where and how big an overlay layer is placed over detected faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlacement {
    /// Layer height relative to the face region.
    pub relative_height: f64,
    /// Vertical offset relative to the face region (negative = up).
    pub y_offset: f64,
}

impl Default for FacePlacement {
    fn default() -> Self {
        Self {
            relative_height: 1.2,
            y_offset: -0.05,
        }
    }
}

impl fmt::Display for FacePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fl_layer_apply,fl_relative,g_faces,h_{},y_{}",
            self.relative_height, self.y_offset
        )
    }
}

/// One transformation step in a delivery URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformation {
    /// Scale to the given box.
    Resize { width: u32, height: u32 },
    /// Named overlay asset layered over detected faces.
    Overlay {
        asset: String,
        placement: FacePlacement,
    },
    /// Named art filter (`e_art:<name>`).
    ArtFilter(String),
}

impl Transformation {
    pub fn overlay(asset: impl Into<String>) -> Self {
        Transformation::Overlay {
            asset: asset.into(),
            placement: FacePlacement::default(),
        }
    }

    pub fn art_filter(name: impl Into<String>) -> Self {
        Transformation::ArtFilter(name.into())
    }

    /// URL path components for this step. Overlays span two: the layer and its apply step.
    pub fn components(&self) -> Vec<String> {
        match self {
            Transformation::Resize { width, height } => vec![format!("w_{},h_{}", width, height)],
            Transformation::Overlay { asset, placement } => {
                vec![format!("l_{}", asset), placement.to_string()]
            }
            Transformation::ArtFilter(name) => vec![format!("e_art:{}", name)],
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components().join("/"))
    }
}
