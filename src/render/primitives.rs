use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Fill applied to the currently picked shape.
    pub const HIGHLIGHT: Self = Self::rgb(1.0, 1.0, 0.0);

    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same color with a different alpha, used to dim disabled legend markers.
    #[must_use]
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [("r", self.r), ("g", self.g), ("b", self.b), ("a", self.a)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command in absolute pixel coordinates, produced by flattening the
/// scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Color,
    },
}

impl DrawCommand {
    pub fn validate(self) -> ChartResult<()> {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                if ![x, y, width, height].iter().all(|v| v.is_finite()) {
                    return Err(ChartError::InvalidData(
                        "rect coordinates must be finite".to_owned(),
                    ));
                }
                if width < 0.0 || height < 0.0 {
                    return Err(ChartError::InvalidData(
                        "rect extents must be >= 0".to_owned(),
                    ));
                }
                fill.validate()
            }
            Self::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                if !cx.is_finite() || !cy.is_finite() || !radius.is_finite() || radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "circle geometry must be finite with radius >= 0".to_owned(),
                    ));
                }
                fill.validate()
            }
        }
    }
}
