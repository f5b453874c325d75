use serde_json::Value;

use crate::render::Color;
use crate::scene::BBox;

/// Hit-testable geometry of a shape node, in the node's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
}

impl Geometry {
    #[must_use]
    pub fn bbox(self) -> BBox {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
            } => BBox::new(x, y, width, height),
            Self::Circle { cx, cy, radius } => {
                BBox::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
            }
        }
    }

    #[must_use]
    pub fn contains_point(self, px: f64, py: f64) -> bool {
        match self {
            Self::Rect { .. } => self.bbox().contains_point(px, py),
            Self::Circle { cx, cy, radius } => {
                let dx = px - cx;
                let dy = py - cy;
                dx * dx + dy * dy <= radius * radius
            }
        }
    }
}

/// Drawable leaf node: geometry, a mutable fill, and an optional datum
/// payload attached by the producing series and read back on picking.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Color,
    pub datum: Option<Value>,
}

impl Shape {
    #[must_use]
    pub fn new(geometry: Geometry, fill: Color) -> Self {
        Self {
            geometry,
            fill,
            datum: None,
        }
    }

    #[must_use]
    pub fn with_datum(mut self, datum: Value) -> Self {
        self.datum = Some(datum);
        self
    }
}
