use crate::error::ChartResult;
use crate::render::DrawCommand;
use crate::scene::{NodeId, Scene};

/// Backend-agnostic flattened scene for one chart draw pass.
///
/// Commands appear in paint order: parents before children, earlier siblings
/// before later ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Flattens the subtree under `root` into absolute-coordinate commands.
    #[must_use]
    pub fn from_scene(scene: &Scene, root: NodeId, width: f64, height: f64) -> Self {
        let mut frame = Self::new(width, height);
        frame.collect(scene, root, 0.0, 0.0);
        frame
    }

    fn collect(&mut self, scene: &Scene, node: NodeId, offset_x: f64, offset_y: f64) {
        let (tx, ty) = scene.translation(node);
        let x = offset_x + tx;
        let y = offset_y + ty;

        if let Some(shape) = scene.shape(node) {
            let command = match shape.geometry {
                crate::scene::Geometry::Rect {
                    x: sx,
                    y: sy,
                    width,
                    height,
                } => DrawCommand::Rect {
                    x: x + sx,
                    y: y + sy,
                    width,
                    height,
                    fill: shape.fill,
                },
                crate::scene::Geometry::Circle { cx, cy, radius } => DrawCommand::Circle {
                    cx: x + cx,
                    cy: y + cy,
                    radius,
                    fill: shape.fill,
                },
            };
            self.commands.push(command);
        }

        for child in scene.children(node) {
            self.collect(scene, *child, x, y);
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
