use serde_json::{Value, json};

use crate::legend::LegendDatum;
use crate::render::Color;
use crate::scene::{BBox, Geometry, NodeId, Scene, Shape};
use crate::series::{Dataset, PALETTE, Series, SeriesCore};

/// Circle markers over two numeric row fields, normalized into the content
/// area. The whole series is one toggleable legend item.
#[derive(Debug)]
pub struct ScatterSeries {
    core: SeriesCore,
    x_key: String,
    y_key: String,
    label: String,
    fill: Color,
    marker_radius: f64,
    // Derived by `process_data`.
    points: Vec<(f64, f64)>,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
}

impl ScatterSeries {
    #[must_use]
    pub fn new(id: impl Into<String>, x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        let core = SeriesCore::new(id);
        let label = core.id.clone();
        Self {
            core,
            x_key: x_key.into(),
            y_key: y_key.into(),
            label,
            fill: PALETTE[0],
            marker_radius: 5.0,
            points: Vec::new(),
            x_domain: (0.0, 1.0),
            y_domain: (0.0, 1.0),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    #[must_use]
    pub fn with_show_in_legend(mut self, show: bool) -> Self {
        self.core.show_in_legend = show;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: bool) -> Self {
        self.core.tooltip = tooltip;
        self
    }

    fn normalized(value: f64, domain: (f64, f64)) -> f64 {
        let span = domain.1 - domain.0;
        if span <= 0.0 {
            0.5
        } else {
            (value - domain.0) / span
        }
    }
}

impl Series for ScatterSeries {
    fn id(&self) -> &str {
        &self.core.id
    }

    fn visible(&self) -> bool {
        self.core.visible
    }

    fn show_in_legend(&self) -> bool {
        self.core.show_in_legend
    }

    fn tooltip_enabled(&self) -> bool {
        self.core.tooltip
    }

    fn set_data(&mut self, data: Dataset) {
        self.core.data = data;
    }

    fn process_data(&mut self) {
        self.points.clear();
        for row in self.core.data.iter() {
            let x = row.get(&self.x_key).and_then(Value::as_f64);
            let y = row.get(&self.y_key).and_then(Value::as_f64);
            if let (Some(x), Some(y)) = (x, y) {
                self.points.push((x, y));
            }
        }

        if let Some(first) = self.points.first().copied() {
            let mut x_domain = (first.0, first.0);
            let mut y_domain = (first.1, first.1);
            for (x, y) in self.points.iter().copied() {
                x_domain = (x_domain.0.min(x), x_domain.1.max(x));
                y_domain = (y_domain.0.min(y), y_domain.1.max(y));
            }
            self.x_domain = x_domain;
            self.y_domain = y_domain;
        }
    }

    fn list_legend_items(&self, out: &mut Vec<LegendDatum>) {
        out.push(LegendDatum {
            series_id: self.core.id.clone(),
            item_id: self.core.id.clone(),
            label: self.label.clone(),
            enabled: self.core.visible,
            marker_fill: self.fill,
        });
    }

    fn attach(&mut self, scene: &mut Scene, parent: NodeId) -> NodeId {
        self.core.attach(scene, parent)
    }

    fn detach(&mut self, scene: &mut Scene) {
        self.core.detach(scene);
    }

    fn group(&self) -> Option<NodeId> {
        self.core.group
    }

    fn perform_layout(&mut self, scene: &mut Scene, area: BBox) {
        let Some(group) = self.core.group else {
            return;
        };
        scene.clear_children(group);
        if !self.core.visible {
            return;
        }

        for (x, y) in self.points.iter().copied() {
            let px = area.x + Self::normalized(x, self.x_domain) * area.width;
            let py = area.y + (1.0 - Self::normalized(y, self.y_domain)) * area.height;
            let shape = Shape::new(
                Geometry::Circle {
                    cx: px,
                    cy: py,
                    radius: self.marker_radius,
                },
                self.fill,
            )
            .with_datum(json!({
                "seriesId": self.core.id,
                "x": x,
                "y": y,
            }));
            let node = scene.create_shape(shape);
            scene.append(group, node);
        }
    }

    fn tooltip_html(&self, datum: &Value) -> Option<String> {
        let x = datum.get("x").and_then(Value::as_f64)?;
        let y = datum.get("y").and_then(Value::as_f64)?;
        Some(format!("<div><strong>{}</strong><br>{x}, {y}</div>", self.label))
    }

    fn toggle_item(&mut self, item_id: &str, enabled: bool) {
        if item_id == self.core.id {
            self.core.visible = enabled;
        }
    }
}
