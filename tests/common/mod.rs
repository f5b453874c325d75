//! Shared test fixture: a series with fixed, predictable geometry.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::{Value, json};

use scenechart::legend::LegendDatum;
use scenechart::render::Color;
use scenechart::scene::{BBox, Geometry, NodeId, Scene, Shape};
use scenechart::series::{Dataset, Series, SeriesCore};

/// Observable side effects of a [`StubSeries`], shared with the test body
/// after the series is boxed into a chart.
#[derive(Debug, Default)]
pub struct StubStats {
    pub process_calls: Cell<usize>,
    pub layout_calls: Cell<usize>,
    pub rows_seen: Cell<usize>,
    pub toggles: RefCell<Vec<(String, bool)>>,
}

/// Series with author-supplied shapes laid out at fixed local positions,
/// regardless of the content area.
pub struct StubSeries {
    core: SeriesCore,
    shapes: Vec<(Geometry, Color)>,
    items: Vec<LegendDatum>,
    stats: Rc<StubStats>,
}

impl StubSeries {
    pub fn new(id: &str) -> Self {
        Self {
            core: SeriesCore::new(id),
            shapes: Vec::new(),
            items: Vec::new(),
            stats: Rc::new(StubStats::default()),
        }
    }

    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        self.shapes.push((
            Geometry::Rect {
                x,
                y,
                width,
                height,
            },
            fill,
        ));
        self
    }

    pub fn with_legend_item(mut self, item_id: &str, enabled: bool) -> Self {
        self.items.push(LegendDatum {
            series_id: self.core.id.clone(),
            item_id: item_id.to_owned(),
            label: item_id.to_owned(),
            enabled,
            marker_fill: Color::rgb(0.3, 0.3, 0.9),
        });
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.core.visible = visible;
        self
    }

    pub fn with_show_in_legend(mut self, show: bool) -> Self {
        self.core.show_in_legend = show;
        self
    }

    pub fn with_tooltip(mut self, tooltip: bool) -> Self {
        self.core.tooltip = tooltip;
        self
    }

    pub fn stats(&self) -> Rc<StubStats> {
        Rc::clone(&self.stats)
    }
}

impl Series for StubSeries {
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
        self.stats.process_calls.set(self.stats.process_calls.get() + 1);
        self.stats.rows_seen.set(self.core.data.len());
    }

    fn list_legend_items(&self, out: &mut Vec<LegendDatum>) {
        out.extend(self.items.iter().cloned());
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

    fn perform_layout(&mut self, scene: &mut Scene, _area: BBox) {
        self.stats.layout_calls.set(self.stats.layout_calls.get() + 1);
        let Some(group) = self.core.group else {
            return;
        };
        scene.clear_children(group);
        for (index, (geometry, fill)) in self.shapes.iter().enumerate() {
            let shape = Shape::new(*geometry, *fill).with_datum(json!({
                "seriesId": self.core.id,
                "index": index,
            }));
            let node = scene.create_shape(shape);
            scene.append(group, node);
        }
    }

    fn tooltip_html(&self, datum: &Value) -> Option<String> {
        let index = datum.get("index").and_then(Value::as_u64)?;
        Some(format!("<div>{} #{index}</div>", self.core.id))
    }

    fn toggle_item(&mut self, item_id: &str, enabled: bool) {
        self.stats
            .toggles
            .borrow_mut()
            .push((item_id.to_owned(), enabled));
        if let Some(item) = self.items.iter_mut().find(|item| item.item_id == item_id) {
            item.enabled = enabled;
        }
    }
}
