use indexmap::IndexMap;
use serde_json::{Value, json};
use tracing::debug;

use crate::legend::LegendDatum;
use crate::render::Color;
use crate::scene::{BBox, Geometry, NodeId, Scene, Shape};
use crate::series::{Dataset, PALETTE, Series, SeriesCore};

/// Grouped category bars: one cluster per category row, one bar per enabled
/// value key. Each value key is an independently toggleable legend item.
#[derive(Debug)]
pub struct BarSeries {
    core: SeriesCore,
    category_key: String,
    value_keys: Vec<String>,
    fills: Vec<Color>,
    enabled: IndexMap<String, bool>,
    // Derived by `process_data`. Value rows are sized to `value_keys`, not
    // the enabled subset, so they stay addressable by key index even when
    // the enabled flags change between passes.
    categories: Vec<String>,
    values: Vec<Vec<f64>>,
    max_value: f64,
}

impl BarSeries {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category_key: impl Into<String>,
        value_keys: Vec<String>,
    ) -> Self {
        let enabled = value_keys.iter().map(|key| (key.clone(), true)).collect();
        let fills = value_keys
            .iter()
            .enumerate()
            .map(|(index, _)| PALETTE[index % PALETTE.len()])
            .collect();
        Self {
            core: SeriesCore::new(id),
            category_key: category_key.into(),
            value_keys,
            fills,
            enabled,
            categories: Vec::new(),
            values: Vec::new(),
            max_value: 0.0,
        }
    }

    #[must_use]
    pub fn with_fills(mut self, fills: Vec<Color>) -> Self {
        if !fills.is_empty() {
            self.fills = fills;
        }
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

    pub fn set_visible(&mut self, visible: bool) {
        self.core.visible = visible;
    }

    #[must_use]
    pub fn is_key_enabled(&self, key: &str) -> bool {
        self.enabled.get(key).copied().unwrap_or(false)
    }

    fn enabled_keys(&self) -> Vec<usize> {
        self.value_keys
            .iter()
            .enumerate()
            .filter(|(_, key)| self.is_key_enabled(key))
            .map(|(index, _)| index)
            .collect()
    }

    fn fill_for_key(&self, key_index: usize) -> Color {
        self.fills[key_index % self.fills.len()]
    }

    fn category_of(&self, row: &Value) -> Option<String> {
        match row.get(&self.category_key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl Series for BarSeries {
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
        self.categories.clear();
        self.values.clear();
        self.max_value = 0.0;

        let enabled = self.enabled_keys();
        for row in self.core.data.iter() {
            // Rows without a usable category are skipped, not reported.
            let Some(category) = self.category_of(row) else {
                continue;
            };
            let row_values: Vec<f64> = self
                .value_keys
                .iter()
                .map(|key| row.get(key).and_then(Value::as_f64).unwrap_or(0.0))
                .collect();
            for key_index in &enabled {
                self.max_value = self.max_value.max(row_values[*key_index]);
            }
            self.categories.push(category);
            self.values.push(row_values);
        }

        debug!(
            series = %self.core.id,
            categories = self.categories.len(),
            enabled_keys = enabled.len(),
            "bar series data processed"
        );
    }

    fn list_legend_items(&self, out: &mut Vec<LegendDatum>) {
        for (key_index, key) in self.value_keys.iter().enumerate() {
            out.push(LegendDatum {
                series_id: self.core.id.clone(),
                item_id: key.clone(),
                label: key.clone(),
                enabled: self.is_key_enabled(key),
                marker_fill: self.fill_for_key(key_index),
            });
        }
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

        let enabled = self.enabled_keys();
        let category_count = self.categories.len();
        if category_count == 0 || enabled.is_empty() || self.max_value <= 0.0 {
            return;
        }

        let band = area.width / category_count as f64;
        let cluster_gap = band * 0.2;
        let bar_width = (band - cluster_gap) / enabled.len() as f64;

        for (category_index, category) in self.categories.iter().enumerate() {
            for (slot, key_index) in enabled.iter().enumerate() {
                let value = self.values[category_index]
                    .get(*key_index)
                    .copied()
                    .unwrap_or(0.0);
                let height = (value.max(0.0) / self.max_value) * area.height;
                let x = area.x
                    + category_index as f64 * band
                    + cluster_gap / 2.0
                    + slot as f64 * bar_width;
                let y = area.y + area.height - height;

                let key = &self.value_keys[*key_index];
                let shape = Shape::new(
                    Geometry::Rect {
                        x,
                        y,
                        width: bar_width,
                        height,
                    },
                    self.fill_for_key(*key_index),
                )
                .with_datum(json!({
                    "seriesId": self.core.id,
                    "itemId": key,
                    "category": category,
                    "value": value,
                }));
                let node = scene.create_shape(shape);
                scene.append(group, node);
            }
        }
    }

    fn tooltip_html(&self, datum: &Value) -> Option<String> {
        let category = datum.get("category").and_then(Value::as_str)?;
        let key = datum.get("itemId").and_then(Value::as_str)?;
        let value = datum.get("value").and_then(Value::as_f64)?;
        Some(format!(
            "<div><strong>{key}</strong><br>{category}: {value}</div>"
        ))
    }

    fn toggle_item(&mut self, item_id: &str, enabled: bool) {
        if let Some(flag) = self.enabled.get_mut(item_id) {
            *flag = enabled;
        }
    }
}
