//! Series contract: data-bound producers of scene nodes and legend entries.
//!
//! A series lives inside exactly one chart at a time. Membership is enforced
//! through ownership: [`crate::chart::Chart::add_series`] consumes the boxed
//! series and `remove_series` hands it back.

pub mod bar;
pub mod scatter;

pub use bar::BarSeries;
pub use scatter::ScatterSeries;

use std::sync::Arc;

use serde_json::Value;

use crate::legend::LegendDatum;
use crate::scene::{BBox, NodeId, Scene};

/// Shared dataset broadcast by the chart to every attached series.
pub type Dataset = Arc<Vec<Value>>;

pub trait Series {
    fn id(&self) -> &str;

    fn visible(&self) -> bool;

    /// Whether the series contributes entries to the aggregated legend.
    fn show_in_legend(&self) -> bool;

    /// Whether picks on this series show a tooltip.
    fn tooltip_enabled(&self) -> bool;

    fn set_data(&mut self, data: Dataset);

    /// Recomputes derived/aggregated values from the current dataset.
    /// Invoked by the chart's data pass for visible series only.
    fn process_data(&mut self);

    /// Appends this series' legend entries to the shared sequence, in the
    /// series' internal item order.
    fn list_legend_items(&self, out: &mut Vec<LegendDatum>);

    /// Creates the series' owned scene group under `parent` and returns it.
    fn attach(&mut self, scene: &mut Scene, parent: NodeId) -> NodeId;

    /// Destroys the owned scene group and clears the handle.
    fn detach(&mut self, scene: &mut Scene);

    fn group(&self) -> Option<NodeId>;

    /// Rebuilds the series geometry inside the given content area.
    fn perform_layout(&mut self, scene: &mut Scene, area: BBox);

    /// Tooltip payload for a picked node's datum. `None` when the datum does
    /// not belong to this series or carries nothing presentable.
    fn tooltip_html(&self, datum: &Value) -> Option<String>;

    /// Toggles one legend-addressable item of this series.
    fn toggle_item(&mut self, item_id: &str, enabled: bool);
}

/// Common state embedded by concrete series implementations.
#[derive(Debug)]
pub struct SeriesCore {
    pub id: String,
    pub visible: bool,
    pub show_in_legend: bool,
    pub tooltip: bool,
    pub data: Dataset,
    pub group: Option<NodeId>,
}

impl SeriesCore {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: true,
            show_in_legend: true,
            tooltip: true,
            data: Arc::new(Vec::new()),
            group: None,
        }
    }

    pub fn attach(&mut self, scene: &mut Scene, parent: NodeId) -> NodeId {
        let group = scene.create_group();
        scene.append(parent, group);
        self.group = Some(group);
        group
    }

    pub fn detach(&mut self, scene: &mut Scene) {
        if let Some(group) = self.group.take() {
            scene.remove_subtree(group);
        }
    }
}

/// Default categorical fill palette shared by the shipped series.
pub(crate) const PALETTE: [crate::render::Color; 6] = [
    crate::render::Color::rgb(0.22, 0.49, 0.72),
    crate::render::Color::rgb(0.89, 0.47, 0.20),
    crate::render::Color::rgb(0.30, 0.69, 0.29),
    crate::render::Color::rgb(0.84, 0.15, 0.16),
    crate::render::Color::rgb(0.58, 0.40, 0.74),
    crate::render::Color::rgb(0.55, 0.34, 0.29),
];
