//! Chart orchestrator: owns the scene root, the series collection, and the
//! legend; drives the two-stage data/layout pipeline and pointer
//! interaction.

pub mod layout;
pub mod pipeline;
pub mod pointer;
pub mod scheduler;
pub mod tooltip;

pub use layout::{CartesianLayout, ChartLayout, LayoutContext};
pub use scheduler::{Scheduler, SchedulerSnapshot};
pub use tooltip::Tooltip;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ChartResult;
use crate::legend::{Legend, LegendStyle, Orientation};
use crate::render::{Color, RenderFrame, Renderer};
use crate::scene::{BBox, NodeId, Scene};
use crate::series::{Dataset, Series};

/// Four-sided inset in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl LegendPosition {
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Vertical,
            Self::Top | Self::Bottom => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    pub legend_position: LegendPosition,
    pub legend_padding: f64,
    pub tooltip_class: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: Padding::uniform(20.0),
            legend_position: LegendPosition::default(),
            legend_padding: 20.0,
            tooltip_class: "scenechart-tooltip".to_owned(),
        }
    }
}

/// Result of [`Chart::add_series`]. A rejected series is handed back so the
/// caller can decide whether to retry under a different chart.
#[must_use]
pub enum AddSeries {
    Added,
    Rejected(Box<dyn Series>),
}

impl AddSeries {
    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Saved highlight state of the currently picked shape. The fill snapshot is
/// the sole mechanism for restoring the node's appearance, so picked shapes
/// must not have their fill mutated externally.
#[derive(Debug, Clone)]
pub(crate) struct Pick {
    pub(crate) node: NodeId,
    pub(crate) saved_fill: Color,
}

pub struct Chart<K: ChartLayout> {
    pub(crate) scene: Scene,
    pub(crate) series_root: NodeId,
    pub(crate) legend: Legend,
    pub(crate) layout: K,
    pub(crate) series: Vec<Box<dyn Series>>,
    pub(crate) data: Dataset,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) padding: Padding,
    pub(crate) legend_position: LegendPosition,
    pub(crate) legend_padding: f64,
    pub(crate) legend_auto_padding: Padding,
    pub(crate) legend_bbox: Option<BBox>,
    pub(crate) scheduler: Scheduler,
    pub(crate) tooltip: Tooltip,
    pub(crate) last_pick: Option<Pick>,
    pub(crate) pointer_enabled: bool,
    pub(crate) destroyed: bool,
}

impl<K: ChartLayout> Chart<K> {
    pub fn new(layout: K, config: ChartConfig) -> Self {
        let mut scene = Scene::new();
        let root = scene.root();
        let series_root = scene.create_group();
        scene.append(root, series_root);

        let mut legend = Legend::new();
        legend.attach(&mut scene, root);
        legend.set_orientation(config.legend_position.orientation());
        let _ = legend.take_layout_change();

        let mut chart = Self {
            scene,
            series_root,
            legend,
            layout,
            series: Vec::new(),
            data: Arc::new(Vec::new()),
            width: config.width,
            height: config.height,
            padding: config.padding,
            legend_position: config.legend_position,
            legend_padding: config.legend_padding,
            legend_auto_padding: Padding::default(),
            legend_bbox: None,
            scheduler: Scheduler::default(),
            tooltip: Tooltip::new(config.tooltip_class),
            last_pick: None,
            pointer_enabled: true,
            destroyed: false,
        };
        chart.scheduler.request_layout();
        chart
    }

    /// Root group under which series geometry is attached.
    #[must_use]
    pub fn series_root(&self) -> NodeId {
        self.series_root
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The width of the chart in CSS pixels.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.scheduler.request_layout();
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The height of the chart in CSS pixels.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.scheduler.request_layout();
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.scheduler.request_layout();
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.scheduler.request_layout();
    }

    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }

    /// Changing the position resets accumulated auto-padding and re-derives
    /// the legend's flow orientation.
    pub fn set_legend_position(&mut self, position: LegendPosition) {
        if self.legend_position != position {
            self.legend_position = position;
            self.legend_auto_padding.clear();
            self.legend.set_orientation(position.orientation());
            let _ = self.legend.take_layout_change();
            self.scheduler.request_layout();
        }
    }

    #[must_use]
    pub fn legend_padding(&self) -> f64 {
        self.legend_padding
    }

    pub fn set_legend_padding(&mut self, padding: f64) {
        if self.legend_padding != padding {
            self.legend_padding = padding;
            self.scheduler.request_layout();
        }
    }

    /// Derived inset reserved for the legend; read-only to callers.
    #[must_use]
    pub fn legend_auto_padding(&self) -> Padding {
        self.legend_auto_padding
    }

    /// Legend bounding box measured by the most recent layout pass.
    #[must_use]
    pub fn legend_bbox(&self) -> Option<BBox> {
        self.legend_bbox
    }

    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn set_legend_style(&mut self, style: LegendStyle) {
        self.legend.set_style(style);
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn set_tooltip_class(&mut self, class: impl Into<String>) {
        self.tooltip.set_class(class);
    }

    pub fn set_tooltip_offset(&mut self, offset: (f64, f64)) {
        self.tooltip.set_offset(offset);
    }

    #[must_use]
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Assigns the shared dataset and broadcasts the same reference to every
    /// attached series, then schedules a data pass.
    pub fn set_data(&mut self, rows: Vec<Value>) {
        self.data = Arc::new(rows);
        for series in &mut self.series {
            series.set_data(Arc::clone(&self.data));
        }
        debug!(rows = self.data.len(), "chart data assigned");
        self.scheduler.request_data();
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series_ids(&self) -> Vec<&str> {
        self.series.iter().map(|series| series.id()).collect()
    }

    #[must_use]
    pub fn series_by_id(&self, id: &str) -> Option<&dyn Series> {
        self.series
            .iter()
            .find(|series| series.id() == id)
            .map(|series| series.as_ref())
    }

    /// Adds a series, optionally before an existing one (preserving relative
    /// paint order). A series whose id is already present is rejected and
    /// handed back untouched. Schedules a data pass on success.
    pub fn add_series(&mut self, mut series: Box<dyn Series>, before: Option<&str>) -> AddSeries {
        if self.series.iter().any(|s| s.id() == series.id()) {
            return AddSeries::Rejected(series);
        }

        let group = series.attach(&mut self.scene, self.series_root);
        series.set_data(Arc::clone(&self.data));

        let before_index = before.and_then(|id| self.series.iter().position(|s| s.id() == id));
        match before_index {
            Some(index) => {
                if let Some(before_group) = self.series[index].group() {
                    self.scene.insert_before(self.series_root, group, before_group);
                }
                self.series.insert(index, series);
            }
            None => self.series.push(series),
        }

        self.scheduler.request_data();
        AddSeries::Added
    }

    /// Detaches the series' scene geometry and returns the series so the
    /// caller may attach it to another chart. Schedules a data pass.
    pub fn remove_series(&mut self, id: &str) -> Option<Box<dyn Series>> {
        let index = self.series.iter().position(|series| series.id() == id)?;
        let mut series = self.series.remove(index);
        series.detach(&mut self.scene);
        self.drop_stale_pick();
        self.scheduler.request_data();
        Some(series)
    }

    pub fn remove_all_series(&mut self) {
        for series in &mut self.series {
            series.detach(&mut self.scene);
        }
        self.series.clear();
        self.drop_stale_pick();
        self.scheduler.request_data();
    }

    fn drop_stale_pick(&mut self) {
        if let Some(pick) = &self.last_pick
            && !self.scene.contains(pick.node)
        {
            self.last_pick = None;
        }
    }

    #[must_use]
    pub fn scheduler_snapshot(&self) -> SchedulerSnapshot {
        self.scheduler.snapshot()
    }

    #[must_use]
    pub fn data_pending(&self) -> bool {
        self.scheduler.data_pending()
    }

    #[must_use]
    pub fn layout_pending(&self) -> bool {
        self.scheduler.layout_pending()
    }

    /// Flattens the current scene into a draw-order frame.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        RenderFrame::from_scene(&self.scene, self.scene.root(), self.width, self.height)
    }

    pub fn render(&mut self, renderer: &mut impl Renderer) -> ChartResult<()> {
        let frame = self.build_render_frame();
        renderer.render(&frame)
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Idempotent teardown: detaches the tooltip from its host, disables
    /// pointer handling, absorbs the legend change flag, and cancels both
    /// pending triggers individually.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.pointer_enabled = false;
        self.tooltip.detach();
        let _ = self.legend.take_layout_change();
        self.scheduler.cancel_data();
        self.scheduler.cancel_layout();
        debug!("chart destroyed");
    }
}
