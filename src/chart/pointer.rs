//! Pointer interaction: hit testing, highlight state, tooltip show/hide,
//! and legend click toggling.
//!
//! Pointer handlers run synchronously against the most recently materialized
//! scene and legend state; they never wait on a pending data or layout pass.

use tracing::trace;

use crate::chart::{Chart, ChartLayout, Pick};
use crate::render::Color;
use crate::scene::NodeId;

impl<K: ChartLayout> Chart<K> {
    /// Topmost series shape under the point: series are scanned from
    /// last-added to first, so visually-on-top geometry wins.
    fn pick_series_node(&self, x: f64, y: f64) -> Option<(usize, NodeId)> {
        for (index, series) in self.series.iter().enumerate().rev() {
            let Some(group) = series.group() else {
                continue;
            };
            if let Some(node) = self.scene.pick(group, x, y) {
                return Some((index, node));
            }
        }
        None
    }

    fn restore_fill(&mut self, pick: &Pick) {
        if let Some(shape) = self.scene.shape_mut(pick.node) {
            shape.fill = pick.saved_fill;
        }
    }

    fn enter_node(&mut self, x: f64, y: f64, series_index: usize, node: NodeId) {
        let Some(shape) = self.scene.shape_mut(node) else {
            return;
        };
        let saved_fill = shape.fill;
        let datum = shape.datum.clone();
        shape.fill = Color::HIGHLIGHT;
        self.last_pick = Some(Pick { node, saved_fill });
        trace!(?node, "pointer entered series node");

        let series = &self.series[series_index];
        if series.tooltip_enabled()
            && let Some(html) = datum.as_ref().and_then(|datum| series.tooltip_html(datum))
        {
            self.tooltip.show(x, y, Some(html), self.width);
        }
    }

    /// Handles a pointer move over the chart surface.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.pointer_enabled {
            return;
        }

        match self.pick_series_node(x, y) {
            Some((series_index, node)) => match self.last_pick.take() {
                None => {
                    // Cursor moved from empty space onto a node.
                    self.enter_node(x, y, series_index, node);
                }
                Some(last) if last.node != node => {
                    // Cursor moved from one node to another.
                    self.restore_fill(&last);
                    self.enter_node(x, y, series_index, node);
                }
                Some(last) => {
                    // Cursor moved within the same node; only the tooltip
                    // follows the pointer.
                    self.last_pick = Some(last);
                    if self.series[series_index].tooltip_enabled() {
                        self.tooltip.show(x, y, None, self.width);
                    }
                }
            },
            None => {
                if let Some(last) = self.last_pick.take() {
                    // Cursor moved from a node to empty space.
                    self.restore_fill(&last);
                    self.tooltip.hide();
                }
            }
        }
    }

    /// Handles the pointer leaving the whole chart surface. The tooltip is
    /// hidden unconditionally, independent of pick state.
    pub fn pointer_out(&mut self) {
        if !self.pointer_enabled {
            return;
        }
        self.tooltip.conceal();
    }

    /// Handles a click: hit-tests the legend's own item geometry (not the
    /// scene graph) and toggles the hit item, scheduling a new data pass.
    pub fn pointer_click(&mut self, x: f64, y: f64) {
        if !self.pointer_enabled {
            return;
        }

        let Some((series_id, item_id, enabled)) = self
            .legend
            .datum_for_point(&self.scene, x, y)
            .map(|datum| (datum.series_id.clone(), datum.item_id.clone(), datum.enabled))
        else {
            return;
        };

        if let Some(series) = self
            .series
            .iter_mut()
            .find(|series| series.id() == series_id)
        {
            trace!(%series_id, %item_id, enabled = !enabled, "legend item toggled");
            series.toggle_item(&item_id, !enabled);
            self.scheduler.request_data();
        }
    }

    /// Series and node of the current pick, if any.
    #[must_use]
    pub fn picked_node(&self) -> Option<NodeId> {
        self.last_pick.as_ref().map(|pick| pick.node)
    }
}
