//! The two-stage processing pipeline: data passes and layout passes.
//!
//! The host drives the chart with explicit ticks: `run_data_tick` stands in
//! for the microtask-equivalent deferred callback and `run_layout_tick` for
//! the paint-frame-equivalent one. `run_until_settled` is the convenience
//! pump that runs a full batch to quiescence.

use tracing::{debug, trace, warn};

use crate::chart::layout::LayoutContext;
use crate::chart::{Chart, ChartLayout, LegendPosition};
use crate::error::{ChartError, ChartResult};
use crate::legend::LegendDatum;
use crate::scene::BBox;

/// Bound on the legend auto-padding fixed point. The measured legend extent
/// normally stabilizes after two passes; exceeding this is a defect surfaced
/// as [`ChartError::LayoutNotConverged`].
pub const MAX_LAYOUT_PASSES: u32 = 8;

impl<K: ChartLayout> Chart<K> {
    /// Fires a pending data pass. Returns whether one ran.
    pub fn run_data_tick(&mut self) -> bool {
        if !self.scheduler.take_data() {
            return false;
        }
        self.process_data_pass();
        true
    }

    /// Fires a pending layout pass. Returns whether one ran.
    ///
    /// A layout-affecting legend mutation that has not yet been converted
    /// into a layout request is absorbed here first, standing in for the
    /// legend's layout-change notification.
    pub fn run_layout_tick(&mut self) -> bool {
        if self.legend.take_layout_change() {
            self.scheduler.request_layout();
        }
        if !self.scheduler.take_layout() {
            return false;
        }
        self.perform_layout_pass();
        true
    }

    /// Runs the pending data pass, then layout passes until the legend
    /// auto-padding feedback reaches its fixed point.
    pub fn run_until_settled(&mut self) -> ChartResult<()> {
        self.run_data_tick();

        let mut passes = 0u32;
        while self.run_layout_tick() {
            passes += 1;
            if passes >= MAX_LAYOUT_PASSES && self.scheduler.layout_pending() {
                self.scheduler.cancel_layout();
                warn!(passes, "legend auto-padding feedback did not converge");
                return Err(ChartError::LayoutNotConverged { passes });
            }
        }
        Ok(())
    }

    /// One data pass: per-series derived data, then the aggregated legend
    /// sequence, then an unconditional layout request.
    fn process_data_pass(&mut self) {
        // A layout scheduled before this pass is superseded by the one the
        // pass requests below.
        self.scheduler.cancel_layout();

        let mut legend_data: Vec<LegendDatum> = Vec::new();
        for series in &mut self.series {
            if series.visible() {
                series.process_data();
            }
            if series.show_in_legend() {
                series.list_legend_items(&mut legend_data);
            }
        }
        debug!(
            series = self.series.len(),
            legend_items = legend_data.len(),
            "data pass complete"
        );
        self.legend.set_data(legend_data);
        let _ = self.legend.take_layout_change();

        self.scheduler.request_layout();
    }

    /// One layout pass: legend placement (with auto-padding feedback), then
    /// the injected chart-type layout over the remaining content area.
    fn perform_layout_pass(&mut self) {
        self.position_legend();

        let series_area = self.series_area();
        let Self {
            layout,
            scene,
            series,
            ..
        } = self;
        let mut ctx = LayoutContext {
            scene,
            series,
            series_area,
        };
        layout.perform_layout(&mut ctx);
        trace!(?series_area, "layout pass complete");
    }

    /// Content area left for series geometry after the configured padding
    /// and the legend auto-padding.
    #[must_use]
    pub fn series_area(&self) -> BBox {
        let left = self.padding.left + self.legend_auto_padding.left;
        let top = self.padding.top + self.legend_auto_padding.top;
        let right = self.padding.right + self.legend_auto_padding.right;
        let bottom = self.padding.bottom + self.legend_auto_padding.bottom;
        BBox::new(
            left,
            top,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }

    /// Places the legend for the current position, then feeds the measured
    /// extent along the padding axis back into `legend_auto_padding`. A
    /// changed extent re-requests layout: the content area depends on the
    /// legend size, and the legend size may depend on the space it was
    /// given.
    fn position_legend(&mut self) {
        if self.legend.data().is_empty() {
            self.legend_bbox = None;
            return;
        }
        let Some(group) = self.legend.group() else {
            return;
        };

        let width = self.width;
        let height = self.height;
        let legend_padding = self.legend_padding;
        self.scene.set_translation(group, 0.0, 0.0);

        let bbox = match self.legend_position {
            LegendPosition::Bottom => {
                self.legend
                    .perform_layout(&mut self.scene, width - legend_padding * 2.0, 0.0);
                let Some(bbox) = self.scene.bbox(group) else {
                    return;
                };
                self.scene.set_translation(
                    group,
                    (width - bbox.width) / 2.0 - bbox.x,
                    height - bbox.height - bbox.y - legend_padding,
                );
                if self.legend_auto_padding.bottom != bbox.height {
                    self.legend_auto_padding.bottom = bbox.height;
                    self.scheduler.request_layout();
                }
                bbox
            }
            LegendPosition::Top => {
                self.legend
                    .perform_layout(&mut self.scene, width - legend_padding * 2.0, 0.0);
                let Some(bbox) = self.scene.bbox(group) else {
                    return;
                };
                self.scene.set_translation(
                    group,
                    (width - bbox.width) / 2.0 - bbox.x,
                    legend_padding - bbox.y,
                );
                if self.legend_auto_padding.top != bbox.height {
                    self.legend_auto_padding.top = bbox.height;
                    self.scheduler.request_layout();
                }
                bbox
            }
            LegendPosition::Left => {
                self.legend
                    .perform_layout(&mut self.scene, 0.0, height - legend_padding * 2.0);
                let Some(bbox) = self.scene.bbox(group) else {
                    return;
                };
                self.scene.set_translation(
                    group,
                    legend_padding - bbox.x,
                    (height - bbox.height) / 2.0 - bbox.y,
                );
                if self.legend_auto_padding.left != bbox.width {
                    self.legend_auto_padding.left = bbox.width;
                    self.scheduler.request_layout();
                }
                bbox
            }
            LegendPosition::Right => {
                self.legend
                    .perform_layout(&mut self.scene, 0.0, height - legend_padding * 2.0);
                let Some(bbox) = self.scene.bbox(group) else {
                    return;
                };
                self.scene.set_translation(
                    group,
                    width - bbox.width - bbox.x - legend_padding,
                    (height - bbox.height) / 2.0 - bbox.y,
                );
                if self.legend_auto_padding.right != bbox.width {
                    self.legend_auto_padding.right = bbox.width;
                    self.scheduler.request_layout();
                }
                bbox
            }
        };

        self.legend_bbox = Some(bbox);
    }
}
