use crate::scene::{BBox, Scene};
use crate::series::Series;

/// Everything a chart-type layout step may touch: the scene, the series
/// collection, and the content area left after padding and legend
/// auto-padding are taken out.
pub struct LayoutContext<'a> {
    pub scene: &'a mut Scene,
    pub series: &'a mut [Box<dyn Series>],
    pub series_area: BBox,
}

/// Capability contract for concrete chart types.
///
/// The orchestrating [`crate::chart::Chart`] owns scheduling, legend
/// placement, and interaction; the injected layout decides how series
/// geometry fills the content area.
pub trait ChartLayout {
    fn perform_layout(&mut self, ctx: &mut LayoutContext<'_>);
}

/// Default layout: every visible series lays its geometry into the full
/// content area; hidden series get their geometry cleared.
#[derive(Debug, Default)]
pub struct CartesianLayout;

impl ChartLayout for CartesianLayout {
    fn perform_layout(&mut self, ctx: &mut LayoutContext<'_>) {
        for series in ctx.series.iter_mut() {
            if series.visible() {
                series.perform_layout(ctx.scene, ctx.series_area);
            } else if let Some(group) = series.group() {
                ctx.scene.clear_children(group);
            }
        }
    }
}
