//! Legend: a self-contained layout unit over the aggregated per-series
//! legend entries.
//!
//! The legend owns one scene group and rebuilds its marker/label shapes on
//! every `perform_layout` call. Layout-affecting mutations raise an internal
//! change flag the owning chart polls and converts into a layout request.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::render::Color;
use crate::scene::{BBox, Geometry, NodeId, Scene, Shape};

/// Flow direction of legend items, derived from the legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One toggleable, labeled legend entry contributed by a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendDatum {
    /// Id of the contributing series.
    pub series_id: String,
    /// Sub-item within the series, e.g. one value key or category.
    pub item_id: String,
    pub label: String,
    pub enabled: bool,
    pub marker_fill: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    pub marker_size: f64,
    pub marker_label_gap: f64,
    /// Gap between items along the flow axis.
    pub item_spacing: f64,
    /// Gap between wrapped rows (horizontal) or columns (vertical).
    pub line_spacing: f64,
    pub label_font_px: f64,
    pub disabled_alpha: f64,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            marker_size: 14.0,
            marker_label_gap: 6.0,
            item_spacing: 16.0,
            line_spacing: 8.0,
            label_font_px: 12.0,
            disabled_alpha: 0.25,
        }
    }
}

const LABEL_FILL: Color = Color::rgb(0.2, 0.2, 0.2);

/// Average glyph width as a fraction of the font size. Labels are measured
/// with this heuristic; no text backend is involved.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

fn estimate_label_width(label: &str, font_px: f64) -> f64 {
    label.chars().count() as f64 * font_px * GLYPH_WIDTH_FACTOR
}

#[derive(Debug)]
pub struct Legend {
    data: Vec<LegendDatum>,
    orientation: Orientation,
    style: LegendStyle,
    group: Option<NodeId>,
    item_rects: Vec<BBox>,
    layout_change: bool,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Legend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            orientation: Orientation::Vertical,
            style: LegendStyle::default(),
            group: None,
            item_rects: Vec::new(),
            layout_change: false,
        }
    }

    /// Creates the legend's scene group under `parent`. Called once by the
    /// owning chart.
    pub fn attach(&mut self, scene: &mut Scene, parent: NodeId) {
        let group = scene.create_group();
        scene.append(parent, group);
        self.group = Some(group);
    }

    #[must_use]
    pub fn group(&self) -> Option<NodeId> {
        self.group
    }

    #[must_use]
    pub fn data(&self) -> &[LegendDatum] {
        &self.data
    }

    /// Replaces the legend entries wholesale; stale entries are discarded,
    /// never patched.
    pub fn set_data(&mut self, data: Vec<LegendDatum>) {
        self.data = data;
        self.layout_change = true;
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.layout_change = true;
        }
    }

    #[must_use]
    pub fn style(&self) -> LegendStyle {
        self.style
    }

    pub fn set_style(&mut self, style: LegendStyle) {
        if self.style != style {
            self.style = style;
            self.layout_change = true;
        }
    }

    /// Absorbs the pending layout-change notification, if any.
    pub fn take_layout_change(&mut self) -> bool {
        std::mem::take(&mut self.layout_change)
    }

    /// Rebuilds item geometry under the legend group.
    ///
    /// A positive `available_width` wraps horizontal flow into rows; a
    /// positive `available_height` wraps vertical flow into columns. Zero
    /// means unconstrained along that axis.
    pub fn perform_layout(&mut self, scene: &mut Scene, available_width: f64, available_height: f64) {
        let Some(group) = self.group else {
            return;
        };
        scene.clear_children(group);
        self.item_rects.clear();

        let style = self.style;
        let item_height = style.marker_size.max(style.label_font_px);
        let item_widths: Vec<f64> = self
            .data
            .iter()
            .map(|datum| {
                style.marker_size
                    + style.marker_label_gap
                    + estimate_label_width(&datum.label, style.label_font_px)
            })
            .collect();
        // Vertical flow stacks items into uniform-width columns.
        let column_width = item_widths.iter().copied().fold(0.0, f64::max);

        let mut cursor_x = 0.0;
        let mut cursor_y = 0.0;
        for (index, datum) in self.data.iter().enumerate() {
            let item_width = item_widths[index];
            match self.orientation {
                Orientation::Horizontal => {
                    if available_width > 0.0
                        && cursor_x > 0.0
                        && cursor_x + item_width > available_width
                    {
                        cursor_x = 0.0;
                        cursor_y += item_height + style.line_spacing;
                    }
                }
                Orientation::Vertical => {
                    if available_height > 0.0
                        && cursor_y > 0.0
                        && cursor_y + item_height > available_height
                    {
                        cursor_y = 0.0;
                        cursor_x += column_width + style.line_spacing;
                    }
                }
            }

            let alpha = if datum.enabled {
                1.0
            } else {
                style.disabled_alpha
            };
            let item_group = scene.create_group();
            scene.append(group, item_group);
            scene.set_translation(item_group, cursor_x, cursor_y);

            let marker = scene.create_shape(Shape::new(
                Geometry::Rect {
                    x: 0.0,
                    y: (item_height - style.marker_size) / 2.0,
                    width: style.marker_size,
                    height: style.marker_size,
                },
                datum.marker_fill.with_alpha(alpha),
            ));
            scene.append(item_group, marker);

            let label_width = estimate_label_width(&datum.label, style.label_font_px);
            let label = scene.create_shape(Shape::new(
                Geometry::Rect {
                    x: style.marker_size + style.marker_label_gap,
                    y: (item_height - style.label_font_px) / 2.0,
                    width: label_width,
                    height: style.label_font_px,
                },
                LABEL_FILL.with_alpha(alpha),
            ));
            scene.append(item_group, label);

            self.item_rects
                .push(BBox::new(cursor_x, cursor_y, item_width, item_height));

            match self.orientation {
                Orientation::Horizontal => cursor_x += item_width + style.item_spacing,
                Orientation::Vertical => cursor_y += item_height + style.item_spacing,
            }
        }

        trace!(
            items = self.data.len(),
            ?available_width,
            ?available_height,
            "legend layout rebuilt"
        );
    }

    /// Legend entry whose laid-out item rectangle contains the point, used
    /// for click hit-testing. Coordinates are in chart space.
    #[must_use]
    pub fn datum_for_point(&self, scene: &Scene, x: f64, y: f64) -> Option<&LegendDatum> {
        let group = self.group?;
        let (gx, gy) = scene.translation(group);
        let local_x = x - gx;
        let local_y = y - gy;
        self.item_rects
            .iter()
            .position(|rect| rect.contains_point(local_x, local_y))
            .and_then(|index| self.data.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::{Legend, LegendDatum, Orientation};
    use crate::render::Color;
    use crate::scene::Scene;

    fn datum(label: &str) -> LegendDatum {
        LegendDatum {
            series_id: "s".to_owned(),
            item_id: label.to_owned(),
            label: label.to_owned(),
            enabled: true,
            marker_fill: Color::rgb(0.1, 0.4, 0.8),
        }
    }

    #[test]
    fn vertical_flow_stacks_items_downward() {
        let mut scene = Scene::new();
        let mut legend = Legend::new();
        let root = scene.root();
        legend.attach(&mut scene, root);
        legend.set_data(vec![datum("one"), datum("two"), datum("three")]);

        legend.perform_layout(&mut scene, 0.0, 0.0);

        let bbox = scene.bbox(legend.group().expect("attached")).expect("bbox");
        let item_height = legend.style().marker_size;
        assert!(bbox.height > item_height * 2.0);
    }

    #[test]
    fn horizontal_flow_wraps_at_available_width() {
        let mut scene = Scene::new();
        let mut legend = Legend::new();
        let root = scene.root();
        legend.attach(&mut scene, root);
        legend.set_orientation(Orientation::Horizontal);
        legend.set_data(vec![datum("alpha"), datum("beta"), datum("gamma")]);

        legend.perform_layout(&mut scene, 80.0, 0.0);
        let wrapped = scene.bbox(legend.group().expect("attached")).expect("bbox");

        legend.perform_layout(&mut scene, 0.0, 0.0);
        let unconstrained = scene.bbox(legend.group().expect("attached")).expect("bbox");

        assert!(wrapped.height > unconstrained.height);
        assert!(wrapped.width < unconstrained.width);
    }

    #[test]
    fn datum_for_point_respects_group_translation() {
        let mut scene = Scene::new();
        let mut legend = Legend::new();
        let root = scene.root();
        legend.attach(&mut scene, root);
        legend.set_data(vec![datum("hit")]);
        legend.perform_layout(&mut scene, 0.0, 0.0);

        let group = legend.group().expect("attached");
        scene.set_translation(group, 100.0, 50.0);

        assert!(legend.datum_for_point(&scene, 102.0, 55.0).is_some());
        assert!(legend.datum_for_point(&scene, 2.0, 5.0).is_none());
    }

    #[test]
    fn mutations_raise_layout_change_once() {
        let mut legend = Legend::new();
        assert!(!legend.take_layout_change());

        legend.set_data(Vec::new());
        assert!(legend.take_layout_change());
        assert!(!legend.take_layout_change());

        legend.set_orientation(Orientation::Vertical); // unchanged
        assert!(!legend.take_layout_change());
        legend.set_orientation(Orientation::Horizontal);
        assert!(legend.take_layout_change());
    }
}
