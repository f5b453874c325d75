mod common;

use approx::assert_abs_diff_eq;
use common::StubSeries;
use scenechart::chart::{CartesianLayout, Chart, ChartConfig, LegendPosition, Padding};
use scenechart::legend::Orientation;

fn chart_with_legend_items(items: usize, config: ChartConfig) -> Chart<CartesianLayout> {
    let mut chart = Chart::new(CartesianLayout, config);
    let mut series = StubSeries::new("s");
    for index in 0..items {
        series = series.with_legend_item(&format!("item-{index}"), true);
    }
    chart.add_series(Box::new(series), None);
    chart.run_until_settled().expect("settle");
    chart
}

#[test]
fn right_position_anchors_legend_at_right_edge_centered_vertically() {
    let config = ChartConfig {
        width: 400.0,
        height: 300.0,
        legend_padding: 20.0,
        ..ChartConfig::default()
    };
    let chart = chart_with_legend_items(3, config);

    let bbox = chart.legend_bbox().expect("legend measured");
    let group = chart.legend().group().expect("legend attached");
    let (tx, ty) = chart.scene().translation(group);

    assert_abs_diff_eq!(tx, 400.0 - bbox.width - bbox.x - 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ty, (300.0 - bbox.height) / 2.0 - bbox.y, epsilon = 1e-9);
    assert_eq!(chart.legend().orientation(), Orientation::Vertical);
}

#[test]
fn bottom_position_centers_horizontally_with_gap_from_chart_bottom() {
    let config = ChartConfig {
        width: 500.0,
        height: 400.0,
        legend_position: LegendPosition::Bottom,
        legend_padding: 15.0,
        ..ChartConfig::default()
    };
    let chart = chart_with_legend_items(2, config);

    let bbox = chart.legend_bbox().expect("legend measured");
    let group = chart.legend().group().expect("legend attached");
    let (tx, ty) = chart.scene().translation(group);

    assert_abs_diff_eq!(tx, (500.0 - bbox.width) / 2.0 - bbox.x, epsilon = 1e-9);
    assert_abs_diff_eq!(ty, 400.0 - bbox.height - bbox.y - 15.0, epsilon = 1e-9);
    assert_eq!(chart.legend().orientation(), Orientation::Horizontal);
}

#[test]
fn top_and_left_positions_use_the_padding_gap_from_their_edge() {
    let mut chart = chart_with_legend_items(
        2,
        ChartConfig {
            legend_position: LegendPosition::Top,
            ..ChartConfig::default()
        },
    );
    let bbox = chart.legend_bbox().expect("measured");
    let group = chart.legend().group().expect("attached");
    let (_, ty) = chart.scene().translation(group);
    assert_abs_diff_eq!(ty, chart.legend_padding() - bbox.y, epsilon = 1e-9);

    chart.set_legend_position(LegendPosition::Left);
    chart.run_until_settled().expect("settle");
    let bbox = chart.legend_bbox().expect("measured");
    let (tx, _) = chart.scene().translation(group);
    assert_abs_diff_eq!(tx, chart.legend_padding() - bbox.x, epsilon = 1e-9);
}

#[test]
fn auto_padding_records_measured_extent_and_converges() {
    let chart = chart_with_legend_items(3, ChartConfig::default());

    let bbox = chart.legend_bbox().expect("measured");
    let auto = chart.legend_auto_padding();
    assert_abs_diff_eq!(auto.right, bbox.width, epsilon = 1e-9);
    assert_eq!(auto.left, 0.0);
    assert_eq!(auto.top, 0.0);
    assert_eq!(auto.bottom, 0.0);

    // First pass placed and measured, second pass observed a stable size.
    assert_eq!(chart.scheduler_snapshot().layout_passes, 2);
    assert!(!chart.layout_pending());
}

#[test]
fn series_area_shrinks_by_padding_and_legend_auto_padding() {
    let config = ChartConfig {
        width: 400.0,
        height: 300.0,
        padding: Padding::uniform(10.0),
        ..ChartConfig::default()
    };
    let chart = chart_with_legend_items(1, config);

    let auto = chart.legend_auto_padding();
    let area = chart.series_area();
    assert_abs_diff_eq!(area.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.y, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.width, 400.0 - 20.0 - auto.right, epsilon = 1e-9);
    assert_abs_diff_eq!(area.height, 300.0 - 20.0, epsilon = 1e-9);
}

#[test]
fn changing_position_resets_auto_padding_before_the_next_layout() {
    let mut chart = chart_with_legend_items(2, ChartConfig::default());
    assert!(chart.legend_auto_padding().right > 0.0);

    chart.set_legend_position(LegendPosition::Bottom);
    let auto = chart.legend_auto_padding();
    assert_eq!(auto.right, 0.0);
    assert_eq!(auto.bottom, 0.0);

    chart.run_until_settled().expect("settle");
    let auto = chart.legend_auto_padding();
    assert!(auto.bottom > 0.0);
    assert_eq!(auto.right, 0.0);
}

#[test]
fn setting_the_same_position_again_schedules_nothing() {
    let mut chart = chart_with_legend_items(2, ChartConfig::default());
    chart.set_legend_position(LegendPosition::Right);
    assert!(!chart.layout_pending());
}

#[test]
fn empty_legend_skips_placement_entirely() {
    let mut chart = Chart::new(CartesianLayout, ChartConfig::default());
    chart.add_series(
        Box::new(StubSeries::new("s").with_show_in_legend(false)),
        None,
    );
    chart.run_until_settled().expect("settle");

    assert!(chart.legend_bbox().is_none());
    assert_eq!(chart.legend_auto_padding(), Padding::default());
}

#[test]
fn legend_entries_follow_series_insertion_order_then_item_order() {
    let mut chart = Chart::new(CartesianLayout, ChartConfig::default());
    chart.add_series(
        Box::new(
            StubSeries::new("first")
                .with_legend_item("a", true)
                .with_legend_item("b", true),
        ),
        None,
    );
    chart.add_series(
        Box::new(StubSeries::new("second").with_legend_item("c", true)),
        None,
    );
    chart.run_until_settled().expect("settle");

    let ids: Vec<(&str, &str)> = chart
        .legend()
        .data()
        .iter()
        .map(|datum| (datum.series_id.as_str(), datum.item_id.as_str()))
        .collect();
    assert_eq!(
        ids,
        vec![("first", "a"), ("first", "b"), ("second", "c")]
    );
}
