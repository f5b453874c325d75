mod common;

use common::StubSeries;
use scenechart::chart::{CartesianLayout, Chart, ChartConfig};
use serde_json::json;

fn empty_chart() -> Chart<CartesianLayout> {
    let mut chart = Chart::new(CartesianLayout, ChartConfig::default());
    chart.run_until_settled().expect("initial settle");
    chart
}

#[test]
fn construction_leaves_one_initial_layout_pending() {
    let mut chart = Chart::new(CartesianLayout, ChartConfig::default());
    assert!(chart.layout_pending());
    assert!(!chart.data_pending());

    chart.run_until_settled().expect("settle");
    assert_eq!(chart.scheduler_snapshot().layout_passes, 1);
}

#[test]
fn size_mutations_within_one_batch_coalesce_into_one_layout_pass() {
    let mut chart = empty_chart();
    let before = chart.scheduler_snapshot().layout_passes;

    chart.set_width(1024.0);
    chart.set_height(768.0);
    chart.set_width(640.0);
    chart.set_padding(scenechart::Padding::uniform(10.0));
    chart.run_until_settled().expect("settle");

    assert_eq!(chart.scheduler_snapshot().layout_passes, before + 1);
}

#[test]
fn layout_tick_without_pending_request_does_nothing() {
    let mut chart = empty_chart();
    let before = chart.scheduler_snapshot();
    assert!(!chart.run_layout_tick());
    assert_eq!(chart.scheduler_snapshot(), before);
}

#[test]
fn data_request_suppresses_layout_scheduling_until_the_data_pass_runs() {
    let mut chart = empty_chart();
    chart.add_series(Box::new(StubSeries::new("s")), None);
    assert!(chart.data_pending());

    // Layout-dirtying mutations are absorbed into the upcoming data pass.
    chart.set_width(500.0);
    chart.set_height(400.0);
    assert!(!chart.layout_pending());

    assert!(chart.run_data_tick());
    // The data pass itself scheduled the layout.
    assert!(chart.layout_pending());
    assert!(chart.run_layout_tick());
}

#[test]
fn data_pass_runs_strictly_before_the_layout_pass_it_implies() {
    let mut chart = empty_chart();
    let series = StubSeries::new("s").with_rect(0.0, 0.0, 10.0, 10.0, scenechart::render::Color::rgb(0.5, 0.2, 0.2));
    let stats = series.stats();
    chart.add_series(Box::new(series), None);
    chart.set_data(vec![json!({"v": 1})]);

    // A layout tick fired before the data tick must not run a layout pass.
    assert!(!chart.run_layout_tick());
    assert_eq!(stats.layout_calls.get(), 0);

    assert!(chart.run_data_tick());
    assert_eq!(stats.process_calls.get(), 1);
    assert_eq!(stats.layout_calls.get(), 0);

    assert!(chart.run_layout_tick());
    assert_eq!(stats.layout_calls.get(), 1);
}

#[test]
fn re_requesting_data_while_pending_is_absorbed() {
    let mut chart = empty_chart();
    let series = StubSeries::new("s");
    let stats = series.stats();
    chart.add_series(Box::new(series), None);

    chart.set_data(vec![json!({"v": 1})]);
    chart.set_data(vec![json!({"v": 2})]);
    chart.set_data(vec![json!({"v": 3})]);
    chart.run_until_settled().expect("settle");

    assert_eq!(stats.process_calls.get(), 1);
    assert_eq!(stats.rows_seen.get(), 1);
}

#[test]
fn destroy_cancels_pending_work_and_is_idempotent() {
    let mut chart = empty_chart();
    chart.add_series(Box::new(StubSeries::new("s")), None);
    chart.set_width(999.0);
    assert!(chart.data_pending());

    chart.destroy();
    assert!(!chart.data_pending());
    assert!(!chart.layout_pending());
    assert!(!chart.tooltip().is_attached());

    chart.destroy();
    assert!(chart.is_destroyed());

    let before = chart.scheduler_snapshot();
    chart.run_until_settled().expect("settle after destroy is a no-op");
    assert_eq!(chart.scheduler_snapshot(), before);
}

#[test]
fn invisible_series_skips_data_processing_but_keeps_legend_entries() {
    let mut chart = empty_chart();
    let series = StubSeries::new("hidden")
        .with_visible(false)
        .with_legend_item("hidden", true);
    let stats = series.stats();
    chart.add_series(Box::new(series), None);
    chart.run_until_settled().expect("settle");

    assert_eq!(stats.process_calls.get(), 0);
    assert_eq!(chart.legend().data().len(), 1);
}
