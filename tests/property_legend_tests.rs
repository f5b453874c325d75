mod common;

use common::StubSeries;
use proptest::prelude::*;
use scenechart::chart::{CartesianLayout, Chart, ChartConfig, LegendPosition};

fn position_strategy() -> impl Strategy<Value = LegendPosition> {
    prop_oneof![
        Just(LegendPosition::Top),
        Just(LegendPosition::Right),
        Just(LegendPosition::Bottom),
        Just(LegendPosition::Left),
    ]
}

proptest! {
    #[test]
    fn auto_padding_feedback_settles_for_arbitrary_legend_content(
        item_count in 0usize..24,
        label_len in 1usize..16,
        position in position_strategy(),
        width in 200.0f64..1600.0,
        height in 150.0f64..1200.0,
    ) {
        let config = ChartConfig {
            width,
            height,
            legend_position: position,
            ..ChartConfig::default()
        };
        let mut chart = Chart::new(CartesianLayout, config);
        let mut series = StubSeries::new("s");
        for index in 0..item_count {
            let item_id = format!("{:len$}", index, len = label_len);
            series = series.with_legend_item(&item_id, true);
        }
        chart.add_series(Box::new(series), None);

        chart.run_until_settled().expect("auto-padding must converge");
        prop_assert!(!chart.layout_pending());
        prop_assert!(!chart.data_pending());

        let auto = chart.legend_auto_padding();
        match chart.legend_bbox() {
            Some(bbox) => {
                let expected = match position {
                    LegendPosition::Top => (auto.top, bbox.height),
                    LegendPosition::Bottom => (auto.bottom, bbox.height),
                    LegendPosition::Left => (auto.left, bbox.width),
                    LegendPosition::Right => (auto.right, bbox.width),
                };
                prop_assert_eq!(expected.0, expected.1);
            }
            None => {
                prop_assert_eq!(item_count, 0);
                prop_assert_eq!(auto, scenechart::Padding::default());
            }
        }
    }

    #[test]
    fn legend_extent_never_exceeds_one_more_settle(
        item_count in 1usize..16,
        position in position_strategy(),
    ) {
        let mut chart = Chart::new(CartesianLayout, ChartConfig::default());
        let mut series = StubSeries::new("s");
        for index in 0..item_count {
            series = series.with_legend_item(&format!("item-{index}"), true);
        }
        chart.add_series(Box::new(series), None);
        chart.set_legend_position(position);
        chart.run_until_settled().expect("settle");

        // Settling again with unchanged content runs no further passes.
        let before = chart.scheduler_snapshot();
        chart.run_until_settled().expect("settle");
        prop_assert_eq!(chart.scheduler_snapshot(), before);
    }
}
