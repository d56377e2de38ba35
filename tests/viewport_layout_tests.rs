use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use dual_axis_chart::api::{AxisRole, ChartConfig, ChartEngine};
use dual_axis_chart::core::{AxisDependency, ChartOffsets, DataPoint, LineData, LineSeries, Viewport};
use dual_axis_chart::render::{EstimatedTextMeasurer, NullRenderer, TextMeasurer, TextMetrics};
use dual_axis_chart::ChartError;

#[derive(Debug, Clone, Default)]
struct CountingMeasurer {
    calls: Rc<Cell<usize>>,
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextMetrics {
        self.calls.set(self.calls.get() + 1);
        EstimatedTextMeasurer.measure(text, font_size_px)
    }
}

fn series(label: &str, axis: AxisDependency, scale: f64) -> LineSeries {
    let points = (0..=10)
        .map(|i| DataPoint::new(f64::from(i), scale * f64::from(i * i)))
        .collect();
    LineSeries::new(label, points, axis)
}

fn engine(config: ChartConfig, measurer: CountingMeasurer) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config)
        .expect("engine init")
        .with_text_measurer(measurer);
    engine.set_data(LineData::new(vec![series("a", AxisDependency::Left, 1.0)]));
    engine
        .on_size_changed(Viewport::new(400, 300))
        .expect("size");
    engine
}

#[test]
fn repeated_layout_reuses_cached_rect_without_measuring() {
    let measurer = CountingMeasurer::default();
    let mut engine = engine(ChartConfig::standard(), measurer.clone());

    let first = engine.layout_viewport().expect("layout");
    let calls = measurer.calls.get();
    assert!(calls > 0);

    let second = engine.layout_viewport().expect("layout");
    assert_eq!(first, second);
    assert_eq!(measurer.calls.get(), calls);
    assert_eq!(engine.layout_measure_passes(), 1);
}

#[test]
fn data_set_count_and_visibility_changes_relayout() {
    let mut engine = engine(ChartConfig::standard(), CountingMeasurer::default());
    engine.layout_viewport().expect("layout");

    engine.push_series(series("b", AxisDependency::Right, 100.0));
    engine.layout_viewport().expect("layout");
    assert_eq!(engine.layout_measure_passes(), 2);

    engine.set_show_last_series(false);
    engine.layout_viewport().expect("layout");
    assert_eq!(engine.layout_measure_passes(), 3);

    engine
        .on_size_changed(Viewport::new(500, 300))
        .expect("resize");
    let resized = engine.layout_viewport().expect("layout");
    assert_eq!(engine.layout_measure_passes(), 4);
    assert_eq!(resized.chart_height, 300.0);
}

#[test]
fn appending_a_sample_keeps_the_cached_layout() {
    let mut engine = engine(ChartConfig::standard(), CountingMeasurer::default());
    let before = engine.layout_viewport().expect("layout");
    engine
        .update_point(0, DataPoint::new(11.0, 5_000.0))
        .expect("append");
    assert_eq!(engine.layout_viewport().expect("layout"), before);
    assert_eq!(engine.layout_measure_passes(), 1);
}

#[test]
fn longer_labels_never_shrink_the_margin() {
    let mut engine = engine(ChartConfig::standard(), CountingMeasurer::default());
    let short = engine.layout_viewport().expect("layout");

    engine.set_axis_value_formatter(
        AxisRole::Left,
        Arc::new(|value: f64, decimals: usize| format!("{value:.decimals$} metres")),
    );
    let long = engine.layout_viewport().expect("layout");

    assert!(long.left_label_band_px > short.left_label_band_px);
    assert!(long.content.left > short.content.left);
    assert_eq!(long.content.right, short.content.right);
}

#[test]
fn independent_margin_matches_widest_left_label() {
    let config = ChartConfig {
        right_axis: ChartConfig::standard().right_axis.disabled(),
        ..ChartConfig::standard()
    };
    let mut engine = engine(config, CountingMeasurer::default());
    let layout = engine.layout_viewport().expect("layout");

    let axis = &engine.axes().left;
    let formatter = engine.formatter(AxisRole::Left);
    let widest = axis
        .visible_label_range()
        .filter_map(|index| formatter.format_tick(axis.ticks(), index))
        .map(|text| EstimatedTextMeasurer.measure(&text, 10.0).width)
        .fold(0.0, f64::max);

    assert_eq!(layout.left_label_band_px, widest + 6.0);
    assert_eq!(layout.right_label_band_px, 0.0);
    assert_eq!(layout.content.left, widest + 6.0);
    assert_eq!(layout.content.right, 400.0);
    assert_eq!(layout.content.bottom, 300.0 - layout.x_label_band_px);
}

#[test]
fn combined_margin_measures_both_strings_and_separator() {
    let mut engine = engine(ChartConfig::elevation(), CountingMeasurer::default());
    engine.push_series(series("b", AxisDependency::Right, 100.0));
    let layout = engine.layout_viewport().expect("layout");

    let axes = engine.axes();
    let left = engine.formatter(AxisRole::Left);
    let right = engine.formatter(AxisRole::Right);
    let widest = axes
        .right
        .visible_label_range()
        .map(|index| {
            let left_text = format!("{}, ", left.format_tick(axes.left.ticks(), index).expect("left"));
            let right_text = right.format_tick(axes.right.ticks(), index).expect("right");
            EstimatedTextMeasurer.measure(&left_text, 10.0).width
                + EstimatedTextMeasurer.measure(&right_text, 10.0).width
        })
        .fold(0.0, f64::max);

    assert_eq!(layout.left_label_band_px, 0.0);
    assert_eq!(layout.right_label_band_px, widest + 6.0);
    assert_eq!(layout.content.left, 16.0);
    assert_eq!(layout.content.right, 400.0 - 16.0 - (widest + 6.0));
}

#[test]
fn layout_requires_a_sized_surface() {
    let mut engine = ChartEngine::new(NullRenderer::default(), ChartConfig::standard())
        .expect("engine init");
    assert!(matches!(
        engine.layout_viewport(),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn offsets_larger_than_the_surface_are_rejected() {
    let config = ChartConfig {
        extra_offsets: ChartOffsets::new(30.0, 30.0, 30.0, 30.0),
        ..ChartConfig::standard()
    };
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .on_size_changed(Viewport::new(50, 50))
        .expect("size");
    assert!(matches!(
        engine.layout_viewport(),
        Err(ChartError::InvalidViewport { .. })
    ));
}
