use std::cell::RefCell;
use std::rc::Rc;

use dual_axis_chart::api::{AxisLabelPolicy, AxisRole, ChartConfig, ChartEngine, ChartLayout};
use dual_axis_chart::core::{AxisDependency, DataPoint, LineData, LineSeries, Viewport};
use dual_axis_chart::render::NullRenderer;
use dual_axis_chart::ChartError;

fn sample_series(axis: AxisDependency) -> LineSeries {
    let points = (0..20)
        .map(|i| DataPoint::new(f64::from(i), f64::from(i).sin() * 50.0))
        .collect();
    LineSeries::new("sine", points, axis)
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(NullRenderer::default(), ChartConfig::standard()).expect("engine init")
}

#[test]
fn layout_jobs_wait_for_surface_size_then_run_once_in_order() {
    let mut engine = engine();
    let seen: Rc<RefCell<Vec<(usize, ChartLayout)>>> = Rc::default();
    for id in 0..3 {
        let seen = Rc::clone(&seen);
        engine
            .post_layout_job(move |layout| seen.borrow_mut().push((id, layout)))
            .expect("post");
    }
    assert_eq!(engine.pending_layout_jobs(), 3);
    assert!(seen.borrow().is_empty());

    engine
        .on_size_changed(Viewport::new(320, 240))
        .expect("size");
    assert_eq!(engine.pending_layout_jobs(), 0);
    let ids: Vec<usize> = seen.borrow().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(seen.borrow().iter().all(|(_, layout)| layout.chart_height == 240.0));

    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("resize");
    assert_eq!(seen.borrow().len(), 3, "flushed jobs never run twice");

    let immediate = Rc::clone(&seen);
    engine
        .post_layout_job(move |layout| immediate.borrow_mut().push((9, layout)))
        .expect("post");
    assert_eq!(seen.borrow().len(), 4);
    assert_eq!(engine.pending_layout_jobs(), 0);
}

#[test]
fn render_without_data_is_a_silent_no_op() {
    let mut engine = engine();
    engine
        .on_size_changed(Viewport::new(320, 240))
        .expect("size");
    engine.render().expect("render");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 0);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn render_records_series_and_labels() {
    let mut engine = engine();
    engine.set_data(LineData::new(vec![
        sample_series(AxisDependency::Left),
        sample_series(AxisDependency::Right),
    ]));
    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("size");
    engine.render().expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.last_path_count, 2);
    assert!(renderer.last_text_count > 0);
    assert!(renderer.last_line_count > 0);
}

#[test]
fn hiding_last_series_drops_its_path() {
    let mut engine = engine();
    engine.push_series(sample_series(AxisDependency::Left));
    engine.push_series(sample_series(AxisDependency::Right));
    engine.set_show_last_series(false);
    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("size");

    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.paths().count(), 1);
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut engine = engine();
    assert!(matches!(
        engine.on_size_changed(Viewport::new(0, 100)),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(engine.set_visible_x_range(Some((5.0, 1.0))).is_err());
    assert!(engine.set_visible_x_range(Some((0.0, f64::NAN))).is_err());
    assert!(matches!(
        engine.update_point(3, DataPoint::new(0.0, 0.0)),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        engine.set_axis_label_policy(AxisRole::Left, AxisLabelPolicy::FixedDecimals { precision: 40 }),
        Err(ChartError::InvalidConfig(_))
    ));
    assert_eq!(
        engine.formatter(AxisRole::Left).policy(),
        AxisLabelPolicy::Auto,
        "rejected policy is rolled back"
    );
}

#[test]
fn visible_range_drives_x_axis_autoscale() {
    let mut engine = engine();
    engine.set_data(LineData::new(vec![sample_series(AxisDependency::Left)]));
    engine.set_visible_x_range(Some((5.0, 10.0))).expect("range");
    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("size");
    engine.build_render_frame().expect("frame");

    let x = &engine.axes().x;
    assert_eq!((x.minimum, x.maximum), (5.0, 10.0));
    assert!(x.ticks().values.iter().all(|value| (5.0..=10.0).contains(value)));
}

#[test]
fn fixed_scaling_fits_axes_to_the_whole_data_set() {
    let mut config = ChartConfig::standard();
    config.auto_scale_min_max = false;
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let series = sample_series(AxisDependency::Left);
    let (data_min, data_max) = series
        .points()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), point| {
            (lo.min(point.y), hi.max(point.y))
        });
    engine.set_data(LineData::new(vec![series]));
    engine
        .on_size_changed(Viewport::new(400, 300))
        .expect("size");

    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.paths().count() > 0);
    let x = &engine.axes().x;
    assert_eq!((x.minimum, x.maximum), (0.0, 19.0));
    let full = (engine.axes().left.minimum, engine.axes().left.maximum);
    assert!(full.0 <= data_min && full.1 >= data_max);

    engine.set_visible_x_range(Some((0.0, 2.0))).expect("range");
    engine.build_render_frame().expect("frame");
    let left = &engine.axes().left;
    assert_eq!((left.minimum, left.maximum), full, "y axis ignores the window");
    assert_eq!((engine.axes().x.minimum, engine.axes().x.maximum), (0.0, 2.0));
}

#[test]
fn tick_cache_skips_recomputation_for_unchanged_axes() {
    let config = ChartConfig {
        tick_cache_enabled: true,
        ..ChartConfig::standard()
    };
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(LineData::new(vec![sample_series(AxisDependency::Left)]));
    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("size");

    let first = engine.build_render_frame().expect("frame");
    let hits_after_first = engine.tick_cache_hits();
    assert!(hits_after_first >= 3);

    let second = engine.build_render_frame().expect("frame");
    assert_eq!(engine.tick_cache_hits(), hits_after_first + 3);
    assert_eq!(first, second);
}

#[test]
fn set_config_switches_variant_and_relayouts() {
    let mut engine = engine();
    engine.set_data(LineData::new(vec![sample_series(AxisDependency::Left)]));
    engine
        .on_size_changed(Viewport::new(640, 480))
        .expect("size");
    let standard = engine.layout_viewport().expect("layout");

    engine
        .set_config(ChartConfig::gradient())
        .expect("gradient config");
    let gradient = engine.layout_viewport().expect("layout");

    assert_eq!(gradient.left_label_band_px, 0.0);
    assert_eq!(gradient.right_label_band_px, 0.0);
    assert!(gradient.content.width() > standard.content.width());
    assert_eq!(engine.layout_measure_passes(), 2);
}
