use std::sync::Arc;

use dual_axis_chart::api::{
    ActiveAxes, AxisLabelFormatter, AxisLabelSource, CombinedLabelAnchor,
    DualAxisLabelCompositor, LabelSlot, single_axis_slots,
};
use dual_axis_chart::core::{AxisDependency, DataPoint, LineSeries, TickConstraints, compute_ticks};
use dual_axis_chart::render::{Color, EstimatedTextMeasurer, TextHAlign, TextMeasurer};

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const FONT: f64 = 10.0;

fn series(axis: AxisDependency, color: Color) -> LineSeries {
    LineSeries::new("s", vec![DataPoint::new(0.0, 1.0)], axis).with_color(color)
}

#[test]
fn two_active_series_merge_into_one_slot() {
    let left_ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let right_ticks = compute_ticks(0.0, 1000.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default();
    let active = ActiveAxes::from_series(&[
        series(AxisDependency::Left, RED),
        series(AxisDependency::Right, BLUE),
    ]);

    let mut slots = Vec::new();
    DualAxisLabelCompositor::new(CombinedLabelAnchor::RightAnchored, ", ").compose(
        0..left_ticks.len(),
        AxisLabelSource { ticks: &left_ticks, formatter: &formatter },
        AxisLabelSource { ticks: &right_ticks, formatter: &formatter },
        active,
        &mut slots,
    );

    assert_eq!(slots.len(), 6);
    let slot = &slots[1];
    assert_eq!(slot.index, 1);
    assert_eq!(slot.segments.len(), 2);
    assert_eq!(slot.segments[0].text, "20, ");
    assert_eq!(slot.segments[0].color, RED);
    assert_eq!(slot.segments[1].text, "200");
    assert_eq!(slot.segments[1].color, BLUE);
}

#[test]
fn single_series_uses_its_own_axis_and_color() {
    let left_ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let right_ticks = compute_ticks(0.0, 1000.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default();

    let mut slots = Vec::new();
    DualAxisLabelCompositor::new(CombinedLabelAnchor::RightAnchored, ", ").compose(
        0..3,
        AxisLabelSource { ticks: &left_ticks, formatter: &formatter },
        AxisLabelSource { ticks: &right_ticks, formatter: &formatter },
        ActiveAxes::from_series(&[series(AxisDependency::Right, BLUE)]),
        &mut slots,
    );

    let texts: Vec<&str> = slots.iter().map(|slot| slot.segments[0].text.as_str()).collect();
    assert_eq!(texts, vec!["0", "200", "400"]);
    assert!(slots.iter().all(|slot| slot.segments.len() == 1 && slot.segments[0].color == BLUE));
}

#[test]
fn no_active_series_composes_nothing() {
    let ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default();
    let source = AxisLabelSource { ticks: &ticks, formatter: &formatter };

    let mut slots = vec![LabelSlot { index: 9, segments: Default::default() }];
    DualAxisLabelCompositor::new(CombinedLabelAnchor::LeftAnchored, ", ")
        .compose(0..ticks.len(), source, source, ActiveAxes::from_series(&[]), &mut slots);
    assert!(slots.is_empty());
}

#[test]
fn empty_formatted_text_skips_the_slot() {
    let ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default().with_custom(Some(Arc::new(|value: f64, _: usize| {
        if value == 0.0 { String::new() } else { format!("{value}") }
    })));

    let mut slots = Vec::new();
    single_axis_slots(
        0..ticks.len(),
        AxisLabelSource { ticks: &ticks, formatter: &formatter },
        RED,
        &mut slots,
    );
    assert_eq!(slots.len(), ticks.len() - 1);
    assert_eq!(slots[0].index, 1);
}

#[test]
fn right_anchored_slot_ends_at_anchor() {
    let ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let wide = compute_ticks(0.0, 1000.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default();
    let compositor = DualAxisLabelCompositor::new(CombinedLabelAnchor::RightAnchored, ", ");
    let mut slots = Vec::new();
    compositor.compose(
        1..2,
        AxisLabelSource { ticks: &ticks, formatter: &formatter },
        AxisLabelSource { ticks: &wide, formatter: &formatter },
        ActiveAxes::Dual { left_color: RED, right_color: BLUE },
        &mut slots,
    );

    let measurer = EstimatedTextMeasurer;
    let placed = compositor.place(&slots[0], 100.0, 40.0, FONT, &measurer);
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[1].text, "200");
    assert_eq!(placed[1].x, 100.0);
    assert_eq!(placed[1].h_align, TextHAlign::Right);
    assert_eq!(placed[0].text, "20, ");
    assert_eq!(placed[0].x, 100.0 - measurer.measure("200", FONT).width);
    assert_eq!(placed[0].h_align, TextHAlign::Right);
    assert!(placed.iter().all(|text| text.y == 40.0));
}

#[test]
fn left_anchored_slot_grows_rightward() {
    let ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
    let formatter = AxisLabelFormatter::default();
    let source = AxisLabelSource { ticks: &ticks, formatter: &formatter };
    let compositor = DualAxisLabelCompositor::new(CombinedLabelAnchor::LeftAnchored, " | ");
    let mut slots = Vec::new();
    compositor.compose(
        2..3,
        source,
        source,
        ActiveAxes::Dual { left_color: RED, right_color: BLUE },
        &mut slots,
    );

    let measurer = EstimatedTextMeasurer;
    let placed = compositor.place(&slots[0], 10.0, 40.0, FONT, &measurer);
    assert_eq!(placed[0].text, "40 | ");
    assert_eq!(placed[0].x, 10.0);
    assert_eq!(placed[0].h_align, TextHAlign::Left);
    assert_eq!(placed[1].x, 10.0 + measurer.measure("40 | ", FONT).width);

    let slot_width = slots[0].measured_width(&measurer, FONT);
    assert_eq!(
        slot_width,
        measurer.measure("40 | ", FONT).width + measurer.measure("40", FONT).width
    );
}

#[test]
fn third_series_does_not_change_label_colors() {
    let active = ActiveAxes::from_series(&[
        series(AxisDependency::Left, RED),
        series(AxisDependency::Right, BLUE),
        series(AxisDependency::Left, Color::rgb(0.0, 1.0, 0.0)),
    ]);
    assert_eq!(active, ActiveAxes::Dual { left_color: RED, right_color: BLUE });
}
