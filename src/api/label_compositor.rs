use std::ops::Range;

use smallvec::SmallVec;

use crate::core::{AxisDependency, LineSeries, TickSet};
use crate::render::{Color, TextHAlign, TextMeasurer, TextPrimitive};

use super::{AxisLabelFormatter, AxisRole, CombinedLabelAnchor};

/// One colored run of label text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSegment {
    pub text: String,
    pub color: Color,
}

/// Labels sharing one vertical tick position, in left-to-right reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSlot {
    pub index: usize,
    pub segments: SmallVec<[LabelSegment; 2]>,
}

impl LabelSlot {
    /// Total measured width of every segment.
    #[must_use]
    pub fn measured_width(&self, measurer: &dyn TextMeasurer, font_size_px: f64) -> f64 {
        self.segments
            .iter()
            .map(|segment| measurer.measure(&segment.text, font_size_px).width)
            .sum()
    }
}

/// Which series drive the combined Y labels this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveAxes {
    None,
    Single {
        axis: AxisDependency,
        color: Color,
    },
    Dual {
        left_color: Color,
        right_color: Color,
    },
}

impl ActiveAxes {
    /// The first two active series decide the label colors; a single series
    /// labels with its own axis.
    #[must_use]
    pub fn from_series(active: &[LineSeries]) -> Self {
        match active {
            [] => Self::None,
            [only] => Self::Single {
                axis: only.axis,
                color: only.color,
            },
            [first, second, ..] => Self::Dual {
                left_color: first.color,
                right_color: second.color,
            },
        }
    }

    /// Axis whose ticks position the labels. A lone series is labelled at
    /// its own axis' ticks; dual labels share the anchor's slots.
    #[must_use]
    pub fn label_axis(self, anchor: AxisRole) -> AxisRole {
        match self {
            Self::Single { axis, .. } => axis.into(),
            Self::None | Self::Dual { .. } => anchor,
        }
    }
}

/// Ticks and formatter of one axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisLabelSource<'a> {
    pub ticks: &'a TickSet,
    pub formatter: &'a AxisLabelFormatter,
}

impl AxisLabelSource<'_> {
    fn text(&self, index: usize) -> Option<String> {
        self.formatter
            .format_tick(self.ticks, index)
            .filter(|text| !text.is_empty())
    }
}

/// Merges left and right axis labels that share vertical slots.
#[derive(Debug, Clone, Copy)]
pub struct DualAxisLabelCompositor<'a> {
    anchor: CombinedLabelAnchor,
    separator: &'a str,
}

impl<'a> DualAxisLabelCompositor<'a> {
    #[must_use]
    pub fn new(anchor: CombinedLabelAnchor, separator: &'a str) -> Self {
        Self { anchor, separator }
    }

    /// Builds the slots in `range`, replacing the contents of `out`.
    pub fn compose(
        &self,
        range: Range<usize>,
        left: AxisLabelSource<'_>,
        right: AxisLabelSource<'_>,
        active: ActiveAxes,
        out: &mut Vec<LabelSlot>,
    ) {
        out.clear();
        for index in range {
            let mut segments = SmallVec::new();
            match active {
                ActiveAxes::None => {}
                ActiveAxes::Single { axis, color } => {
                    let source = match axis {
                        AxisDependency::Left => left,
                        AxisDependency::Right => right,
                    };
                    if let Some(text) = source.text(index) {
                        segments.push(LabelSegment { text, color });
                    }
                }
                ActiveAxes::Dual {
                    left_color,
                    right_color,
                } => {
                    if let Some(text) = left.text(index) {
                        segments.push(LabelSegment {
                            text: format!("{text}{}", self.separator),
                            color: left_color,
                        });
                    }
                    if let Some(text) = right.text(index) {
                        segments.push(LabelSegment {
                            text,
                            color: right_color,
                        });
                    }
                }
            }
            if !segments.is_empty() {
                out.push(LabelSlot { index, segments });
            }
        }
    }

    /// Positions the segments of `slot` around `anchor_x`.
    ///
    /// Right-anchored slots are laid out from the last segment backwards so the
    /// right axis text ends exactly at the anchor.
    #[must_use]
    pub fn place(
        &self,
        slot: &LabelSlot,
        anchor_x: f64,
        baseline_y: f64,
        font_size_px: f64,
        measurer: &dyn TextMeasurer,
    ) -> SmallVec<[TextPrimitive; 2]> {
        let mut placed = SmallVec::new();
        let mut cursor = anchor_x;
        match self.anchor {
            CombinedLabelAnchor::RightAnchored => {
                for segment in slot.segments.iter().rev() {
                    placed.push(TextPrimitive::new(
                        segment.text.clone(),
                        cursor,
                        baseline_y,
                        font_size_px,
                        segment.color,
                        TextHAlign::Right,
                    ));
                    cursor -= measurer.measure(&segment.text, font_size_px).width;
                }
                placed.reverse();
            }
            CombinedLabelAnchor::LeftAnchored => {
                for segment in &slot.segments {
                    placed.push(TextPrimitive::new(
                        segment.text.clone(),
                        cursor,
                        baseline_y,
                        font_size_px,
                        segment.color,
                        TextHAlign::Left,
                    ));
                    cursor += measurer.measure(&segment.text, font_size_px).width;
                }
            }
        }
        placed
    }
}

/// Single-segment slots for an axis labelled on its own.
pub fn single_axis_slots(
    range: Range<usize>,
    source: AxisLabelSource<'_>,
    color: Color,
    out: &mut Vec<LabelSlot>,
) {
    out.clear();
    out.extend(range.filter_map(|index| {
        source.text(index).map(|text| LabelSlot {
            index,
            segments: SmallVec::from_iter([LabelSegment { text, color }]),
        })
    }));
}
