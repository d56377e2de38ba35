use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::ticks::{TickConstraints, TickSet, TickStrategy};
use crate::error::{ChartError, ChartResult};

/// Largest accepted label-count target.
pub const MAX_LABEL_COUNT: usize = 25;

/// Which Y axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

/// One chart axis: the configured numeric range plus its derived ticks.
///
/// Lives for the whole chart lifetime. `minimum`/`maximum` are rewritten by
/// [`Axis::calculate`] on autoscale and the tick set is overwritten on every
/// layout or draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Axis {
    pub minimum: f64,
    pub maximum: f64,
    pub inverted: bool,
    pub label_count: usize,
    pub constraints: TickConstraints,
    pub draw_bottom_edge_label: bool,
    pub draw_top_edge_label: bool,
    /// Fraction of the data span added above the data maximum.
    pub space_top_ratio: f64,
    /// Fraction of the data span added below the data minimum.
    pub space_bottom_ratio: f64,
    pub fixed_minimum: Option<f64>,
    pub fixed_maximum: Option<f64>,
    #[serde(skip)]
    ticks: TickSet,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 0.0,
            inverted: false,
            label_count: 6,
            constraints: TickConstraints::default(),
            draw_bottom_edge_label: true,
            draw_top_edge_label: true,
            space_top_ratio: 0.0,
            space_bottom_ratio: 0.0,
            fixed_minimum: None,
            fixed_maximum: None,
            ticks: TickSet::empty(),
        }
    }
}

impl Axis {
    /// Axis defaults for a value (Y) axis: 10% headroom above and below the data.
    #[must_use]
    pub fn value_axis() -> Self {
        Self {
            space_top_ratio: 0.10,
            space_bottom_ratio: 0.10,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_label_count(mut self, label_count: usize) -> Self {
        self.label_count = label_count;
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: TickConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets bottom/top edge label visibility.
    #[must_use]
    pub fn with_edge_labels(mut self, draw_bottom: bool, draw_top: bool) -> Self {
        self.draw_bottom_edge_label = draw_bottom;
        self.draw_top_edge_label = draw_top;
        self
    }

    #[must_use]
    pub fn with_fixed_bounds(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.fixed_minimum = minimum;
        self.fixed_maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.label_count > MAX_LABEL_COUNT {
            return Err(ChartError::InvalidConfig(format!(
                "axis label count must be <= {MAX_LABEL_COUNT}, got {}",
                self.label_count
            )));
        }
        if self.constraints.granularity_enabled
            && (!self.constraints.granularity.is_finite() || self.constraints.granularity <= 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "axis granularity must be finite and > 0".to_owned(),
            ));
        }
        if !self.space_top_ratio.is_finite()
            || !self.space_bottom_ratio.is_finite()
            || self.space_top_ratio < 0.0
            || self.space_bottom_ratio < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "axis spacing ratios must be finite and >= 0".to_owned(),
            ));
        }
        for (name, bound) in [("minimum", self.fixed_minimum), ("maximum", self.fixed_maximum)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(ChartError::InvalidConfig(format!(
                    "fixed axis {name} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Sets the axis range from a data extent, applying fixed bounds and spacing.
    ///
    /// A zero-width data extent is widened by one unit on each side so the
    /// axis still spans a drawable range.
    pub fn calculate(&mut self, data_min: f64, data_max: f64) {
        let mut min = self.fixed_minimum.unwrap_or(data_min);
        let mut max = self.fixed_maximum.unwrap_or(data_max);

        let mut range = (max - min).abs();
        if range == 0.0 {
            max += 1.0;
            min -= 1.0;
            range = (max - min).abs();
        }

        self.minimum = if self.fixed_minimum.is_some() {
            min
        } else {
            min - range * self.space_bottom_ratio
        };
        self.maximum = if self.fixed_maximum.is_some() {
            max
        } else {
            max + range * self.space_top_ratio
        };
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        (self.maximum - self.minimum).abs()
    }

    /// Recomputes ticks with the strategy implied by the axis constraints.
    pub fn compute_ticks(&mut self) {
        self.compute_ticks_with(TickStrategy::select(self.constraints), &[]);
    }

    pub fn compute_ticks_with(&mut self, strategy: TickStrategy, samples: &[f64]) {
        self.ticks = strategy.compute(
            self.minimum,
            self.maximum,
            self.label_count,
            self.constraints,
            samples,
        );
    }

    #[must_use]
    pub fn ticks(&self) -> &TickSet {
        &self.ticks
    }

    pub fn set_ticks(&mut self, ticks: TickSet) {
        self.ticks = ticks;
    }

    /// Slot indices whose labels are drawn, honoring edge-label visibility.
    #[must_use]
    pub fn visible_label_range(&self) -> Range<usize> {
        let count = self.ticks.len();
        let from = usize::from(!self.draw_bottom_edge_label);
        let to = if self.draw_top_edge_label {
            count
        } else {
            count.saturating_sub(1)
        };
        from..to.max(from)
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, MAX_LABEL_COUNT};

    #[test]
    fn calculate_applies_spacing_ratios() {
        let mut axis = Axis::value_axis();
        axis.calculate(0.0, 100.0);
        assert!((axis.minimum + 10.0).abs() < 1e-9);
        assert!((axis.maximum - 110.0).abs() < 1e-9);
    }

    #[test]
    fn calculate_widens_flat_data() {
        let mut axis = Axis::default();
        axis.calculate(5.0, 5.0);
        assert_eq!((axis.minimum, axis.maximum), (4.0, 6.0));
    }

    #[test]
    fn fixed_bounds_skip_spacing() {
        let mut axis = Axis {
            fixed_minimum: Some(0.0),
            ..Axis::value_axis()
        };
        axis.calculate(10.0, 20.0);
        assert_eq!(axis.minimum, 0.0);
        assert!((axis.maximum - 22.0).abs() < 1e-9);
    }

    #[test]
    fn visible_label_range_drops_hidden_edges() {
        let mut axis = Axis {
            minimum: 0.0,
            maximum: 100.0,
            label_count: 5,
            draw_bottom_edge_label: false,
            draw_top_edge_label: false,
            ..Axis::default()
        };
        axis.compute_ticks();
        assert_eq!(axis.ticks().len(), 6);
        assert_eq!(axis.visible_label_range(), 1..5);
    }

    #[test]
    fn visible_label_range_is_empty_without_ticks() {
        let axis = Axis {
            draw_bottom_edge_label: false,
            ..Axis::default()
        };
        assert!(axis.visible_label_range().is_empty());
    }

    #[test]
    fn validate_rejects_excessive_label_count() {
        let axis = Axis {
            label_count: MAX_LABEL_COUNT + 1,
            ..Axis::default()
        };
        assert!(axis.validate().is_err());
    }
}
