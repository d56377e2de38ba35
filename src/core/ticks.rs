//! Axis tick-value computation.
//!
//! Every strategy is a pure function of the numeric range and the configured
//! constraints. Degenerate input never fails: it resolves to an empty
//! [`TickSet`] which callers treat as "nothing to draw this frame".

use serde::{Deserialize, Serialize};

/// Hard cap on materialized ticks, guarding pathological interval/range ratios.
pub const MAX_TICK_COUNT: usize = 10_000;

/// Upper bound for derived decimal places.
pub const MAX_DECIMAL_PLACES: usize = 15;

/// Constraints applied while searching for a tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConstraints {
    /// Minimum interval between ticks, honored when `granularity_enabled`.
    pub granularity: f64,
    pub granularity_enabled: bool,
    /// Distribute exactly `target_count` ticks instead of searching a nice interval.
    pub force_label_count: bool,
    /// Place labels halfway between tick lines.
    pub center_labels: bool,
}

impl Default for TickConstraints {
    fn default() -> Self {
        Self {
            granularity: 1.0,
            granularity_enabled: false,
            force_label_count: false,
            center_labels: false,
        }
    }
}

/// Ordered tick values for one axis, regenerated every layout/draw cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TickSet {
    /// Tick values, strictly ascending.
    pub values: Vec<f64>,
    /// Same length as `values`; shifted by half an interval when labels are
    /// centered between ticks, identical to `values` otherwise.
    pub centered_values: Vec<f64>,
    /// Decimal places implied by `interval`, used for consistent formatting.
    pub decimal_places: usize,
    /// Distance between consecutive ticks (0 for an empty set).
    pub interval: f64,
}

impl TickSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Values labels are anchored to.
    #[must_use]
    pub fn label_values(&self, centered: bool) -> &[f64] {
        if centered {
            &self.centered_values
        } else {
            &self.values
        }
    }

    fn from_values(values: Vec<f64>, interval: f64, center_labels: bool) -> Self {
        let centered_values = if center_labels {
            let offset = interval / 2.0;
            values.iter().map(|value| value + offset).collect()
        } else {
            values.clone()
        };

        Self {
            values,
            centered_values,
            decimal_places: decimal_places_for_interval(interval),
            interval,
        }
    }
}

/// Closed set of tick strategies selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickStrategy {
    /// Power-of-ten derived interval search.
    #[default]
    NiceInterval,
    /// Exactly `target_count` ticks spread evenly over `[min, max]`.
    EvenSplit,
    /// One tick per raw sample value.
    PerSample,
}

impl TickStrategy {
    /// Picks the interval strategy implied by `constraints`.
    #[must_use]
    pub fn select(constraints: TickConstraints) -> Self {
        if constraints.force_label_count {
            Self::EvenSplit
        } else {
            Self::NiceInterval
        }
    }

    /// Computes ticks for `[min, max]`.
    ///
    /// `samples` is only read by [`TickStrategy::PerSample`].
    #[must_use]
    pub fn compute(
        self,
        min: f64,
        max: f64,
        target_count: usize,
        constraints: TickConstraints,
        samples: &[f64],
    ) -> TickSet {
        if !is_usable_range(min, max) {
            return TickSet::empty();
        }

        match self {
            Self::NiceInterval => nice_interval_ticks(min, max, target_count, constraints),
            Self::EvenSplit => even_split_ticks(min, max, target_count, constraints),
            Self::PerSample => per_sample_ticks(min, max, samples),
        }
    }
}

/// Computes ticks for `[min, max]` with the strategy selected by `constraints`.
///
/// Returns an empty set when `max <= min`, the range is not finite, or
/// `target_count == 0`.
#[must_use]
pub fn compute_ticks(
    min: f64,
    max: f64,
    target_count: usize,
    constraints: TickConstraints,
) -> TickSet {
    TickStrategy::select(constraints).compute(min, max, target_count, constraints, &[])
}

/// Rounds `number` to its leading significant digit, `0` for non-finite or zero input.
#[must_use]
pub fn round_to_next_significant(number: f64) -> f64 {
    if !number.is_finite() || number == 0.0 {
        return 0.0;
    }

    let digits = number.abs().log10().ceil();
    let magnitude = 10_f64.powi(1 - digits as i32);
    let shifted = (number * magnitude).round();
    shifted / magnitude
}

/// Smallest positive spacing between consecutive values, `0` when none exists.
#[must_use]
pub fn tick_step_hint_from_values(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let mut best = f64::INFINITY;
    for pair in values.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        if step.is_finite() && step > 0.0 {
            best = best.min(step);
        }
    }

    if best.is_finite() { best } else { 0.0 }
}

#[must_use]
pub fn decimal_places_for_interval(interval: f64) -> usize {
    if !interval.is_finite() || interval <= 0.0 || interval >= 1.0 {
        return 0;
    }
    let places = (-interval.log10()).ceil();
    (places.max(0.0) as usize).min(MAX_DECIMAL_PLACES)
}

fn is_usable_range(min: f64, max: f64) -> bool {
    let range = max - min;
    range.is_finite() && range > 0.0
}

fn normalize_zero(value: f64) -> f64 {
    // `-0.0 == 0.0`, so this folds negative zero into positive zero.
    if value == 0.0 { 0.0 } else { value }
}

fn nice_interval(range: f64, target_count: usize, constraints: TickConstraints) -> f64 {
    let mut interval = range / target_count as f64;
    if constraints.granularity_enabled
        && constraints.granularity.is_finite()
        && constraints.granularity > 0.0
    {
        interval = interval.max(constraints.granularity);
    }

    let magnitude = round_to_next_significant(10_f64.powi(interval.log10().floor() as i32));
    if magnitude > 0.0 {
        let significant_digit = (interval / magnitude).floor();
        if significant_digit > 5.0 {
            // Intervals of 6..9 magnitude units read poorly; jump to the next power of ten.
            let snapped = (10.0 * magnitude).floor();
            if snapped != 0.0 {
                interval = snapped;
            }
        }
    }

    interval
}

fn nice_interval_ticks(
    min: f64,
    max: f64,
    target_count: usize,
    constraints: TickConstraints,
) -> TickSet {
    if target_count == 0 {
        return TickSet::empty();
    }

    let interval = nice_interval(max - min, target_count, constraints);
    let mut first = (min / interval).ceil() * interval;
    if constraints.center_labels {
        first -= interval;
    } else {
        // ceil() can land one ulp below `min` after the division round trip.
        first = first.max(min);
    }
    let last = max;

    let mut count = 0usize;
    while count < MAX_TICK_COUNT && first + (count as f64) * interval <= last {
        count += 1;
    }

    if count == 0 {
        // No multiple of the snapped interval falls inside the range. A finite
        // range with a non-zero target never yields an empty set, so keep `min`.
        return TickSet::from_values(vec![normalize_zero(min)], interval, false);
    }

    let values = (0..count)
        .map(|index| normalize_zero(first + (index as f64) * interval))
        .collect();
    TickSet::from_values(values, interval, constraints.center_labels)
}

fn even_split_ticks(
    min: f64,
    max: f64,
    target_count: usize,
    constraints: TickConstraints,
) -> TickSet {
    match target_count {
        0 => TickSet::empty(),
        1 => TickSet::from_values(
            vec![normalize_zero(min)],
            max - min,
            constraints.center_labels,
        ),
        _ => {
            let count = target_count.min(MAX_TICK_COUNT);
            let interval = (max - min) / (count - 1) as f64;
            let values = (0..count)
                .map(|index| {
                    if index == count - 1 {
                        normalize_zero(max)
                    } else {
                        normalize_zero(min + (index as f64) * interval)
                    }
                })
                .collect();
            TickSet::from_values(values, interval, constraints.center_labels)
        }
    }
}

fn per_sample_ticks(min: f64, max: f64, samples: &[f64]) -> TickSet {
    let values: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|value| value.is_finite() && *value >= min && *value <= max)
        .take(MAX_TICK_COUNT)
        .map(normalize_zero)
        .collect();
    if values.is_empty() {
        return TickSet::empty();
    }

    let interval = tick_step_hint_from_values(&values);
    TickSet::from_values(values, interval, false)
}

#[cfg(test)]
mod tests {
    use super::{
        TickConstraints, TickStrategy, compute_ticks, decimal_places_for_interval, normalize_zero,
        round_to_next_significant,
    };

    fn forced() -> TickConstraints {
        TickConstraints {
            force_label_count: true,
            ..TickConstraints::default()
        }
    }

    #[test]
    fn nice_interval_snaps_to_twenty_for_zero_to_hundred() {
        let ticks = compute_ticks(0.0, 100.0, 5, TickConstraints::default());
        assert_eq!(ticks.values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks.interval, 20.0);
        assert_eq!(ticks.decimal_places, 0);
    }

    #[test]
    fn unit_range_uses_fractional_interval() {
        let ticks = compute_ticks(0.0, 1.0, 3, TickConstraints::default());
        assert_eq!(ticks.values.first().copied(), Some(0.0));
        assert!(ticks.interval <= 0.5);
        assert!(ticks.decimal_places >= 1);
    }

    #[test]
    fn large_significant_digit_jumps_to_next_power_of_ten() {
        // 70 / 10 = 7 magnitude units, snapped to 10.
        let ticks = compute_ticks(0.0, 70.0, 1, TickConstraints::default());
        assert_eq!(ticks.interval, 100.0);
        assert_eq!(ticks.values, vec![0.0]);
    }

    #[test]
    fn snap_below_one_unit_keeps_raw_interval() {
        // 0.07 would floor-snap to 0, so the raw interval survives.
        let ticks = compute_ticks(0.0, 0.07, 1, TickConstraints::default());
        assert!((ticks.interval - 0.07).abs() < 1e-12);
    }

    #[test]
    fn zero_range_yields_empty_set() {
        assert!(compute_ticks(5.0, 5.0, 3, TickConstraints::default()).is_empty());
        assert!(compute_ticks(6.0, 5.0, 3, TickConstraints::default()).is_empty());
        assert!(compute_ticks(0.0, f64::INFINITY, 3, TickConstraints::default()).is_empty());
        assert!(compute_ticks(f64::NAN, 1.0, 3, TickConstraints::default()).is_empty());
        assert!(compute_ticks(0.0, 10.0, 0, TickConstraints::default()).is_empty());
    }

    #[test]
    fn negative_zero_is_normalized() {
        assert!(normalize_zero(-0.0).is_sign_positive());

        // ceil(-0.2) is -0.0, so the first tick starts out as negative zero.
        let ticks = compute_ticks(-2.0, 10.0, 2, TickConstraints::default());
        let zero = ticks
            .values
            .iter()
            .copied()
            .find(|value| *value == 0.0)
            .expect("zero tick");
        assert!(zero.is_sign_positive());
        assert_eq!(format!("{zero}"), "0");
    }

    #[test]
    fn granularity_floors_the_interval() {
        let constraints = TickConstraints {
            granularity: 5.0,
            granularity_enabled: true,
            ..TickConstraints::default()
        };
        let ticks = compute_ticks(0.0, 10.0, 10, constraints);
        assert_eq!(ticks.values, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn forced_mode_splits_evenly() {
        let ticks = compute_ticks(0.0, 10.0, 5, forced());
        assert_eq!(ticks.values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(ticks.interval, 2.5);
    }

    #[test]
    fn forced_mode_with_single_label_emits_minimum() {
        let ticks = compute_ticks(3.0, 10.0, 1, forced());
        assert_eq!(ticks.values, vec![3.0]);
    }

    #[test]
    fn centered_mode_starts_one_interval_early() {
        let constraints = TickConstraints {
            center_labels: true,
            ..TickConstraints::default()
        };
        let ticks = compute_ticks(0.0, 100.0, 5, constraints);
        assert_eq!(ticks.values.first().copied(), Some(-20.0));
        assert_eq!(ticks.centered_values.first().copied(), Some(-10.0));
        assert_eq!(ticks.values.len(), ticks.centered_values.len());
    }

    #[test]
    fn narrow_range_can_yield_single_tick() {
        let ticks = compute_ticks(0.6, 1.0, 1, TickConstraints::default());
        assert_eq!(ticks.len(), 1);
        assert!((ticks.values[0] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn range_between_interval_multiples_keeps_minimum() {
        // 0.8 snaps to an interval of 1 and no integer lies in 6.1..6.9.
        let ticks = compute_ticks(6.1, 6.9, 1, TickConstraints::default());
        assert_eq!(ticks.values, vec![6.1]);
        assert_eq!(ticks.interval, 1.0);
    }

    #[test]
    fn per_sample_strategy_keeps_sample_positions() {
        let samples = [0.0, 1.5, 3.0, 4.0];
        let ticks =
            TickStrategy::PerSample.compute(0.0, 4.0, 0, TickConstraints::default(), &samples);
        assert_eq!(ticks.values, samples.to_vec());
        assert_eq!(ticks.interval, 1.0);
    }

    #[test]
    fn significant_rounding_matches_leading_digit() {
        assert_eq!(round_to_next_significant(0.0), 0.0);
        assert!((round_to_next_significant(100.0) - 100.0).abs() < 1e-9);
        assert!((round_to_next_significant(0.0123) - 0.01).abs() < 1e-12);
        assert_eq!(round_to_next_significant(f64::NAN), 0.0);
    }

    #[test]
    fn decimal_places_follow_interval_magnitude() {
        assert_eq!(decimal_places_for_interval(20.0), 0);
        assert_eq!(decimal_places_for_interval(0.5), 1);
        assert_eq!(decimal_places_for_interval(0.05), 2);
        assert_eq!(decimal_places_for_interval(0.0), 0);
    }
}
