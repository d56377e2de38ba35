use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{AxisDependency, TickSet};

use super::AxisRole;

/// Largest precision accepted by [`AxisLabelPolicy::FixedDecimals`].
pub const MAX_LABEL_PRECISION: u8 = 12;

/// Built-in numeric label policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisLabelPolicy {
    /// Use the decimal places derived from the current tick interval.
    #[default]
    Auto,
    FixedDecimals { precision: u8 },
}

/// Caller-supplied value formatter. Receives the tick value and the decimal
/// places derived from the tick interval.
pub type AxisValueFormatterFn = Arc<dyn Fn(f64, usize) -> String + Send + Sync>;

/// Turns axis tick values into label text.
#[derive(Clone, Default)]
pub struct AxisLabelFormatter {
    policy: AxisLabelPolicy,
    suffix: String,
    custom: Option<AxisValueFormatterFn>,
}

impl fmt::Debug for AxisLabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisLabelFormatter")
            .field("policy", &self.policy)
            .field("suffix", &self.suffix)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl AxisLabelFormatter {
    #[must_use]
    pub fn new(policy: AxisLabelPolicy, suffix: impl Into<String>) -> Self {
        Self {
            policy,
            suffix: suffix.into(),
            custom: None,
        }
    }

    #[must_use]
    pub fn with_custom(mut self, custom: Option<AxisValueFormatterFn>) -> Self {
        self.custom = custom;
        self
    }

    #[must_use]
    pub fn policy(&self) -> AxisLabelPolicy {
        self.policy
    }

    #[must_use]
    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }

    #[must_use]
    pub fn format(&self, value: f64, decimal_places: usize) -> String {
        if let Some(custom) = &self.custom {
            return custom(normalize_negative_zero(value), decimal_places);
        }
        let precision = match self.policy {
            AxisLabelPolicy::Auto => decimal_places,
            AxisLabelPolicy::FixedDecimals { precision } => usize::from(precision),
        };
        let mut text = format_axis_decimal(value, precision);
        text.push_str(&self.suffix);
        text
    }

    /// Label text for tick `index`, or `None` past the end of the tick set.
    #[must_use]
    pub fn format_tick(&self, ticks: &TickSet, index: usize) -> Option<String> {
        let value = *ticks.values.get(index)?;
        Some(self.format(value, ticks.decimal_places))
    }
}

/// Formatters for the three chart axes.
#[derive(Debug, Clone, Default)]
pub struct AxisFormatters {
    pub x: AxisLabelFormatter,
    pub left: AxisLabelFormatter,
    pub right: AxisLabelFormatter,
}

impl AxisFormatters {
    #[must_use]
    pub fn get(&self, role: AxisRole) -> &AxisLabelFormatter {
        match role {
            AxisRole::X => &self.x,
            AxisRole::Left => &self.left,
            AxisRole::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, role: AxisRole) -> &mut AxisLabelFormatter {
        match role {
            AxisRole::X => &mut self.x,
            AxisRole::Left => &mut self.left,
            AxisRole::Right => &mut self.right,
        }
    }

    #[must_use]
    pub fn for_dependency(&self, axis: AxisDependency) -> &AxisLabelFormatter {
        match axis {
            AxisDependency::Left => &self.left,
            AxisDependency::Right => &self.right,
        }
    }
}

/// Fixed-precision decimal text that never renders a negative zero.
#[must_use]
pub fn format_axis_decimal(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let text = format!("{:.precision$}", normalize_negative_zero(value));
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|ch| ch == '0' || ch == '.') => {
            magnitude.to_owned()
        }
        _ => text,
    }
}

fn normalize_negative_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
