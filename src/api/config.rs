use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisDependency, ChartOffsets, TickConstraints};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DashPattern};

use super::{AxisLabelPolicy, MAX_LABEL_PRECISION, RenderStyle};

/// Length of the elevation X tick mark straddling the axis line.
pub const ELEVATION_X_TICK_LENGTH_PX: f64 = 8.0;
/// Gap between the X axis line and the top of the X labels in the elevation preset.
pub const ELEVATION_X_LABEL_GAP_PX: f64 = 1.0;
/// Label count shared by both Y axes of the elevation preset.
pub const ELEVATION_LABEL_COUNT: usize = 3;

/// Identifies one of the three chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    X,
    Left,
    Right,
}

impl AxisRole {
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}

impl From<AxisDependency> for AxisRole {
    fn from(axis: AxisDependency) -> Self {
        match axis {
            AxisDependency::Left => Self::Left,
            AxisDependency::Right => Self::Right,
        }
    }
}

/// Which end of a combined dual-axis label is pinned to the anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombinedLabelAnchor {
    /// Right text ends at the anchor, left text grows leftward from it.
    #[default]
    RightAnchored,
    /// Left text starts at the anchor, right text grows rightward.
    LeftAnchored,
}

/// How the first/last X labels are kept from being cut at the content edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeLabelClipping {
    Disabled,
    /// Shift edge labels inward by half their width unconditionally.
    AlwaysShift,
    /// Shift edge labels only as far as needed to stay inside the content rect.
    #[default]
    ClampToBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartVariant {
    /// Line series with independent left/right value labels.
    #[default]
    Standard,
    /// Line series with combined dual-axis labels on the right edge.
    Elevation,
    /// Horizontal gradient fill with one X label per sample.
    Gradient,
}

/// Vertical marker line at a fixed X value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitLine {
    pub value: f64,
    #[serde(default = "default_limit_line_width")]
    pub line_width: f64,
    #[serde(default = "default_limit_line_color")]
    pub color: Color,
    #[serde(default)]
    pub dash: Option<DashPattern>,
    #[serde(default)]
    pub label: Option<String>,
}

impl LimitLine {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            line_width: default_limit_line_width(),
            color: default_limit_line_color(),
            dash: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "limit line value must be finite".to_owned(),
            ));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "limit line width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(dash) = self.dash {
            dash.validate()?;
        }
        self.color.validate()
    }
}

/// Per-axis drawing switches plus the axis range/tick settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub scale: Axis,
    pub enabled: bool,
    pub draw_labels: bool,
    pub draw_grid_lines: bool,
    pub draw_axis_line: bool,
    /// Draw the grid line of the lowest tick (Y axes only).
    pub draw_bottom_grid_line: bool,
    pub label_policy: AxisLabelPolicy,
    pub label_suffix: String,
    pub grid_dash: Option<DashPattern>,
    /// Horizontal label nudge away from the content edge.
    pub label_x_offset_px: f64,
    /// Vertical label nudge; pushes X labels down and Y labels below their tick.
    pub label_y_offset_px: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            scale: Axis::default(),
            enabled: true,
            draw_labels: true,
            draw_grid_lines: true,
            draw_axis_line: true,
            draw_bottom_grid_line: true,
            label_policy: AxisLabelPolicy::Auto,
            label_suffix: String::new(),
            grid_dash: None,
            label_x_offset_px: 0.0,
            label_y_offset_px: 0.0,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn value_axis() -> Self {
        Self {
            scale: Axis::value_axis(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Axis) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_label_policy(mut self, policy: AxisLabelPolicy) -> Self {
        self.label_policy = policy;
        self
    }

    #[must_use]
    pub fn with_grid_dash(mut self, dash: Option<DashPattern>) -> Self {
        self.grid_dash = dash;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.scale.validate()?;
        if let AxisLabelPolicy::FixedDecimals { precision } = self.label_policy {
            if precision > MAX_LABEL_PRECISION {
                return Err(ChartError::InvalidConfig(format!(
                    "label precision must be <= {MAX_LABEL_PRECISION}"
                )));
            }
        }
        if let Some(dash) = self.grid_dash {
            dash.validate()?;
        }
        if !self.label_x_offset_px.is_finite() || !self.label_y_offset_px.is_finite() {
            return Err(ChartError::InvalidConfig(
                "axis label offsets must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Complete chart setup. Serializable so hosts can persist and reload it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub variant: ChartVariant,
    #[serde(default)]
    pub x_axis: AxisConfig,
    #[serde(default = "AxisConfig::value_axis")]
    pub left_axis: AxisConfig,
    #[serde(default = "AxisConfig::value_axis")]
    pub right_axis: AxisConfig,
    #[serde(default)]
    pub combined_label_anchor: CombinedLabelAnchor,
    #[serde(default = "default_combined_label_separator")]
    pub combined_label_separator: String,
    #[serde(default)]
    pub edge_label_clipping: EdgeLabelClipping,
    #[serde(default = "default_true")]
    pub inset_edge_grid_lines: bool,
    /// Gap between the Y label band and the content rect.
    #[serde(default = "default_label_content_padding_px")]
    pub label_content_padding_px: f64,
    #[serde(default)]
    pub extra_offsets: ChartOffsets,
    /// How far X grid lines reach below the content bottom.
    #[serde(default)]
    pub x_grid_extension_px: f64,
    #[serde(default = "default_true")]
    pub clip_data_to_content: bool,
    #[serde(default = "default_true")]
    pub clip_values_to_content: bool,
    #[serde(default)]
    pub draw_limit_lines_behind_data: bool,
    #[serde(default)]
    pub limit_lines: Vec<LimitLine>,
    /// Value labels are drawn only while at most this many samples are visible.
    #[serde(default = "default_max_visible_value_count")]
    pub max_visible_value_count: usize,
    /// Refits the Y axes to the visible X window each frame. When off they
    /// span the whole data set.
    #[serde(default = "default_true")]
    pub auto_scale_min_max: bool,
    #[serde(default = "default_true")]
    pub show_last_series: bool,
    #[serde(default)]
    pub tick_cache_enabled: bool,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChartConfig {
    /// Line chart with independent left/right value axes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            variant: ChartVariant::Standard,
            x_axis: AxisConfig::default(),
            left_axis: AxisConfig::value_axis(),
            right_axis: AxisConfig::value_axis(),
            combined_label_anchor: CombinedLabelAnchor::default(),
            combined_label_separator: default_combined_label_separator(),
            edge_label_clipping: EdgeLabelClipping::default(),
            inset_edge_grid_lines: true,
            label_content_padding_px: default_label_content_padding_px(),
            extra_offsets: ChartOffsets::default(),
            x_grid_extension_px: 0.0,
            clip_data_to_content: true,
            clip_values_to_content: true,
            draw_limit_lines_behind_data: false,
            limit_lines: Vec::new(),
            max_visible_value_count: default_max_visible_value_count(),
            auto_scale_min_max: true,
            show_last_series: true,
            tick_cache_enabled: false,
            style: RenderStyle::default(),
        }
    }

    /// Elevation profile: three forced Y labels merged on the right edge,
    /// dashed Y grid, short X tick marks straddling the axis line.
    #[must_use]
    pub fn elevation() -> Self {
        let forced = TickConstraints {
            force_label_count: true,
            ..TickConstraints::default()
        };
        let y_scale = Axis::value_axis()
            .with_label_count(ELEVATION_LABEL_COUNT)
            .with_constraints(forced);

        Self {
            variant: ChartVariant::Elevation,
            x_axis: AxisConfig {
                label_y_offset_px: ELEVATION_X_TICK_LENGTH_PX / 2.0 + ELEVATION_X_LABEL_GAP_PX,
                ..AxisConfig::default()
            }
            .with_grid_dash(Some(DashPattern::single_segment(ELEVATION_X_TICK_LENGTH_PX))),
            left_axis: AxisConfig::default().with_scale(y_scale.clone()).disabled(),
            right_axis: AxisConfig {
                draw_axis_line: false,
                draw_bottom_grid_line: false,
                label_y_offset_px: 10.25,
                ..AxisConfig::default()
            }
            .with_scale(y_scale)
            .with_grid_dash(Some(DashPattern::new(4.0, 4.0, 0.0))),
            extra_offsets: ChartOffsets::new(16.0, 0.0, 16.0, 0.0),
            x_grid_extension_px: ELEVATION_X_TICK_LENGTH_PX,
            ..Self::standard()
        }
    }

    /// Gradient strip: content filled with the first series' colors, X labels
    /// at evenly split positions, no Y axes.
    #[must_use]
    pub fn gradient() -> Self {
        Self {
            variant: ChartVariant::Gradient,
            x_axis: AxisConfig {
                label_y_offset_px: ELEVATION_X_TICK_LENGTH_PX / 2.0 + ELEVATION_X_LABEL_GAP_PX,
                ..AxisConfig::default()
            }
            .with_grid_dash(Some(DashPattern::single_segment(ELEVATION_X_TICK_LENGTH_PX))),
            left_axis: AxisConfig::value_axis().disabled(),
            right_axis: AxisConfig::value_axis().disabled(),
            x_grid_extension_px: ELEVATION_X_TICK_LENGTH_PX,
            ..Self::standard()
        }
    }

    #[must_use]
    pub fn axis(&self, role: AxisRole) -> &AxisConfig {
        match role {
            AxisRole::X => &self.x_axis,
            AxisRole::Left => &self.left_axis,
            AxisRole::Right => &self.right_axis,
        }
    }

    pub fn axis_mut(&mut self, role: AxisRole) -> &mut AxisConfig {
        match role {
            AxisRole::X => &mut self.x_axis,
            AxisRole::Left => &mut self.left_axis,
            AxisRole::Right => &mut self.right_axis,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.x_axis.validate()?;
        self.left_axis.validate()?;
        self.right_axis.validate()?;

        if !self.extra_offsets.is_valid() {
            return Err(ChartError::InvalidConfig(
                "extra offsets must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("label_content_padding_px", self.label_content_padding_px),
            ("x_grid_extension_px", self.x_grid_extension_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for line in &self.limit_lines {
            line.validate()?;
        }
        self.style.validate()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_combined_label_separator() -> String {
    ", ".to_owned()
}

fn default_label_content_padding_px() -> f64 {
    6.0
}

fn default_max_visible_value_count() -> usize {
    10
}

fn default_limit_line_width() -> f64 {
    2.0
}

fn default_limit_line_color() -> Color {
    Color::rgb(0.93, 0.36, 0.36)
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ChartVariant, EdgeLabelClipping};

    #[test]
    fn presets_validate() {
        for config in [
            ChartConfig::standard(),
            ChartConfig::elevation(),
            ChartConfig::gradient(),
        ] {
            config.validate().expect("preset should be valid");
        }
    }

    #[test]
    fn empty_json_object_uses_defaults() {
        let config = ChartConfig::from_json_str("{}").expect("defaults");
        assert_eq!(config.variant, ChartVariant::Standard);
        assert_eq!(config.edge_label_clipping, EdgeLabelClipping::ClampToBoundary);
        assert_eq!(config.combined_label_separator, ", ");
        assert!((config.left_axis.scale.space_top_ratio - 0.1).abs() < 1e-12);
    }

    #[test]
    fn negative_padding_is_rejected() {
        let config = ChartConfig {
            label_content_padding_px: -1.0,
            ..ChartConfig::standard()
        };
        assert!(config.validate().is_err());
    }
}
