use crate::error::ChartResult;
use crate::render::Renderer;

use super::{AxisLabelPolicy, AxisRole, AxisValueFormatterFn, ChartEngine};

impl<R: Renderer> ChartEngine<R> {
    /// Overrides label text for one axis. Label widths are re-measured on the
    /// next layout.
    pub fn set_axis_value_formatter(&mut self, role: AxisRole, formatter: AxisValueFormatterFn) {
        self.custom_formatters[role.index()] = Some(formatter);
        self.formatters_changed();
    }

    pub fn clear_axis_value_formatter(&mut self, role: AxisRole) {
        self.custom_formatters[role.index()] = None;
        self.formatters_changed();
    }

    pub fn set_axis_label_policy(&mut self, role: AxisRole, policy: AxisLabelPolicy) -> ChartResult<()> {
        let previous = self.config.axis(role).label_policy;
        self.config.axis_mut(role).label_policy = policy;
        if let Err(err) = self.config.axis(role).validate() {
            self.config.axis_mut(role).label_policy = previous;
            return Err(err);
        }
        self.formatters_changed();
        Ok(())
    }

    pub fn set_axis_label_suffix(&mut self, role: AxisRole, suffix: impl Into<String>) {
        self.config.axis_mut(role).label_suffix = suffix.into();
        self.formatters_changed();
    }

    fn formatters_changed(&mut self) {
        self.rebuild_formatters();
        self.layout.invalidate();
    }
}
