pub mod axis;
pub mod line_series;
pub mod scale;
pub mod ticks;
pub mod types;

pub use axis::{Axis, AxisDependency, MAX_LABEL_COUNT};
pub use line_series::{LineData, LineSeries, project_line_points};
pub use scale::{LinearScale, PixelSpan};
pub use ticks::{
    MAX_TICK_COUNT, TickConstraints, TickSet, TickStrategy, compute_ticks,
    decimal_places_for_interval, round_to_next_significant, tick_step_hint_from_values,
};
pub use types::{ChartOffsets, ContentRect, DataPoint, Viewport};
