//! dual-axis-chart: axis layout engine for two-axis line charts.
//!
//! Ticks are computed from live data, label margins are measured through a
//! [`render::TextMeasurer`], labels of the left and right axes can share one
//! slot, and grid lines and edge labels are clamped to the content area.
//! Drawing goes through [`render::DrawSurface`], so frames can be recorded,
//! validated headlessly, or replayed on Cairo behind the `cairo-backend`
//! feature.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine, ChartLayout};
pub use error::{ChartError, ChartResult};
