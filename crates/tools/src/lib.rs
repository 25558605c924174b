//! Developer tooling shown on the Debug tab.

pub mod inspector;
pub mod stats;

pub use inspector::{GeometryInspector, GeometrySummary};
pub use stats::FrameStats;
