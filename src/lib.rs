//! scenechart: retained-mode scene-graph chart core.
//!
//! This crate provides the orchestrating chart object of a charting engine:
//! a scene graph of drawable primitives, a scheduled data/layout pipeline,
//! legend placement with auto-padding feedback, and pointer-driven
//! highlight/tooltip interaction. Concrete series implementations plug in
//! through the [`series::Series`] trait.

pub mod chart;
pub mod error;
pub mod legend;
pub mod render;
pub mod scene;
pub mod series;
pub mod telemetry;

pub use chart::{
    AddSeries, CartesianLayout, Chart, ChartConfig, ChartLayout, LegendPosition, Padding,
};
pub use error::{ChartError, ChartResult};
