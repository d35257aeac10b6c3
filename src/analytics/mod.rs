//! Dashboard analytics derivation
//!
//! Stateless transforms from the backend's precomputed counters and
//! time series to the percentages, deltas and bucketed distributions
//! the dashboard screens display. No I/O happens here.

pub mod derive;
pub mod models;

pub use derive::{
    comprehension_split, coverage_bar, growth_deltas, pace_estimates, pace_label, relative_label,
    scale_flow, stability_distribution, trailing_flow_window, HealthTier, StabilityBand,
    StabilityDistribution,
};
pub use models::*;
