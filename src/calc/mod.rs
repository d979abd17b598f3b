//! Annualized energy-flow allocation and investment-return calculation.

/// Baseline consumption normalisation and cost.
pub mod baseline;
/// Battery charge/discharge allocation.
pub mod battery;
pub mod engine;
/// Financial synthesis and the result snapshot.
pub mod finance;
/// Hot-water load shifting.
pub mod hot_water;
/// Solar self-consumption and export allocation.
pub mod solar;
pub mod types;

// Re-export the main entry points for convenience
pub use engine::calculate;
pub use finance::InvestmentResult;
pub use types::{
    AnalysisOptions, BatterySystem, GridDraw, HotWaterSystem, SolarSystem, TariffProfile,
    UsagePattern,
};
