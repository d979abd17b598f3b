//! Domestic renewables investment-return calculator.
//!
//! Estimates the annual energy-flow allocation and multi-year financial
//! outcome (NPV, payback, ROI) of adding solar generation, battery storage,
//! and shiftable hot-water load to a household under a time-of-use tariff.

pub mod calc;
/// Scenario configuration, presets, and validation.
pub mod config;
pub mod io;
