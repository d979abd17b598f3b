//! Pipeline orchestration: the single calculation entry point.

use super::types::{
    AnalysisOptions, BatterySystem, HotWaterSystem, SolarSystem, TariffProfile, UsagePattern,
};
use super::{baseline, battery, finance, hot_water, solar};

pub use super::finance::InvestmentResult;

/// Estimates the financial return of the given solar, battery, and hot-water
/// configuration against a household usage pattern and tariff.
///
/// Runs the four allocation stages in strict sequence over a per-period grid
/// draw accumulator seeded from the baseline split, then synthesises the
/// financial outcome. Pure and stateless: borrows its inputs, returns a
/// fresh result, and is safe to call concurrently.
///
/// Malformed numeric inputs (negative fractions, zero capacities, zero
/// efficiencies) are absorbed by clamps and fallbacks in the stages; the
/// function never fails.
pub fn calculate(
    tariff: &TariffProfile,
    usage: &UsagePattern,
    solar_system: &SolarSystem,
    battery_system: &BatterySystem,
    hot_water_system: &HotWaterSystem,
    options: &AnalysisOptions,
) -> InvestmentResult {
    let baseline = baseline::compute(usage, tariff);
    let mut grid = baseline.draw.clone();

    let solar_flows = solar::allocate(
        solar_system,
        usage,
        baseline.annual_consumption_kwh,
        &mut grid,
    );
    let (battery_flows, export_kwh) =
        battery::allocate(battery_system, solar_flows.export_kwh, &mut grid);
    let hot_water_flows = hot_water::allocate(hot_water_system, &mut grid);

    finance::synthesise(
        tariff,
        solar_system,
        battery_system,
        hot_water_system,
        options,
        &baseline,
        &solar_flows,
        &battery_flows,
        &hot_water_flows,
        grid,
        export_kwh,
    )
}
