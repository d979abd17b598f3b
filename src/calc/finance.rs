//! Financial synthesis: revenue, operating cost, payback, NPV, and ROI.

use std::fmt;

use super::baseline::Baseline;
use super::battery::BatteryFlows;
use super::hot_water::HotWaterFlows;
use super::solar::SolarFlows;
use super::types::{
    AnalysisOptions, BatterySystem, GridDraw, HotWaterSystem, SolarSystem, TariffProfile,
};

/// Complete snapshot of every intermediate and final quantity computed for
/// one scenario.
///
/// Produced once by the synthesizer; no field is mutated afterwards.
#[derive(Debug, Clone)]
pub struct InvestmentResult {
    /// Total annual consumption before any system (kWh).
    pub baseline_annual_consumption_kwh: f64,
    /// Baseline peak-period consumption (kWh).
    pub baseline_peak_kwh: f64,
    /// Baseline shoulder-period consumption (kWh).
    pub baseline_shoulder_kwh: f64,
    /// Baseline off-peak consumption (kWh).
    pub baseline_off_peak_kwh: f64,
    /// Annual cost of the baseline draw, including the supply charge.
    pub baseline_annual_cost: f64,

    /// Annual solar generation (kWh).
    pub solar_generation_kwh: f64,
    /// Solar generation consumed on-site (kWh).
    pub solar_self_consumption_kwh: f64,
    /// Solar export after battery charging (kWh).
    pub solar_export_kwh: f64,

    /// Battery charge sourced from solar surplus (kWh).
    pub battery_solar_charge_kwh: f64,
    /// Battery charge sourced from off-peak grid energy (kWh).
    pub battery_off_peak_charge_kwh: f64,
    /// Battery discharge after round-trip losses (kWh).
    pub battery_discharge_kwh: f64,
    /// Battery discharge applied against peak draw (kWh).
    pub battery_peak_offset_kwh: f64,
    /// Battery discharge applied against shoulder draw (kWh).
    pub battery_shoulder_offset_kwh: f64,

    /// Hot-water load shifted out of peak/shoulder (kWh).
    pub hot_water_shifted_kwh: f64,
    /// Off-peak replacement energy for the shifted load (kWh).
    pub hot_water_added_off_peak_kwh: f64,

    /// Final peak-period grid draw with all systems (kWh).
    pub grid_peak_kwh: f64,
    /// Final shoulder-period grid draw with all systems (kWh).
    pub grid_shoulder_kwh: f64,
    /// Final off-peak grid draw with all systems (kWh).
    pub grid_off_peak_kwh: f64,

    /// Annual feed-in revenue from exported energy.
    pub annual_feed_in_revenue: f64,
    /// Annual grid supply cost with the systems in place.
    pub annual_grid_cost: f64,
    /// Annual maintenance across enabled systems.
    pub annual_maintenance_cost: f64,
    /// Annual operating cost: grid cost minus revenue plus maintenance.
    pub annual_operating_cost: f64,
    /// Baseline cost minus operating cost; may be negative.
    pub annual_net_savings: f64,

    /// Combined install cost of enabled systems.
    pub total_upfront_cost: f64,
    /// Years to recover the upfront cost from undiscounted savings.
    /// `None` unless both upfront cost and savings are positive.
    pub simple_payback_years: Option<f64>,
    /// Net present value of the savings stream minus upfront cost.
    pub net_present_value: f64,
    /// Undiscounted savings over the horizon minus upfront cost.
    pub total_net_savings: f64,
    /// Total net savings divided by upfront cost; 0 when nothing was spent.
    pub simple_roi: f64,
}

/// Simple payback in years, defined only when both the upfront cost and the
/// annual savings are strictly positive.
pub fn simple_payback_years(upfront_cost: f64, annual_net_savings: f64) -> Option<f64> {
    if upfront_cost > 0.0 && annual_net_savings > 0.0 {
        Some(upfront_cost / annual_net_savings)
    } else {
        None
    }
}

/// Net present value of a constant nominal savings annuity minus the upfront
/// cost. The horizon is floored at one year and the rate at zero.
pub fn net_present_value(
    upfront_cost: f64,
    annual_net_savings: f64,
    analysis_years: u32,
    discount_rate: f64,
) -> f64 {
    let years = analysis_years.max(1);
    let rate = discount_rate.max(0.0);

    let mut npv = -upfront_cost;
    for year in 1..=years {
        npv += annual_net_savings / (1.0 + rate).powi(year as i32);
    }
    npv
}

/// Aggregates the pipeline outputs into the final result snapshot.
///
/// Clamps the ending grid draw and export to zero, then computes revenue,
/// costs, savings, and the multi-year figures.
#[expect(clippy::too_many_arguments)]
pub fn synthesise(
    tariff: &TariffProfile,
    solar: &SolarSystem,
    battery: &BatterySystem,
    hot_water: &HotWaterSystem,
    options: &AnalysisOptions,
    baseline: &Baseline,
    solar_flows: &SolarFlows,
    battery_flows: &BatteryFlows,
    hot_water_flows: &HotWaterFlows,
    mut grid: GridDraw,
    export_kwh: f64,
) -> InvestmentResult {
    grid.clamp_non_negative();
    let solar_export_kwh = export_kwh.max(0.0);
    let solar_self_consumption_kwh = solar_flows.self_consumption_kwh.max(0.0);

    let annual_feed_in_revenue = solar_export_kwh * tariff.feed_in_tariff;
    let annual_grid_cost = grid.annual_cost(tariff);

    let mut annual_maintenance_cost = 0.0;
    let mut total_upfront_cost = 0.0;
    if solar.enabled {
        annual_maintenance_cost += solar.maintenance_per_year.max(0.0);
        total_upfront_cost += solar.install_cost.max(0.0);
    }
    if battery.enabled {
        annual_maintenance_cost += battery.maintenance_per_year.max(0.0);
        total_upfront_cost += battery.install_cost.max(0.0);
    }
    if hot_water.enabled {
        annual_maintenance_cost += hot_water.maintenance_per_year.max(0.0);
        total_upfront_cost += hot_water.install_cost.max(0.0);
    }

    let annual_operating_cost = annual_grid_cost - annual_feed_in_revenue + annual_maintenance_cost;
    let annual_net_savings = baseline.annual_cost - annual_operating_cost;

    let analysis_years = options.analysis_years.max(1);
    let npv = net_present_value(
        total_upfront_cost,
        annual_net_savings,
        analysis_years,
        options.discount_rate,
    );
    let total_net_savings = annual_net_savings * f64::from(analysis_years) - total_upfront_cost;
    let simple_roi = if total_upfront_cost > 0.0 {
        total_net_savings / total_upfront_cost
    } else {
        0.0
    };

    InvestmentResult {
        baseline_annual_consumption_kwh: baseline.annual_consumption_kwh,
        baseline_peak_kwh: baseline.draw.peak_kwh,
        baseline_shoulder_kwh: baseline.draw.shoulder_kwh,
        baseline_off_peak_kwh: baseline.draw.off_peak_kwh,
        baseline_annual_cost: baseline.annual_cost,
        solar_generation_kwh: solar_flows.generation_kwh,
        solar_self_consumption_kwh,
        solar_export_kwh,
        battery_solar_charge_kwh: battery_flows.solar_charge_kwh,
        battery_off_peak_charge_kwh: battery_flows.off_peak_charge_kwh,
        battery_discharge_kwh: battery_flows.discharge_kwh,
        battery_peak_offset_kwh: battery_flows.peak_offset_kwh,
        battery_shoulder_offset_kwh: battery_flows.shoulder_offset_kwh,
        hot_water_shifted_kwh: hot_water_flows.shifted_kwh,
        hot_water_added_off_peak_kwh: hot_water_flows.added_off_peak_kwh,
        grid_peak_kwh: grid.peak_kwh,
        grid_shoulder_kwh: grid.shoulder_kwh,
        grid_off_peak_kwh: grid.off_peak_kwh,
        annual_feed_in_revenue,
        annual_grid_cost,
        annual_maintenance_cost,
        annual_operating_cost,
        annual_net_savings,
        total_upfront_cost,
        simple_payback_years: simple_payback_years(total_upfront_cost, annual_net_savings),
        net_present_value: npv,
        total_net_savings,
        simple_roi,
    }
}

impl fmt::Display for InvestmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Investment Result ---")?;
        writeln!(
            f,
            "Baseline consumption:  {:.0} kWh/yr (peak {:.0} / shoulder {:.0} / off-peak {:.0})",
            self.baseline_annual_consumption_kwh,
            self.baseline_peak_kwh,
            self.baseline_shoulder_kwh,
            self.baseline_off_peak_kwh
        )?;
        writeln!(f, "Baseline annual cost:  {:.2}", self.baseline_annual_cost)?;
        writeln!(
            f,
            "Solar:                 {:.0} kWh generated, {:.0} self-consumed, {:.0} exported",
            self.solar_generation_kwh, self.solar_self_consumption_kwh, self.solar_export_kwh
        )?;
        writeln!(
            f,
            "Battery:               {:.0} kWh discharged (charge: {:.0} solar + {:.0} off-peak)",
            self.battery_discharge_kwh,
            self.battery_solar_charge_kwh,
            self.battery_off_peak_charge_kwh
        )?;
        writeln!(
            f,
            "Hot water:             {:.0} kWh shifted ({:.0} kWh added off-peak)",
            self.hot_water_shifted_kwh, self.hot_water_added_off_peak_kwh
        )?;
        writeln!(
            f,
            "Grid with systems:     peak {:.0} / shoulder {:.0} / off-peak {:.0} kWh",
            self.grid_peak_kwh, self.grid_shoulder_kwh, self.grid_off_peak_kwh
        )?;
        writeln!(
            f,
            "Annual operating cost: {:.2} (grid {:.2} - feed-in {:.2} + maintenance {:.2})",
            self.annual_operating_cost,
            self.annual_grid_cost,
            self.annual_feed_in_revenue,
            self.annual_maintenance_cost
        )?;
        writeln!(f, "Annual net savings:    {:.2}", self.annual_net_savings)?;
        writeln!(f, "Upfront cost:          {:.2}", self.total_upfront_cost)?;
        match self.simple_payback_years {
            Some(years) => writeln!(f, "Simple payback:        {years:.1} years")?,
            None => writeln!(f, "Simple payback:        n/a")?,
        }
        writeln!(f, "Net present value:     {:.2}", self.net_present_value)?;
        writeln!(f, "Total net savings:     {:.2}", self.total_net_savings)?;
        write!(f, "Simple ROI:            {:.1}%", self.simple_roi * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payback_undefined_without_upfront_cost() {
        assert_eq!(simple_payback_years(0.0, 1000.0), None);
        assert_eq!(simple_payback_years(-500.0, 1000.0), None);
    }

    #[test]
    fn payback_undefined_without_positive_savings() {
        assert_eq!(simple_payback_years(10000.0, 0.0), None);
        assert_eq!(simple_payback_years(10000.0, -200.0), None);
    }

    #[test]
    fn payback_is_cost_over_savings() {
        let payback = simple_payback_years(10000.0, 2500.0);
        assert_eq!(payback, Some(4.0));
    }

    #[test]
    fn zero_discount_npv_is_undiscounted_sum() {
        let npv = net_present_value(17500.0, 1500.0, 20, 0.0);
        assert_eq!(npv, 1500.0 * 20.0 - 17500.0);
    }

    #[test]
    fn npv_horizon_floored_at_one_year() {
        let npv = net_present_value(0.0, 1000.0, 0, 0.0);
        assert_eq!(npv, 1000.0);
    }

    #[test]
    fn negative_discount_rate_floored_at_zero() {
        let discounted = net_present_value(0.0, 1000.0, 5, -0.5);
        let flat = net_present_value(0.0, 1000.0, 5, 0.0);
        assert_eq!(discounted, flat);
    }

    #[test]
    fn discounting_reduces_npv() {
        let flat = net_present_value(1000.0, 500.0, 10, 0.0);
        let discounted = net_present_value(1000.0, 500.0, 10, 0.07);
        assert!(discounted < flat);
    }

    #[test]
    fn display_reports_absent_payback() {
        let result = InvestmentResult {
            baseline_annual_consumption_kwh: 0.0,
            baseline_peak_kwh: 0.0,
            baseline_shoulder_kwh: 0.0,
            baseline_off_peak_kwh: 0.0,
            baseline_annual_cost: 0.0,
            solar_generation_kwh: 0.0,
            solar_self_consumption_kwh: 0.0,
            solar_export_kwh: 0.0,
            battery_solar_charge_kwh: 0.0,
            battery_off_peak_charge_kwh: 0.0,
            battery_discharge_kwh: 0.0,
            battery_peak_offset_kwh: 0.0,
            battery_shoulder_offset_kwh: 0.0,
            hot_water_shifted_kwh: 0.0,
            hot_water_added_off_peak_kwh: 0.0,
            grid_peak_kwh: 0.0,
            grid_shoulder_kwh: 0.0,
            grid_off_peak_kwh: 0.0,
            annual_feed_in_revenue: 0.0,
            annual_grid_cost: 0.0,
            annual_maintenance_cost: 0.0,
            annual_operating_cost: 0.0,
            annual_net_savings: 0.0,
            total_upfront_cost: 0.0,
            simple_payback_years: None,
            net_present_value: 0.0,
            total_net_savings: 0.0,
            simple_roi: 0.0,
        };
        let text = format!("{result}");
        assert!(text.contains("Simple payback:        n/a"));
    }
}
