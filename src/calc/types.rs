//! Core input records and the grid-draw accumulator shared by all stages.

/// Days per modelled year; every annual quantity is `daily * DAYS_PER_YEAR`.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Time-of-use tariff rates and charges.
///
/// All monetary fields are in currency units per kWh (or per day for the
/// supply charge) and are expected to be non-negative.
#[derive(Debug, Clone)]
pub struct TariffProfile {
    /// Peak period unit rate (currency/kWh).
    pub peak_rate: f64,
    /// Shoulder period unit rate (currency/kWh).
    pub shoulder_rate: f64,
    /// Off-peak period unit rate (currency/kWh).
    pub off_peak_rate: f64,
    /// Feed-in tariff paid for exported energy (currency/kWh).
    pub feed_in_tariff: f64,
    /// Fixed daily supply charge (currency/day).
    pub daily_supply_charge: f64,
}

impl TariffProfile {
    /// Annual fixed supply charge component.
    pub fn annual_supply_charge(&self) -> f64 {
        self.daily_supply_charge * DAYS_PER_YEAR
    }
}

/// Household consumption profile.
///
/// The three usage fractions are conceptually in `[0, 1]` but need not sum
/// to 1; the baseline stage renormalises them (equal thirds when the sum is
/// non-positive).
#[derive(Debug, Clone)]
pub struct UsagePattern {
    /// Average daily consumption (kWh, negative values are treated as 0).
    pub average_daily_consumption_kwh: f64,
    /// Fraction of consumption during the peak period.
    pub peak_fraction: f64,
    /// Fraction of consumption during the shoulder period.
    pub shoulder_fraction: f64,
    /// Fraction of consumption during the off-peak period.
    pub off_peak_fraction: f64,
    /// Fraction of consumption coincident with solar generation.
    pub daytime_fraction: f64,
}

/// Solar PV system parameters.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    /// Whether the system is included in the scenario.
    pub enabled: bool,
    /// Installed capacity (kW).
    pub system_size_kw: f64,
    /// Average generation per installed kW per day (kWh).
    pub generation_kwh_per_kw_day: f64,
    /// Upfront install cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime in years (informational, not used in the NPV loop).
    pub lifetime_years: f64,
}

impl SolarSystem {
    /// Whether the allocator should run: enabled with positive size and yield.
    pub fn is_active(&self) -> bool {
        self.enabled && self.system_size_kw > 0.0 && self.generation_kwh_per_kw_day > 0.0
    }
}

/// Battery storage system parameters.
#[derive(Debug, Clone)]
pub struct BatterySystem {
    /// Whether the system is included in the scenario.
    pub enabled: bool,
    /// Nameplate capacity (kWh).
    pub capacity_kwh: f64,
    /// Round-trip efficiency as a fraction (clamped to `[0, 1]`).
    pub round_trip_efficiency: f64,
    /// Depth of discharge as a fraction (clamped to `[0, 1]`).
    pub depth_of_discharge: f64,
    /// Upfront install cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime in years (informational).
    pub lifetime_years: f64,
    /// Target share of charging sourced from off-peak grid energy rather
    /// than solar surplus (fraction, clamped to `[0, 1]`).
    pub charge_from_off_peak_fraction: f64,
}

impl BatterySystem {
    /// Whether the allocator should run: enabled with positive capacity,
    /// efficiency, and depth of discharge.
    pub fn is_active(&self) -> bool {
        self.enabled
            && self.capacity_kwh > 0.0
            && self.round_trip_efficiency > 0.0
            && self.depth_of_discharge > 0.0
    }
}

/// Shiftable hot-water storage parameters.
#[derive(Debug, Clone)]
pub struct HotWaterSystem {
    /// Whether the system is included in the scenario.
    pub enabled: bool,
    /// Load that can be deferred to off-peak (kWh/day).
    pub shiftable_load_kwh_per_day: f64,
    /// Storage efficiency as a fraction (clamped to `[0.01, 1]`; the floor
    /// prevents the off-peak replacement energy from blowing up).
    pub storage_efficiency: f64,
    /// Upfront install cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime in years (informational).
    pub lifetime_years: f64,
}

impl HotWaterSystem {
    /// Whether the shifter should run: enabled with positive shiftable load.
    pub fn is_active(&self) -> bool {
        self.enabled && self.shiftable_load_kwh_per_day > 0.0
    }
}

/// Financial analysis horizon and discounting parameters.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Analysis horizon in years (floored at 1).
    pub analysis_years: u32,
    /// Annual discount rate as a fraction (floored at 0).
    pub discount_rate: f64,
}

/// Running annual grid draw per tariff period (kWh).
///
/// Seeded from the baseline split and threaded through the allocation
/// stages in order: solar, battery, hot water. Each stage reduces or adds
/// to the buckets through the primitives below; the financial synthesizer
/// clamps the final values to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDraw {
    /// Annual peak-period grid draw (kWh).
    pub peak_kwh: f64,
    /// Annual shoulder-period grid draw (kWh).
    pub shoulder_kwh: f64,
    /// Annual off-peak grid draw (kWh).
    pub off_peak_kwh: f64,
}

impl GridDraw {
    /// Reduces the peak bucket by up to `kwh` and returns the amount taken.
    pub fn reduce_peak(&mut self, kwh: f64) -> f64 {
        let taken = self.peak_kwh.min(kwh.max(0.0));
        self.peak_kwh -= taken;
        taken
    }

    /// Reduces the shoulder bucket by up to `kwh` and returns the amount taken.
    pub fn reduce_shoulder(&mut self, kwh: f64) -> f64 {
        let taken = self.shoulder_kwh.min(kwh.max(0.0));
        self.shoulder_kwh -= taken;
        taken
    }

    /// Adds `kwh` of extra off-peak draw (battery charging, shifted hot water).
    pub fn add_off_peak(&mut self, kwh: f64) {
        self.off_peak_kwh += kwh;
    }

    /// Clamps all buckets to zero, absorbing accumulated rounding below zero.
    pub fn clamp_non_negative(&mut self) {
        self.peak_kwh = self.peak_kwh.max(0.0);
        self.shoulder_kwh = self.shoulder_kwh.max(0.0);
        self.off_peak_kwh = self.off_peak_kwh.max(0.0);
    }

    /// Annual supply cost of this draw under the given tariff, including the
    /// fixed supply charge.
    pub fn annual_cost(&self, tariff: &TariffProfile) -> f64 {
        self.peak_kwh * tariff.peak_rate
            + self.shoulder_kwh * tariff.shoulder_rate
            + self.off_peak_kwh * tariff.off_peak_rate
            + tariff.annual_supply_charge()
    }
}
