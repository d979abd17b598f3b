//! TOML-based scenario configuration and preset definitions.
//!
//! Scenario files mirror the presentation-side input form: percentage-style
//! fields are stored as percentages and divided by 100 when building engine
//! inputs, so the engine only ever sees fractions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::calc::types::{
    AnalysisOptions, BatterySystem, HotWaterSystem, SolarSystem, TariffProfile, UsagePattern,
};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Time-of-use tariff rates and charges.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Household usage profile.
    #[serde(default)]
    pub usage: UsageConfig,
    /// Solar PV system parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Shiftable hot-water storage parameters.
    #[serde(default)]
    pub hot_water: HotWaterConfig,
    /// Financial analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Time-of-use tariff rates and charges.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Peak rate (currency/kWh).
    pub peak_rate: f64,
    /// Shoulder rate (currency/kWh).
    pub shoulder_rate: f64,
    /// Off-peak rate (currency/kWh).
    pub off_peak_rate: f64,
    /// Feed-in tariff (currency/kWh).
    pub feed_in_tariff: f64,
    /// Daily supply charge (currency/day).
    pub daily_supply_charge: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            peak_rate: 0.32,
            shoulder_rate: 0.24,
            off_peak_rate: 0.18,
            feed_in_tariff: 0.08,
            daily_supply_charge: 0.9,
        }
    }
}

/// Household usage profile, percentages as entered on the input form.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageConfig {
    /// Average daily consumption (kWh).
    pub average_daily_consumption_kwh: f64,
    /// Peak usage share (%).
    pub peak_usage_pct: f64,
    /// Shoulder usage share (%).
    pub shoulder_usage_pct: f64,
    /// Off-peak usage share (%).
    pub off_peak_usage_pct: f64,
    /// Consumption coincident with solar generation (%).
    pub daytime_usage_pct: f64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            average_daily_consumption_kwh: 20.0,
            peak_usage_pct: 40.0,
            shoulder_usage_pct: 35.0,
            off_peak_usage_pct: 25.0,
            daytime_usage_pct: 30.0,
        }
    }
}

/// Solar PV system parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Whether solar PV is included.
    pub enabled: bool,
    /// System size (kW).
    pub system_size_kw: f64,
    /// Average generation per kW per day (kWh).
    pub generation_kwh_per_kw_day: f64,
    /// Upfront cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime (years).
    pub lifetime_years: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            system_size_kw: 6.6,
            generation_kwh_per_kw_day: 4.2,
            install_cost: 6500.0,
            maintenance_per_year: 120.0,
            lifetime_years: 20.0,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Whether battery storage is included.
    pub enabled: bool,
    /// Nameplate capacity (kWh).
    pub capacity_kwh: f64,
    /// Round-trip efficiency (%).
    pub round_trip_efficiency_pct: f64,
    /// Depth of discharge (%).
    pub depth_of_discharge_pct: f64,
    /// Share of charging sourced from off-peak grid energy (%).
    pub charge_from_off_peak_pct: f64,
    /// Upfront cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime (years).
    pub lifetime_years: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity_kwh: 10.0,
            round_trip_efficiency_pct: 90.0,
            depth_of_discharge_pct: 90.0,
            charge_from_off_peak_pct: 20.0,
            install_cost: 11000.0,
            maintenance_per_year: 150.0,
            lifetime_years: 12.0,
        }
    }
}

/// Shiftable hot-water storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotWaterConfig {
    /// Whether hot-water storage is included.
    pub enabled: bool,
    /// Shiftable hot-water load per day (kWh).
    pub shiftable_load_kwh_per_day: f64,
    /// Storage efficiency (%).
    pub storage_efficiency_pct: f64,
    /// Upfront cost.
    pub install_cost: f64,
    /// Annual maintenance cost.
    pub maintenance_per_year: f64,
    /// Expected lifetime (years).
    pub lifetime_years: f64,
}

impl Default for HotWaterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            shiftable_load_kwh_per_day: 6.0,
            storage_efficiency_pct: 85.0,
            install_cost: 4000.0,
            maintenance_per_year: 80.0,
            lifetime_years: 15.0,
        }
    }
}

/// Financial analysis parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Analysis period (years).
    pub analysis_years: u32,
    /// Discount rate (%).
    pub discount_rate_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analysis_years: 20,
            discount_rate_pct: 5.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

/// Engine input records built from one scenario, with every percentage
/// field already converted to a fraction.
#[derive(Debug, Clone)]
pub struct ScenarioInputs {
    pub tariff: TariffProfile,
    pub usage: UsagePattern,
    pub solar: SolarSystem,
    pub battery: BatterySystem,
    pub hot_water: HotWaterSystem,
    pub options: AnalysisOptions,
}

impl ScenarioConfig {
    /// Returns the baseline scenario: solar and battery at the form defaults,
    /// hot water excluded.
    pub fn baseline() -> Self {
        Self {
            tariff: TariffConfig::default(),
            usage: UsageConfig::default(),
            solar: SolarConfig::default(),
            battery: BatteryConfig::default(),
            hot_water: HotWaterConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Returns the solar-only preset: PV without storage.
    pub fn solar_only() -> Self {
        Self {
            battery: BatteryConfig {
                enabled: false,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the all-systems preset: solar, battery, and hot-water
    /// storage all included.
    pub fn all_systems() -> Self {
        Self {
            hot_water: HotWaterConfig {
                enabled: true,
                ..HotWaterConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "solar_only", "all_systems"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "solar_only" => Ok(Self::solar_only()),
            "all_systems" => Ok(Self::all_systems()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Sum of the three usage percentages as entered.
    ///
    /// The engine renormalises regardless; callers use this to tell the user
    /// when the entered split did not add up to 100%.
    pub fn usage_pct_total(&self) -> f64 {
        self.usage.peak_usage_pct + self.usage.shoulder_usage_pct + self.usage.off_peak_usage_pct
    }

    /// Builds the engine input records, converting percentages to fractions.
    pub fn to_inputs(&self) -> ScenarioInputs {
        let t = &self.tariff;
        let u = &self.usage;
        let s = &self.solar;
        let b = &self.battery;
        let h = &self.hot_water;
        let a = &self.analysis;

        ScenarioInputs {
            tariff: TariffProfile {
                peak_rate: t.peak_rate,
                shoulder_rate: t.shoulder_rate,
                off_peak_rate: t.off_peak_rate,
                feed_in_tariff: t.feed_in_tariff,
                daily_supply_charge: t.daily_supply_charge,
            },
            usage: UsagePattern {
                average_daily_consumption_kwh: u.average_daily_consumption_kwh,
                peak_fraction: u.peak_usage_pct / 100.0,
                shoulder_fraction: u.shoulder_usage_pct / 100.0,
                off_peak_fraction: u.off_peak_usage_pct / 100.0,
                daytime_fraction: u.daytime_usage_pct / 100.0,
            },
            solar: SolarSystem {
                enabled: s.enabled,
                system_size_kw: s.system_size_kw,
                generation_kwh_per_kw_day: s.generation_kwh_per_kw_day,
                install_cost: s.install_cost,
                maintenance_per_year: s.maintenance_per_year,
                lifetime_years: s.lifetime_years,
            },
            battery: BatterySystem {
                enabled: b.enabled,
                capacity_kwh: b.capacity_kwh,
                round_trip_efficiency: b.round_trip_efficiency_pct / 100.0,
                depth_of_discharge: b.depth_of_discharge_pct / 100.0,
                install_cost: b.install_cost,
                maintenance_per_year: b.maintenance_per_year,
                lifetime_years: b.lifetime_years,
                charge_from_off_peak_fraction: b.charge_from_off_peak_pct / 100.0,
            },
            hot_water: HotWaterSystem {
                enabled: h.enabled,
                shiftable_load_kwh_per_day: h.shiftable_load_kwh_per_day,
                storage_efficiency: h.storage_efficiency_pct / 100.0,
                install_cost: h.install_cost,
                maintenance_per_year: h.maintenance_per_year,
                lifetime_years: h.lifetime_years,
            },
            options: AnalysisOptions {
                analysis_years: a.analysis_years,
                discount_rate: a.discount_rate_pct / 100.0,
            },
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// The ranges mirror the scenario input form; the engine itself absorbs
    /// out-of-range values through clamping, so validation here is advisory
    /// for the caller rather than a precondition of the calculation.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.tariff;
        for (field, value) in [
            ("tariff.peak_rate", t.peak_rate),
            ("tariff.shoulder_rate", t.shoulder_rate),
            ("tariff.off_peak_rate", t.off_peak_rate),
            ("tariff.feed_in_tariff", t.feed_in_tariff),
            ("tariff.daily_supply_charge", t.daily_supply_charge),
        ] {
            if value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be >= 0".into(),
                });
            }
        }

        let u = &self.usage;
        if u.average_daily_consumption_kwh < 0.0 {
            errors.push(ConfigError {
                field: "usage.average_daily_consumption_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        for (field, value) in [
            ("usage.peak_usage_pct", u.peak_usage_pct),
            ("usage.shoulder_usage_pct", u.shoulder_usage_pct),
            ("usage.off_peak_usage_pct", u.off_peak_usage_pct),
            ("usage.daytime_usage_pct", u.daytime_usage_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0, 100]".into(),
                });
            }
        }

        let s = &self.solar;
        if !(0.0..=100.0).contains(&s.system_size_kw) {
            errors.push(ConfigError {
                field: "solar.system_size_kw".into(),
                message: "must be in [0, 100]".into(),
            });
        }
        if !(0.0..=24.0).contains(&s.generation_kwh_per_kw_day) {
            errors.push(ConfigError {
                field: "solar.generation_kwh_per_kw_day".into(),
                message: "must be in [0, 24]".into(),
            });
        }
        if !(1.0..=50.0).contains(&s.lifetime_years) {
            errors.push(ConfigError {
                field: "solar.lifetime_years".into(),
                message: "must be in [1, 50]".into(),
            });
        }

        let b = &self.battery;
        if !(0.0..=200.0).contains(&b.capacity_kwh) {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be in [0, 200]".into(),
            });
        }
        for (field, value) in [
            (
                "battery.round_trip_efficiency_pct",
                b.round_trip_efficiency_pct,
            ),
            ("battery.depth_of_discharge_pct", b.depth_of_discharge_pct),
            ("battery.charge_from_off_peak_pct", b.charge_from_off_peak_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0, 100]".into(),
                });
            }
        }
        if !(1.0..=25.0).contains(&b.lifetime_years) {
            errors.push(ConfigError {
                field: "battery.lifetime_years".into(),
                message: "must be in [1, 25]".into(),
            });
        }

        let h = &self.hot_water;
        if !(0.0..=50.0).contains(&h.shiftable_load_kwh_per_day) {
            errors.push(ConfigError {
                field: "hot_water.shiftable_load_kwh_per_day".into(),
                message: "must be in [0, 50]".into(),
            });
        }
        if !(1.0..=100.0).contains(&h.storage_efficiency_pct) {
            errors.push(ConfigError {
                field: "hot_water.storage_efficiency_pct".into(),
                message: "must be in [1, 100]".into(),
            });
        }
        if !(1.0..=25.0).contains(&h.lifetime_years) {
            errors.push(ConfigError {
                field: "hot_water.lifetime_years".into(),
                message: "must be in [1, 25]".into(),
            });
        }

        for (field, value) in [
            ("solar.install_cost", s.install_cost),
            ("solar.maintenance_per_year", s.maintenance_per_year),
            ("battery.install_cost", b.install_cost),
            ("battery.maintenance_per_year", b.maintenance_per_year),
            ("hot_water.install_cost", h.install_cost),
            ("hot_water.maintenance_per_year", h.maintenance_per_year),
        ] {
            if value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be >= 0".into(),
                });
            }
        }

        let a = &self.analysis;
        if !(1..=40).contains(&a.analysis_years) {
            errors.push(ConfigError {
                field: "analysis.analysis_years".into(),
                message: "must be in [1, 40]".into(),
            });
        }
        if !(0.0..=100.0).contains(&a.discount_rate_pct) {
            errors.push(ConfigError {
                field: "analysis.discount_rate_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        errors
    }
}
