//! Shared input builders for integration tests.

use renewables_roi::calc::types::{
    AnalysisOptions, BatterySystem, HotWaterSystem, SolarSystem, TariffProfile, UsagePattern,
};

pub fn default_tariff() -> TariffProfile {
    TariffProfile {
        peak_rate: 0.32,
        shoulder_rate: 0.24,
        off_peak_rate: 0.18,
        feed_in_tariff: 0.08,
        daily_supply_charge: 0.9,
    }
}

pub fn default_usage() -> UsagePattern {
    UsagePattern {
        average_daily_consumption_kwh: 20.0,
        peak_fraction: 0.40,
        shoulder_fraction: 0.35,
        off_peak_fraction: 0.25,
        daytime_fraction: 0.30,
    }
}

pub fn default_solar(enabled: bool) -> SolarSystem {
    SolarSystem {
        enabled,
        system_size_kw: 6.6,
        generation_kwh_per_kw_day: 4.2,
        install_cost: 6500.0,
        maintenance_per_year: 120.0,
        lifetime_years: 20.0,
    }
}

pub fn default_battery(enabled: bool) -> BatterySystem {
    BatterySystem {
        enabled,
        capacity_kwh: 10.0,
        round_trip_efficiency: 0.90,
        depth_of_discharge: 0.90,
        install_cost: 11000.0,
        maintenance_per_year: 150.0,
        lifetime_years: 12.0,
        charge_from_off_peak_fraction: 0.20,
    }
}

pub fn default_hot_water(enabled: bool) -> HotWaterSystem {
    HotWaterSystem {
        enabled,
        shiftable_load_kwh_per_day: 6.0,
        storage_efficiency: 0.85,
        install_cost: 4000.0,
        maintenance_per_year: 80.0,
        lifetime_years: 15.0,
    }
}

pub fn default_options() -> AnalysisOptions {
    AnalysisOptions {
        analysis_years: 20,
        discount_rate: 0.05,
    }
}
