//! Battery allocation: charging from solar surplus and off-peak grid,
//! discharging against the most expensive remaining draw.

use super::types::{BatterySystem, DAYS_PER_YEAR, GridDraw};

/// Annual battery energy flows produced by the allocator.
#[derive(Debug, Clone, Default)]
pub struct BatteryFlows {
    /// Charge sourced from solar surplus (kWh).
    pub solar_charge_kwh: f64,
    /// Charge sourced from off-peak grid energy (kWh).
    pub off_peak_charge_kwh: f64,
    /// Dischargeable energy after the round-trip loss (kWh).
    pub discharge_kwh: f64,
    /// Discharge applied against peak draw (kWh).
    pub peak_offset_kwh: f64,
    /// Discharge applied against shoulder draw (kWh).
    pub shoulder_offset_kwh: f64,
}

/// Allocates annual battery throughput against the running grid draw.
///
/// The annual throughput ceiling assumes one full usable-capacity cycle per
/// day. Charging takes solar surplus first, bounded by the non-off-peak
/// share of the ceiling, then tops up from the grid at off-peak rate (which
/// increases off-peak draw). The round-trip loss is applied once, at
/// discharge. Discharge offsets peak before shoulder; note the asymmetry
/// with the solar allocator, which offsets shoulder first.
///
/// Returns the flows and the solar surplus left over for export.
pub fn allocate(
    battery: &BatterySystem,
    solar_surplus_kwh: f64,
    grid: &mut GridDraw,
) -> (BatteryFlows, f64) {
    if !battery.is_active() {
        return (BatteryFlows::default(), solar_surplus_kwh);
    }

    let usable_capacity_kwh =
        (battery.capacity_kwh * battery.depth_of_discharge.clamp(0.0, 1.0)).max(0.0);
    let round_trip_efficiency = battery.round_trip_efficiency.clamp(0.0, 1.0);
    if usable_capacity_kwh <= 0.0 || round_trip_efficiency <= 0.0 {
        return (BatteryFlows::default(), solar_surplus_kwh);
    }

    let annual_capacity_kwh = usable_capacity_kwh * DAYS_PER_YEAR;
    let off_peak_fraction = battery.charge_from_off_peak_fraction.clamp(0.0, 1.0);

    let target_solar_charge = annual_capacity_kwh * (1.0 - off_peak_fraction);
    let solar_charge_kwh = solar_surplus_kwh.min(target_solar_charge);
    let remaining_surplus = solar_surplus_kwh - solar_charge_kwh;

    let remaining_capacity = annual_capacity_kwh - solar_charge_kwh;
    let max_off_peak_charge = annual_capacity_kwh * off_peak_fraction;
    let off_peak_charge_kwh = remaining_capacity.min(max_off_peak_charge);
    grid.add_off_peak(off_peak_charge_kwh);

    let discharge_kwh = (solar_charge_kwh + off_peak_charge_kwh) * round_trip_efficiency;

    let peak_offset_kwh = grid.reduce_peak(discharge_kwh);
    let shoulder_offset_kwh = grid.reduce_shoulder(discharge_kwh - peak_offset_kwh);

    (
        BatteryFlows {
            solar_charge_kwh,
            off_peak_charge_kwh,
            discharge_kwh,
            peak_offset_kwh,
            shoulder_offset_kwh,
        },
        remaining_surplus,
    )
}
