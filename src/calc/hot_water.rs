//! Hot-water load shifting from peak/shoulder into off-peak.

use super::types::{DAYS_PER_YEAR, GridDraw, HotWaterSystem};

/// Minimum storage efficiency; prevents the off-peak replacement energy from
/// blowing up as efficiency approaches zero.
const MIN_STORAGE_EFFICIENCY: f64 = 0.01;

/// Annual hot-water shifting flows.
#[derive(Debug, Clone, Default)]
pub struct HotWaterFlows {
    /// Load moved out of peak and shoulder periods (kWh).
    pub shifted_kwh: f64,
    /// Replacement energy added to off-peak draw, inflated by storage
    /// losses (kWh).
    pub added_off_peak_kwh: f64,
}

/// Shifts up to the annual shiftable load out of peak then shoulder draw,
/// replacing it with off-peak draw divided by the storage efficiency.
///
/// An inactive system leaves the grid draw untouched and contributes zeros.
pub fn allocate(hot_water: &HotWaterSystem, grid: &mut GridDraw) -> HotWaterFlows {
    if !hot_water.is_active() {
        return HotWaterFlows::default();
    }

    let annual_shiftable_kwh = hot_water.shiftable_load_kwh_per_day * DAYS_PER_YEAR;
    let storage_efficiency = hot_water.storage_efficiency.clamp(MIN_STORAGE_EFFICIENCY, 1.0);

    let peak_reduction = grid.reduce_peak(annual_shiftable_kwh);
    let shoulder_reduction = grid.reduce_shoulder(annual_shiftable_kwh - peak_reduction);

    let shifted_kwh = peak_reduction + shoulder_reduction;
    let mut added_off_peak_kwh = 0.0;
    if shifted_kwh > 0.0 {
        added_off_peak_kwh = shifted_kwh / storage_efficiency;
        grid.add_off_peak(added_off_peak_kwh);
    }

    HotWaterFlows {
        shifted_kwh,
        added_off_peak_kwh,
    }
}
