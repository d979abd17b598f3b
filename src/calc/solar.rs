//! Solar allocation: self-consumption offsets and export surplus.

use super::types::{DAYS_PER_YEAR, GridDraw, SolarSystem, UsagePattern};

/// Annual solar energy flows produced by the allocator.
#[derive(Debug, Clone, Default)]
pub struct SolarFlows {
    /// Annual generation (kWh).
    pub generation_kwh: f64,
    /// Generation consumed directly on-site (kWh).
    pub self_consumption_kwh: f64,
    /// Surplus generation available for battery charging and export (kWh).
    pub export_kwh: f64,
}

/// Allocates annual solar generation against the running grid draw.
///
/// Self-consumption is capped by the daytime share of consumption and
/// offsets shoulder draw before peak draw; off-peak draw is never reduced
/// directly. The remainder becomes export surplus. An inactive system
/// leaves the grid draw untouched and contributes zeros.
pub fn allocate(
    solar: &SolarSystem,
    usage: &UsagePattern,
    annual_consumption_kwh: f64,
    grid: &mut GridDraw,
) -> SolarFlows {
    if !solar.is_active() {
        return SolarFlows::default();
    }

    let generation_kwh = solar.system_size_kw * solar.generation_kwh_per_kw_day * DAYS_PER_YEAR;
    let daytime_fraction = usage.daytime_fraction.clamp(0.0, 1.0);
    let daytime_consumption_kwh = annual_consumption_kwh * daytime_fraction;

    let self_consumption_kwh = daytime_consumption_kwh.min(generation_kwh);

    // Offset ordering is fixed policy: shoulder first, then peak.
    let to_shoulder = grid.reduce_shoulder(self_consumption_kwh);
    grid.reduce_peak(self_consumption_kwh - to_shoulder);

    let export_kwh = (generation_kwh - self_consumption_kwh).max(0.0);

    SolarFlows {
        generation_kwh,
        self_consumption_kwh,
        export_kwh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(size_kw: f64, per_kw_day: f64) -> SolarSystem {
        SolarSystem {
            enabled: true,
            system_size_kw: size_kw,
            generation_kwh_per_kw_day: per_kw_day,
            install_cost: 6500.0,
            maintenance_per_year: 120.0,
            lifetime_years: 20.0,
        }
    }

    fn usage(daytime: f64) -> UsagePattern {
        UsagePattern {
            average_daily_consumption_kwh: 20.0,
            peak_fraction: 0.4,
            shoulder_fraction: 0.35,
            off_peak_fraction: 0.25,
            daytime_fraction: daytime,
        }
    }

    fn grid() -> GridDraw {
        GridDraw {
            peak_kwh: 2920.0,
            shoulder_kwh: 2555.0,
            off_peak_kwh: 1825.0,
        }
    }

    #[test]
    fn disabled_system_contributes_nothing() {
        let mut s = solar(6.6, 4.2);
        s.enabled = false;
        let mut g = grid();
        let flows = allocate(&s, &usage(0.3), 7300.0, &mut g);
        assert_eq!(flows.generation_kwh, 0.0);
        assert_eq!(flows.export_kwh, 0.0);
        assert_eq!(g, grid());
    }

    #[test]
    fn zero_size_contributes_nothing() {
        let mut g = grid();
        let flows = allocate(&solar(0.0, 4.2), &usage(0.3), 7300.0, &mut g);
        assert_eq!(flows.generation_kwh, 0.0);
        assert_eq!(g, grid());
    }

    #[test]
    fn shoulder_is_offset_before_peak() {
        // Daytime consumption 7300 * 0.5 = 3650 exceeds the shoulder bucket,
        // so the shoulder must empty before peak decreases.
        let mut g = grid();
        let flows = allocate(&solar(6.6, 4.2), &usage(0.5), 7300.0, &mut g);
        assert_eq!(g.shoulder_kwh, 0.0);
        assert!((g.peak_kwh - (2920.0 - (3650.0 - 2555.0))).abs() < 1e-9);
        assert_eq!(g.off_peak_kwh, 1825.0);
        assert!((flows.self_consumption_kwh - 3650.0).abs() < 1e-9);
    }

    #[test]
    fn small_self_consumption_only_touches_shoulder() {
        let mut g = grid();
        allocate(&solar(6.6, 4.2), &usage(0.1), 7300.0, &mut g);
        assert!((g.shoulder_kwh - (2555.0 - 730.0)).abs() < 1e-9);
        assert_eq!(g.peak_kwh, 2920.0);
    }

    #[test]
    fn export_is_generation_minus_self_consumption() {
        let mut g = grid();
        let flows = allocate(&solar(6.6, 4.2), &usage(0.3), 7300.0, &mut g);
        assert!((flows.generation_kwh - 10117.8).abs() < 1e-9);
        assert!((flows.self_consumption_kwh - 2190.0).abs() < 1e-9);
        assert!((flows.export_kwh - 7927.8).abs() < 1e-9);
    }

    #[test]
    fn self_consumption_capped_by_generation() {
        // Tiny array: all generation is self-consumed, nothing exported.
        let mut g = grid();
        let flows = allocate(&solar(0.5, 2.0), &usage(1.0), 7300.0, &mut g);
        assert!((flows.self_consumption_kwh - flows.generation_kwh).abs() < 1e-9);
        assert_eq!(flows.export_kwh, 0.0);
    }

    #[test]
    fn daytime_fraction_is_clamped() {
        let mut g = grid();
        let flows = allocate(&solar(6.6, 4.2), &usage(1.5), 7300.0, &mut g);
        // Clamped to 1.0: daytime consumption equals annual consumption.
        assert!((flows.self_consumption_kwh - 7300.0).abs() < 1e-9);
    }
}
