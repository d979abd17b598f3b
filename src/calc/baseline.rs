//! Baseline consumption split and annual cost before any system is added.

use super::types::{DAYS_PER_YEAR, GridDraw, TariffProfile, UsagePattern};

/// Annual baseline consumption, its per-period split, and its cost.
#[derive(Debug, Clone)]
pub struct Baseline {
    /// Total annual consumption (kWh).
    pub annual_consumption_kwh: f64,
    /// Per-period split of the annual consumption.
    pub draw: GridDraw,
    /// Annual cost of the baseline draw, including the supply charge.
    pub annual_cost: f64,
}

/// Normalises the three usage fractions so they sum to exactly 1.0.
///
/// Inputs that do not sum to 1 are renormalised by their sum; a non-positive
/// sum (including negative sums) falls back to an equal one-third split,
/// modelling an unknown profile as flat. Total function, never errors.
pub fn normalise_fractions(peak: f64, shoulder: f64, off_peak: f64) -> (f64, f64, f64) {
    let sum = peak + shoulder + off_peak;
    if sum <= 0.0 {
        let third = 1.0 / 3.0;
        (third, third, third)
    } else {
        (peak / sum, shoulder / sum, off_peak / sum)
    }
}

/// Computes the baseline annual consumption split and cost.
pub fn compute(usage: &UsagePattern, tariff: &TariffProfile) -> Baseline {
    let annual_consumption_kwh = usage.average_daily_consumption_kwh.max(0.0) * DAYS_PER_YEAR;

    let (peak_fraction, shoulder_fraction, off_peak_fraction) = normalise_fractions(
        usage.peak_fraction,
        usage.shoulder_fraction,
        usage.off_peak_fraction,
    );

    let draw = GridDraw {
        peak_kwh: annual_consumption_kwh * peak_fraction,
        shoulder_kwh: annual_consumption_kwh * shoulder_fraction,
        off_peak_kwh: annual_consumption_kwh * off_peak_fraction,
    };
    let annual_cost = draw.annual_cost(tariff);

    Baseline {
        annual_consumption_kwh,
        draw,
        annual_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tariff() -> TariffProfile {
        TariffProfile {
            peak_rate: 0.32,
            shoulder_rate: 0.24,
            off_peak_rate: 0.18,
            feed_in_tariff: 0.08,
            daily_supply_charge: 0.9,
        }
    }

    fn usage(daily: f64, peak: f64, shoulder: f64, off_peak: f64) -> UsagePattern {
        UsagePattern {
            average_daily_consumption_kwh: daily,
            peak_fraction: peak,
            shoulder_fraction: shoulder,
            off_peak_fraction: off_peak,
            daytime_fraction: 0.3,
        }
    }

    #[test]
    fn normalised_fractions_sum_to_one() {
        let (p, s, o) = normalise_fractions(0.5, 0.4, 0.3);
        assert!((p + s + o - 1.0).abs() < 1e-9);
        assert!((p - 0.5 / 1.2).abs() < 1e-9);
    }

    #[test]
    fn zero_sum_falls_back_to_equal_thirds() {
        let (p, s, o) = normalise_fractions(0.0, 0.0, 0.0);
        assert_eq!(p, 1.0 / 3.0);
        assert_eq!(s, 1.0 / 3.0);
        assert_eq!(o, 1.0 / 3.0);
    }

    #[test]
    fn negative_sum_falls_back_to_equal_thirds() {
        // The fallback threshold is sum <= 0, not == 0.
        let (p, s, o) = normalise_fractions(0.2, -0.5, 0.1);
        assert_eq!(p, 1.0 / 3.0);
        assert_eq!(s, 1.0 / 3.0);
        assert_eq!(o, 1.0 / 3.0);
    }

    #[test]
    fn already_normalised_fractions_pass_through() {
        let (p, s, o) = normalise_fractions(0.4, 0.35, 0.25);
        assert!((p - 0.4).abs() < 1e-9);
        assert!((s - 0.35).abs() < 1e-9);
        assert!((o - 0.25).abs() < 1e-9);
    }

    #[test]
    fn baseline_split_and_cost() {
        let baseline = compute(&usage(20.0, 0.4, 0.35, 0.25), &tariff());
        assert!((baseline.annual_consumption_kwh - 7300.0).abs() < 1e-9);
        assert!((baseline.draw.peak_kwh - 2920.0).abs() < 1e-9);
        assert!((baseline.draw.shoulder_kwh - 2555.0).abs() < 1e-9);
        assert!((baseline.draw.off_peak_kwh - 1825.0).abs() < 1e-9);
        // 2920*0.32 + 2555*0.24 + 1825*0.18 + 0.9*365
        assert!((baseline.annual_cost - 2204.6).abs() < 1e-9);
    }

    #[test]
    fn negative_daily_consumption_treated_as_zero() {
        let baseline = compute(&usage(-5.0, 0.4, 0.35, 0.25), &tariff());
        assert_eq!(baseline.annual_consumption_kwh, 0.0);
        assert_eq!(baseline.draw.peak_kwh, 0.0);
        // Only the supply charge remains.
        assert!((baseline.annual_cost - 328.5).abs() < 1e-9);
    }
}
