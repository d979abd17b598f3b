//! CSV export for investment result snapshots.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::InvestmentResult;

/// Schema v1 column header for CSV result export.
const HEADER: &str = "baseline_annual_kwh,baseline_peak_kwh,baseline_shoulder_kwh,\
                      baseline_off_peak_kwh,baseline_annual_cost,solar_generation_kwh,\
                      solar_self_consumption_kwh,solar_export_kwh,battery_solar_charge_kwh,\
                      battery_off_peak_charge_kwh,battery_discharge_kwh,battery_peak_offset_kwh,\
                      battery_shoulder_offset_kwh,hot_water_shifted_kwh,hot_water_added_off_peak_kwh,\
                      grid_peak_kwh,grid_shoulder_kwh,grid_off_peak_kwh,annual_feed_in_revenue,\
                      annual_grid_cost,annual_maintenance_cost,annual_operating_cost,\
                      annual_net_savings,total_upfront_cost,simple_payback_years,\
                      net_present_value,total_net_savings,simple_roi";

/// Exports a result snapshot to a CSV file at the given path.
///
/// Writes a header row followed by one data row using the schema v1 column
/// layout. Produces deterministic output for identical inputs. An undefined
/// payback is written as an empty field.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &InvestmentResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, buf)
}

/// Writes a result snapshot as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &InvestmentResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    let payback = result
        .simple_payback_years
        .map_or(String::new(), |y| format!("{y:.4}"));

    wtr.write_record(&[
        format!("{:.4}", result.baseline_annual_consumption_kwh),
        format!("{:.4}", result.baseline_peak_kwh),
        format!("{:.4}", result.baseline_shoulder_kwh),
        format!("{:.4}", result.baseline_off_peak_kwh),
        format!("{:.4}", result.baseline_annual_cost),
        format!("{:.4}", result.solar_generation_kwh),
        format!("{:.4}", result.solar_self_consumption_kwh),
        format!("{:.4}", result.solar_export_kwh),
        format!("{:.4}", result.battery_solar_charge_kwh),
        format!("{:.4}", result.battery_off_peak_charge_kwh),
        format!("{:.4}", result.battery_discharge_kwh),
        format!("{:.4}", result.battery_peak_offset_kwh),
        format!("{:.4}", result.battery_shoulder_offset_kwh),
        format!("{:.4}", result.hot_water_shifted_kwh),
        format!("{:.4}", result.hot_water_added_off_peak_kwh),
        format!("{:.4}", result.grid_peak_kwh),
        format!("{:.4}", result.grid_shoulder_kwh),
        format!("{:.4}", result.grid_off_peak_kwh),
        format!("{:.4}", result.annual_feed_in_revenue),
        format!("{:.4}", result.annual_grid_cost),
        format!("{:.4}", result.annual_maintenance_cost),
        format!("{:.4}", result.annual_operating_cost),
        format!("{:.4}", result.annual_net_savings),
        format!("{:.4}", result.total_upfront_cost),
        payback,
        format!("{:.4}", result.net_present_value),
        format!("{:.4}", result.total_net_savings),
        format!("{:.4}", result.simple_roi),
    ])?;

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate;
    use crate::config::ScenarioConfig;

    fn sample_result() -> InvestmentResult {
        let i = ScenarioConfig::baseline().to_inputs();
        calculate(
            &i.tariff,
            &i.usage,
            &i.solar,
            &i.battery,
            &i.hot_water,
            &i.options,
        )
    }

    #[test]
    fn header_matches_schema_v1() {
        let mut buf = Vec::new();
        write_csv(&sample_result(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert!(first_line.starts_with("baseline_annual_kwh,baseline_peak_kwh,"));
        assert!(first_line.ends_with(",net_present_value,total_net_savings,simple_roi"));
        assert_eq!(first_line.split(',').count(), 28);
    }

    #[test]
    fn one_header_and_one_data_row() {
        let mut buf = Vec::new();
        write_csv(&sample_result(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn deterministic_output() {
        let result = sample_result();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&result, &mut buf1).ok();
        write_csv(&result, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&sample_result(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(28));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // All columns parse as f64; payback (index 24) may be empty.
            for i in 0..28 {
                let raw = &rec.unwrap()[i];
                if i == 24 && raw.is_empty() {
                    continue;
                }
                let val: Result<f64, _> = raw.parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 1);
    }

    #[test]
    fn undefined_payback_written_as_empty_field() {
        let mut result = sample_result();
        result.simple_payback_years = None;
        let mut buf = Vec::new();
        write_csv(&result, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let data_line = output.as_deref().unwrap_or("").lines().nth(1).unwrap_or("");
        let fields: Vec<&str> = data_line.split(',').collect();
        assert_eq!(fields[24], "");
    }
}
