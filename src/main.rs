//! Calculator entry point — CLI wiring and config-driven engine invocation.

use std::path::Path;
use std::process;

use renewables_roi::calc::calculate;
use renewables_roi::config::ScenarioConfig;
use renewables_roi::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    years_override: Option<u32>,
    discount_rate_override: Option<f64>,
    result_out: Option<String>,
}

fn print_help() {
    eprintln!("renewables-roi — Domestic renewables investment calculator");
    eprintln!();
    eprintln!("Usage: renewables-roi [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --years <n>              Override analysis period in years");
    eprintln!("  --discount-rate <pct>    Override discount rate in percent");
    eprintln!("  --result-out <path>      Export the result snapshot to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        years_override: None,
        discount_rate_override: None,
        result_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--years" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --years requires a year-count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<u32>() {
                    cli.years_override = Some(n);
                } else {
                    eprintln!("error: --years value \"{}\" is not a valid u32", args[i]);
                    process::exit(1);
                }
            }
            "--discount-rate" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --discount-rate requires a percentage argument");
                    process::exit(1);
                }
                if let Ok(pct) = args[i].parse::<f64>() {
                    cli.discount_rate_override = Some(pct);
                } else {
                    eprintln!(
                        "error: --discount-rate value \"{}\" is not a valid number",
                        args[i]
                    );
                    process::exit(1);
                }
            }
            "--result-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --result-out requires a path argument");
                    process::exit(1);
                }
                cli.result_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply analysis overrides
    if let Some(years) = cli.years_override {
        scenario.analysis.analysis_years = years;
    }
    if let Some(pct) = cli.discount_rate_override {
        scenario.analysis.discount_rate_pct = pct;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // The engine renormalises regardless; this message is informational only.
    if (scenario.usage_pct_total() - 100.0).abs() > 0.01 {
        eprintln!("note: usage percentages do not sum to 100% and will be normalised");
    }

    let inputs = scenario.to_inputs();
    let result = calculate(
        &inputs.tariff,
        &inputs.usage,
        &inputs.solar,
        &inputs.battery,
        &inputs.hot_water,
        &inputs.options,
    );

    println!("{result}");

    // Export CSV if requested
    if let Some(ref path) = cli.result_out {
        if let Err(e) = export_csv(&result, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Result written to {path}");
    }
}
