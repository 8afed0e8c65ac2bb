//! Solar sizer entry point: CLI wiring and config-driven sizing.

use std::path::Path;
use std::process;

use solar_sizer::catalog;
use solar_sizer::config::ScenarioConfig;
use solar_sizer::error::SizerError;
use solar_sizer::io::export::export_csv;
use solar_sizer::logging;
use solar_sizer::report::ConsultationReport;
use solar_sizer::sizing::engine::{SizingInput, compute_sizing};
use solar_sizer::sizing::types::InputMode;

/// Preset used when neither `--scenario` nor `--preset` is given.
const DEFAULT_PRESET: &str = "family_home";

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    mode: Option<InputMode>,
    bill: Option<f64>,
    region: Option<usize>,
    panel: Option<u32>,
    battery: bool,
    csv_out: Option<String>,
    #[cfg(feature = "advisor")]
    advice: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-sizer - Household rooftop solar sizing");
    eprintln!();
    eprintln!("Usage: solar-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --mode <device|bill>     Override the consumption input mode");
    eprintln!("  --bill <amount>          Override the monthly bill");
    eprintln!(
        "  --region <index>         Use a region's sun hours (0-{})",
        catalog::REGIONS.len() - 1
    );
    eprintln!("  --panel <watts>          Override the panel wattage");
    eprintln!("  --battery                Size a storage battery");
    eprintln!("  --csv-out <path>         Export the appliance breakdown to CSV");
    #[cfg(feature = "advisor")]
    eprintln!("  --advice                 Append generated consultation advice");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after sizing");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the {DEFAULT_PRESET} preset is used.");
}

/// Returns the value following flag `args[*i]`, or exits with an error.
fn take_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

/// Parses a flag value, or exits naming the expected type.
fn parse_value<T: std::str::FromStr>(flag: &str, value: &str, ty: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{value}\" is not a valid {ty}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        mode: None,
        bill: None,
        region: None,
        panel: None,
        battery: false,
        csv_out: None,
        #[cfg(feature = "advisor")]
        advice: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(take_value(&args, &mut i, "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(take_value(&args, &mut i, "a name argument").to_string());
            }
            "--mode" => {
                let v = take_value(&args, &mut i, "\"device\" or \"bill\"");
                match InputMode::parse(v) {
                    Some(m) => cli.mode = Some(m),
                    None => {
                        eprintln!("error: --mode must be \"device\" or \"bill\", got \"{v}\"");
                        process::exit(1);
                    }
                }
            }
            "--bill" => {
                let v = take_value(&args, &mut i, "an amount argument");
                cli.bill = Some(parse_value("--bill", v, "number"));
            }
            "--region" => {
                let v = take_value(&args, &mut i, "an index argument");
                cli.region = Some(parse_value("--region", v, "index"));
            }
            "--panel" => {
                let v = take_value(&args, &mut i, "a wattage argument");
                cli.panel = Some(parse_value("--panel", v, "u32"));
            }
            "--battery" => {
                cli.battery = true;
            }
            "--csv-out" => {
                cli.csv_out = Some(take_value(&args, &mut i, "a path argument").to_string());
            }
            #[cfg(feature = "advisor")]
            "--advice" => {
                cli.advice = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let v = take_value(&args, &mut i, "a u16 argument");
                cli.port = parse_value("--port", v, "u16");
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

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then the default preset.
fn load_scenario(cli: &CliArgs) -> Result<ScenarioConfig, SizerError> {
    let scenario = match cli.scenario_path {
        Some(ref path) => ScenarioConfig::from_toml_file(Path::new(path))?,
        None => ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or(DEFAULT_PRESET))?,
    };
    Ok(scenario)
}

/// Applies command-line overrides on top of the loaded scenario.
fn apply_overrides(cli: &CliArgs, scenario: &mut ScenarioConfig) {
    if let Some(mode) = cli.mode {
        scenario.input.mode = mode;
    }
    if let Some(bill) = cli.bill {
        scenario.input.monthly_bill = bill;
        if cli.mode.is_none() {
            scenario.input.mode = InputMode::Bill;
        }
    }
    if let Some(region) = cli.region {
        scenario.sizing.region = Some(region);
    }
    if let Some(panel) = cli.panel {
        scenario.sizing.panel_wattage = panel;
    }
    if cli.battery {
        scenario.sizing.include_battery = true;
    }
}

#[cfg(any(feature = "advisor", feature = "api"))]
fn new_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    })
}

#[cfg(feature = "advisor")]
fn fetch_advice(
    scenario: &ScenarioConfig,
    request: &solar_sizer::advisory::AdvisoryRequest<'_>,
) -> String {
    use solar_sizer::advisory::{self, MISSING_CREDENTIALS_MESSAGE, SERVICE_ERROR_MESSAGE};
    use solar_sizer::advisory::gemini::GeminiClient;
    use solar_sizer::error::AdvisoryError;

    match GeminiClient::from_config(&scenario.advisor) {
        Ok(client) => new_runtime().block_on(advisory::consult(&client, request)),
        Err(AdvisoryError::MissingCredentials(var)) => {
            tracing::error!("advisory skipped: {var} is not set");
            MISSING_CREDENTIALS_MESSAGE.to_string()
        }
        Err(e) => {
            tracing::error!("advisory client unavailable: {e}");
            SERVICE_ERROR_MESSAGE.to_string()
        }
    }
}

fn main() {
    logging::init();
    let cli = parse_args();

    let mut scenario = load_scenario(&cli).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    apply_overrides(&cli, &mut scenario);

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let resolved = scenario.resolve().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let inverters = catalog::inverters();
    let loads = resolved.appliances.loads();
    let result = compute_sizing(&SizingInput {
        mode: resolved.mode,
        loads,
        monthly_bill: resolved.monthly_bill,
        config: &resolved.sizing,
        inverters: &inverters,
    });

    let report = ConsultationReport::build(loads, &resolved.sizing, &result);

    #[cfg(feature = "advisor")]
    let report = if cli.advice {
        let request = solar_sizer::advisory::AdvisoryRequest {
            loads,
            config: &resolved.sizing,
            result: &result,
        };
        report.with_advice(fetch_advice(&scenario, &request))
    } else {
        report
    };

    println!("{report}");

    // Export CSV if requested
    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(loads, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Appliance breakdown written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_sizer::api::AppState::new(resolved, inverters));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        if let Err(e) = new_runtime().block_on(solar_sizer::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
