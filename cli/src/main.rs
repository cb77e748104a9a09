//! Reading charges CLI
//!
//! Values one or more meter readings against the configured rate table and
//! prints the charges.
//!
//! ```sh
//! # Reading from flags, default config (~/.config/reading-charges/config.toml)
//! reading-charges --customer Ivan --quantity 10 --month 5 --year 2017
//!
//! # Reading(s) acquired from a JSON file, full statement as JSON
//! reading-charges --input readings.json --report full --json
//!
//! # Validate config without valuing anything
//! reading-charges --config ./config.toml --check
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use reading_charges::bootstrap::load_config_or_default;
use reading_charges::{
    resolve_config_path, AppResult, BillingService, ChargeStatement, DomainResult, RawReading,
};

/// Value meter readings: base charge and taxable charge.
#[derive(Parser, Debug)]
#[command(name = "reading-charges", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "READING_CHARGES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    /// JSON file holding one reading object or an array of them.
    #[arg(short, long, conflicts_with_all = ["quantity", "month", "year"])]
    input: Option<PathBuf>,

    #[arg(long, default_value = "anonymous")]
    customer: String,

    #[arg(long, required_unless_present_any = ["input", "check"])]
    quantity: Option<Decimal>,

    #[arg(long, required_unless_present_any = ["input", "check"])]
    month: Option<u32>,

    #[arg(long, required_unless_present_any = ["input", "check"])]
    year: Option<i32>,

    /// Which charges to print.
    #[arg(long, value_enum, default_value_t = Report::Taxable)]
    report: Report,

    /// Print full statements as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Report {
    /// Base charge only
    Base,
    /// Base and taxable charge
    Taxable,
    /// Every statement field
    Full,
}

/// Readings file: a single object or a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReadingInput {
    One(RawReading),
    Many(Vec<RawReading>),
}

impl ReadingInput {
    fn into_vec(self) -> Vec<RawReading> {
        match self {
            ReadingInput::One(reading) => vec![reading],
            ReadingInput::Many(readings) => readings,
        }
    }
}

fn acquire_readings(path: &Path) -> AppResult<Vec<RawReading>> {
    let contents = std::fs::read_to_string(path)?;
    let input: ReadingInput = serde_json::from_str(&contents)?;
    Ok(input.into_vec())
}

fn render(service: &BillingService, raw: &RawReading, report: Report) -> DomainResult<String> {
    match report {
        Report::Base => Ok(format!("base charge is {}", service.base_charge(raw)?)),
        Report::Taxable => {
            let statement = service.value_reading(raw)?;
            Ok(format!(
                "base charge is {}\ntaxable charge is {}",
                statement.base_charge, statement.taxable_charge
            ))
        }
        Report::Full => Ok(service.value_reading(raw)?.to_string()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(resolve_config_path);
    let config = load_config_or_default(&config_path, cli.log_level.as_deref());

    let rates = match config.rate_table() {
        Ok(rates) => rates,
        Err(e) => {
            error!("Invalid tariff configuration: {}", e);
            eprintln!("error: invalid tariff configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        let periods = rates.periods();
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Rate periods: {}", periods.len());
        if let (Some(first), Some(last)) = (periods.first(), periods.last()) {
            println!("   Rate range  : {} .. {}", first, last);
        }
        let years: Vec<String> = rates.threshold_years().map(|y| y.to_string()).collect();
        println!("   Thresholds  : {}", years.join(", "));
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    // ── Acquire readings ───────────────────────────────────────
    let readings = match (&cli.input, cli.quantity, cli.month, cli.year) {
        (Some(path), ..) => match acquire_readings(path) {
            Ok(readings) => readings,
            Err(e) => {
                eprintln!("error: cannot read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, Some(quantity), Some(month), Some(year)) => {
            vec![RawReading::new(cli.customer.clone(), quantity, month, year)]
        }
        _ => {
            eprintln!("error: provide --input or all of --quantity, --month and --year");
            return ExitCode::FAILURE;
        }
    };
    info!("Valuing {} reading(s)", readings.len());

    let service = BillingService::new(std::sync::Arc::new(rates));

    if cli.json {
        let results = service.value_batch(&readings);
        let failed = results.iter().filter(|r| r.is_err()).count();
        let statements: Vec<ChargeStatement> = results
            .into_iter()
            .filter_map(|r| r.map_err(|e| eprintln!("error: {}", e)).ok())
            .collect();
        match serde_json::to_string_pretty(&statements) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return if failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let mut failed = false;
    for (i, raw) in readings.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match render(&service, raw, cli.report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: {} ({}): {}", raw.customer, i + 1, e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
