//! CLI definition and dispatch.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::report_target::ReportTarget;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::aggregator::{CashFlowAggregator, OrderingStrategy};
use crate::domain::date_parser::parse_trade_date;
use crate::domain::error::SettlementError;
use crate::domain::sample::demo_instructions;
use crate::domain::settings::{
    build_report_settings, validate_report_config, OutputFormat, ReportSettings, MAX_PRECISION,
};
use crate::domain::trade::{TradeInstruction, TradeRecord};
use crate::ports::report_port::ReportPort;
use crate::ports::trade_port::TradePort;

#[derive(Parser, Debug)]
#[command(name = "settlr", about = "Settlement date cash flow reporter")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report settlement totals for a CSV trade file
    Report {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ordering: Option<OrderingStrategy>,
        #[arg(long)]
        format: Option<OutputFormat>,
        #[arg(long)]
        precision: Option<usize>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report settlement totals for the built-in sample trades
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ordering: Option<OrderingStrategy>,
    },
    /// Print the adjusted settlement date for a date and currency
    Adjust {
        #[arg(long)]
        date: String,
        #[arg(long)]
        currency: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate every trade in a CSV file without reporting
    Validate {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Report {
            trades,
            config,
            ordering,
            format,
            precision,
            output,
        } => load_settings(config.as_ref()).and_then(|settings| {
            let settings = apply_overrides(settings, ordering, format, precision)?;
            let report_port = build_report_port(&settings, output);
            run_report_pipeline(&CsvAdapter::new(trades), report_port.as_ref(), &settings)
        }),
        Command::Demo { config, ordering } => load_settings(config.as_ref()).and_then(|settings| {
            let settings = apply_overrides(settings, ordering, None, None)?;
            let report_port = build_report_port(&settings, None);
            run_report_pipeline(&DemoTrades, report_port.as_ref(), &settings)
        }),
        Command::Adjust {
            date,
            currency,
            config,
        } => load_settings(config.as_ref()).and_then(|settings| {
            let adjusted = run_adjust(&date, &currency, &settings)?;
            println!("{adjusted}");
            Ok(())
        }),
        Command::Validate { trades, config } => load_settings(config.as_ref())
            .and_then(|settings| run_validate(&CsvAdapter::new(trades), &settings)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Settings from an optional INI file; defaults when no file is given.
pub fn load_settings(path: Option<&PathBuf>) -> Result<ReportSettings, SettlementError> {
    let Some(path) = path else {
        return Ok(ReportSettings::default());
    };

    tracing::info!(path = %path.display(), "loading config");
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| SettlementError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    validate_report_config(&adapter)?;
    build_report_settings(&adapter)
}

/// Command-line flags take precedence over config values.
pub fn apply_overrides(
    mut settings: ReportSettings,
    ordering: Option<OrderingStrategy>,
    format: Option<OutputFormat>,
    precision: Option<usize>,
) -> Result<ReportSettings, SettlementError> {
    if let Some(o) = ordering {
        settings.ordering = o;
    }
    if let Some(f) = format {
        settings.format = f;
    }
    if let Some(p) = precision {
        if !(1..=MAX_PRECISION).contains(&p) {
            return Err(SettlementError::ConfigInvalid {
                section: "report".into(),
                key: "precision".into(),
                reason: format!("precision must be between 1 and {MAX_PRECISION}, got {p}"),
            });
        }
        settings.precision = p;
    }
    Ok(settings)
}

pub fn build_report_port(settings: &ReportSettings, output: Option<PathBuf>) -> Box<dyn ReportPort> {
    let target = ReportTarget::from_option(output);
    match settings.format {
        OutputFormat::Text => Box::new(TextReportAdapter::new(target, settings.precision)),
        OutputFormat::Csv => Box::new(CsvReportAdapter::new(target, settings.precision)),
    }
}

/// Validate and settle every instruction. The first invalid record aborts
/// the whole run.
pub fn build_aggregator(
    instructions: Vec<TradeInstruction>,
    settings: &ReportSettings,
) -> Result<CashFlowAggregator, SettlementError> {
    let mut aggregator = CashFlowAggregator::new(settings.calendar.clone(), settings.ordering)
        .with_empty_side(settings.empty_side);
    for (index, instruction) in instructions.into_iter().enumerate() {
        let trade = TradeRecord::new(instruction).inspect_err(|e| {
            tracing::warn!(trade = index + 1, field = e.field, "rejected trade");
        })?;
        aggregator.add(trade).inspect_err(|e| {
            tracing::warn!(trade = index + 1, error = %e, "unreadable settlement date");
        })?;
    }
    Ok(aggregator)
}

pub fn run_report_pipeline(
    trade_port: &dyn TradePort,
    report_port: &dyn ReportPort,
    settings: &ReportSettings,
) -> Result<(), SettlementError> {
    let instructions = trade_port.load_trades()?;
    tracing::info!(
        trades = instructions.len(),
        ordering = %settings.ordering,
        "aggregating trades"
    );

    let aggregator = build_aggregator(instructions, settings)?;
    report_port.write(&aggregator.report())
}

pub fn run_adjust(
    date: &str,
    currency: &str,
    settings: &ReportSettings,
) -> Result<String, SettlementError> {
    let parsed = parse_trade_date(date)?;
    let adjusted = settings.calendar.adjust(parsed, currency);
    tracing::info!(raw = %parsed, adjusted = %adjusted, currency, "adjusted date");
    Ok(adjusted.to_string())
}

/// Check every row and report all failures rather than stopping at the first.
pub fn run_validate(
    trade_port: &dyn TradePort,
    settings: &ReportSettings,
) -> Result<(), SettlementError> {
    let instructions = trade_port.load_trades()?;
    let total = instructions.len();
    let mut first_error: Option<SettlementError> = None;

    for (index, instruction) in instructions.into_iter().enumerate() {
        let checked = TradeRecord::new(instruction)
            .map_err(SettlementError::from)
            .and_then(|trade| {
                trade
                    .adjusted_settlement_date(&settings.calendar)
                    .map_err(SettlementError::from)
            });
        if let Err(e) = checked {
            eprintln!("  trade {}: {}", index + 1, e);
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => {
            eprintln!("{total} trades valid");
            Ok(())
        }
    }
}

/// Trade source backed by the built-in sample set.
pub struct DemoTrades;

impl TradePort for DemoTrades {
    fn load_trades(&self) -> Result<Vec<TradeInstruction>, SettlementError> {
        Ok(demo_instructions())
    }
}
