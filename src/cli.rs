//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::{debug, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::breakdown::{BreakdownKey, breakdown, compare_strategies};
use crate::domain::config_validation::validate_journal_config;
use crate::domain::distribution::r_distribution;
use crate::domain::error::JournalError;
use crate::domain::journal::{Journal, TradeFilter};
use crate::domain::metrics::{ProfitSummary, compute_metrics};
use crate::domain::report::{
    BreakdownReport, DistributionReport, Report, ReportContext, StatsReport,
};
use crate::domain::strategy::{BreakevenStrategy, DEFAULT_MIN_SAMPLE, MetricsOptions, RTargetMode};
use crate::domain::trade::{Bias, Session};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::{ReportFormat, ReportPort};
use crate::ports::trade_port::{SourceFormat, TradeSource};

#[derive(Parser, Debug)]
#[command(name = "tradejournal", about = "Trading journal performance analysis")]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Performance summary under one breakeven strategy
    Stats(AnalysisArgs),
    /// Compare NO_BE, BE_1R and BE_2R on the same trades
    Compare(AnalysisArgs),
    /// Metrics per session, bias or weekday
    Breakdown {
        #[arg(long, default_value = "session")]
        by: BreakdownKey,
        #[command(flatten)]
        args: AnalysisArgs,
    },
    /// Histogram of maximum favorable excursion
    Distribution(AnalysisArgs),
    /// Validate configuration and check how the journal normalizes
    Validate(AnalysisArgs),
}

/// Options shared by every analysis command. Each overrides its config key.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Journal file (.json or .csv)
    #[arg(short, long)]
    pub source: Option<PathBuf>,
    #[arg(long)]
    pub source_format: Option<SourceFormat>,
    /// NO_BE, BE_1R or BE_2R
    #[arg(long)]
    pub strategy: Option<BreakevenStrategy>,
    /// Target in R, or "per_trade"
    #[arg(long)]
    pub r_target: Option<RTargetMode>,
    #[arg(long)]
    pub min_sample: Option<usize>,
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long)]
    pub session: Option<String>,
    #[arg(long)]
    pub bias: Option<String>,
    /// text or json
    #[arg(long)]
    pub format: Option<ReportFormat>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything one analysis run needs, after merging config and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: PathBuf,
    pub source_format: SourceFormat,
    pub options: MetricsOptions,
    pub min_sample: usize,
    pub filter: TradeFilter,
    pub report_format: ReportFormat,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    Stats,
    Compare,
    Breakdown(BreakdownKey),
    Distribution,
}

pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "tradejournal=debug"
    } else {
        "tradejournal=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Stats(args) => run_analysis(Analysis::Stats, &args),
        Command::Compare(args) => run_analysis(Analysis::Compare, &args),
        Command::Breakdown { by, args } => run_analysis(Analysis::Breakdown(by), &args),
        Command::Distribution(args) => run_analysis(Analysis::Distribution, &args),
        Command::Validate(args) => run_validate(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, JournalError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    debug!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path).map_err(|e| JournalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> JournalError {
    JournalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Config value parsed with `FromStr`. Run validation first; an unparseable
/// value reads as missing here.
fn parsed<T: FromStr>(config: &dyn ConfigPort, section: &str, key: &str) -> Option<T> {
    config
        .get_string(section, key)
        .and_then(|s| s.trim().parse().ok())
}

/// Merge validated config with command-line overrides.
pub fn build_settings(
    config: &dyn ConfigPort,
    args: &AnalysisArgs,
) -> Result<Settings, JournalError> {
    validate_journal_config(config)?;

    let source = match &args.source {
        Some(p) => p.clone(),
        None => config
            .get_string("journal", "source")
            .map(PathBuf::from)
            .ok_or_else(|| JournalError::ConfigMissing {
                section: "journal".into(),
                key: "source".into(),
            })?,
    };

    let source_format = args
        .source_format
        .or_else(|| parsed(config, "journal", "format"))
        .unwrap_or_else(|| SourceFormat::from_path(&source));

    let options = MetricsOptions {
        r_target: args
            .r_target
            .or_else(|| parsed(config, "analysis", "r_target"))
            .unwrap_or_default(),
        breakeven_strategy: args
            .strategy
            .or_else(|| parsed(config, "analysis", "breakeven_strategy"))
            .unwrap_or_default(),
    };

    let min_sample = args
        .min_sample
        .or_else(|| parsed(config, "analysis", "min_sample"))
        .unwrap_or(DEFAULT_MIN_SAMPLE);
    if min_sample == 0 {
        return Err(invalid(
            "analysis",
            "min_sample",
            "min_sample must be a whole number of at least 1",
        ));
    }

    let filter = build_filter(config, args)?;

    Ok(Settings {
        source,
        source_format,
        options,
        min_sample,
        filter,
        report_format: args
            .format
            .or_else(|| parsed(config, "report", "format"))
            .unwrap_or_default(),
        output: args
            .output
            .clone()
            .or_else(|| config.get_string("report", "output").map(PathBuf::from)),
    })
}

fn build_filter(config: &dyn ConfigPort, args: &AnalysisArgs) -> Result<TradeFilter, JournalError> {
    let from = args.from.or_else(|| parsed(config, "filter", "from"));
    let to = args.to.or_else(|| parsed(config, "filter", "to"));
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(invalid("filter", "from", "from must not be after to"));
        }
    }

    let session = args
        .session
        .clone()
        .or_else(|| config.get_string("filter", "session"))
        .map(|s| Session::parse(&s));

    let bias = match args.bias.clone().or_else(|| config.get_string("filter", "bias")) {
        None => None,
        Some(b) => Some(Bias::parse(&b).ok_or_else(|| {
            invalid(
                "filter",
                "bias",
                format!("unknown bias '{}' (expected LONG or SHORT)", b),
            )
        })?),
    };

    Ok(TradeFilter {
        from,
        to,
        session,
        bias,
    })
}

pub fn open_source(path: &Path, format: SourceFormat) -> Box<dyn TradeSource> {
    match format {
        SourceFormat::Json => Box::new(JsonAdapter::new(path.to_path_buf())),
        SourceFormat::Csv => Box::new(CsvAdapter::new(path.to_path_buf())),
    }
}

pub fn report_adapter(format: ReportFormat) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Text => Box::new(TextReportAdapter),
        ReportFormat::Json => Box::new(JsonReportAdapter),
    }
}

/// Load, normalize and filter the journal into one snapshot.
pub fn load_journal(
    source: &dyn TradeSource,
    settings: &Settings,
) -> Result<(Journal, ReportContext), JournalError> {
    let records = source.load_records()?;
    let loaded = Journal::from_raw(&records);
    let rejected = loaded.rejected.len();
    let journal = loaded.journal.filter(&settings.filter);

    info!(
        source = %source.describe(),
        loaded = records.len(),
        rejected,
        analysed = journal.len(),
        active = journal.active_count(),
        "journal loaded"
    );

    if journal.is_empty() {
        return Err(JournalError::NoTrades {
            loaded: records.len(),
            rejected,
        });
    }

    let context = ReportContext {
        source: source.describe(),
        loaded: records.len(),
        rejected,
        analysed: journal.len(),
        options: settings.options,
    };
    Ok((journal, context))
}

/// Run one analysis over a journal snapshot.
pub fn analyse(
    analysis: Analysis,
    journal: &Journal,
    context: ReportContext,
    settings: &Settings,
) -> Report {
    let trades = journal.trades();
    let options = &settings.options;
    match analysis {
        Analysis::Stats => Report::Stats(StatsReport {
            context,
            metrics: compute_metrics(trades, options),
            profit: ProfitSummary::compute(trades),
        }),
        Analysis::Compare => Report::Compare(BreakdownReport {
            context,
            breakdown: compare_strategies(trades, options.r_target, settings.min_sample),
        }),
        Analysis::Breakdown(key) => Report::Breakdown(BreakdownReport {
            context,
            breakdown: breakdown(trades, options, key, settings.min_sample),
        }),
        Analysis::Distribution => Report::Distribution(DistributionReport {
            context,
            distribution: r_distribution(trades, options.breakeven_strategy),
        }),
    }
}

pub fn run_analysis(analysis: Analysis, args: &AnalysisArgs) -> Result<(), JournalError> {
    let config = load_config(args.config.as_ref())?;
    let settings = build_settings(&config, args)?;

    let source = open_source(&settings.source, settings.source_format);
    let (journal, context) = load_journal(source.as_ref(), &settings)?;
    let report = analyse(analysis, &journal, context, &settings);

    report_adapter(settings.report_format).write(&report, settings.output.as_deref())?;
    if let Some(ref output) = settings.output {
        eprintln!("Report written to: {}", output.display());
    }
    Ok(())
}

fn run_validate(args: &AnalysisArgs) -> Result<(), JournalError> {
    let config = load_config(args.config.as_ref())?;
    validate_journal_config(&config)?;
    eprintln!("Config validated successfully");

    if args.source.is_none() && config.get_string("journal", "source").is_none() {
        eprintln!("No journal source configured; skipping trade checks.");
        return Ok(());
    }

    let settings = build_settings(&config, args)?;
    eprintln!(
        "\nAnalysis: {} @ {}, min sample {}",
        settings.options.breakeven_strategy, settings.options.r_target, settings.min_sample
    );

    let source = open_source(&settings.source, settings.source_format);
    let records = source.load_records()?;
    let loaded = Journal::from_raw(&records);

    eprintln!("\nJournal: {}", source.describe());
    eprintln!("  records:  {}", records.len());
    eprintln!("  accepted: {}", loaded.journal.len());
    eprintln!("  active:   {}", loaded.journal.active_count());
    eprintln!("  rejected: {}", loaded.rejected.len());
    for e in &loaded.rejected {
        eprintln!("    {}", e);
    }

    let trades = loaded.journal.trades();
    if let (Some(first), Some(last)) = (
        trades.iter().map(|t| t.date).min(),
        trades.iter().map(|t| t.date).max(),
    ) {
        eprintln!("  dates:    {} to {}", first, last);
    }

    if !settings.filter.is_empty() {
        let filtered = loaded.journal.filter(&settings.filter);
        eprintln!("  after filter: {}", filtered.len());
    }

    eprintln!("\nJournal is valid.");
    Ok(())
}
