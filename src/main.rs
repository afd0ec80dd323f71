// ContentCal - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Criteria assembly (JSON file/stdin + per-field flag overrides)
// 4. Search over a CSV calendar export and result output on stdout

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use contentcal::app::search::{run_search, SearchOutcome};
use contentcal::app::source::CsvFileSource;
use contentcal::core::criteria::{CriteriaOverrides, FilterCriteria};
use contentcal::core::date_range::{parse_date, DateRangeKind};
use contentcal::core::export;
use contentcal::core::model::SearchContext;
use contentcal::platform::config::{load_config, PlatformPaths};
use contentcal::util;
use contentcal::util::error::{ContentCalError, SearchError};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code when the search ran but reported an error in its result.
const EXIT_SEARCH_ERROR: u8 = 1;

/// Exit code for usage, criteria-file, or output failures.
const EXIT_USAGE_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full SearchResult document.
    Json,
    /// Returned records only, in calendar sheet column order.
    Csv,
}

/// ContentCal - search a social media content calendar export.
///
/// Filters the rows of a calendar CSV by keyword, exact field values, week
/// and date range, and prints the first matches plus the true match count.
#[derive(Parser, Debug)]
#[command(name = "contentcal", version, about)]
struct Cli {
    /// CSV export of the content calendar sheet (first row is the header).
    table: PathBuf,

    /// JSON criteria file, or "-" for stdin. Flags below override its fields.
    #[arg(short = 'c', long = "criteria")]
    criteria: Option<String>,

    /// Case-insensitive keyword over ID, content idea and notes.
    #[arg(short = 'k', long)]
    keyword: Option<String>,

    /// Exact status ("All" = any).
    #[arg(long)]
    status: Option<String>,

    /// Exact channel ("All" = any).
    #[arg(long)]
    channel: Option<String>,

    /// Exact content pillar ("All" = any).
    #[arg(long)]
    pillar: Option<String>,

    /// Exact post format ("All" = any).
    #[arg(long)]
    format: Option<String>,

    /// Exact assignee ("All" = any).
    #[arg(long)]
    assignee: Option<String>,

    /// Week number.
    #[arg(short = 'w', long)]
    week: Option<i64>,

    /// Date range: "All Time", "This Week", "Last 7 Days", "Next 7 Days",
    /// "This Month", "Last Month" or "custom".
    #[arg(short = 'r', long, value_parser = parse_range)]
    range: Option<DateRangeKind>,

    /// Start date for a custom range (implies --range custom).
    #[arg(long)]
    start: Option<String>,

    /// End date for a custom range (implies --range custom).
    #[arg(long)]
    end: Option<String>,

    /// Date to treat as today when resolving relative ranges.
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Maximum records returned (overrides [search] result_limit).
    #[arg(short = 'l', long)]
    limit: Option<usize>,

    /// Output format.
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,

    /// Include a status/channel breakdown of all matches.
    #[arg(short = 's', long)]
    summary: bool,

    /// Config file (defaults to the platform config directory).
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    /// Per-field flags as overrides for the JSON criteria.
    fn overrides(&self) -> CriteriaOverrides {
        CriteriaOverrides {
            keyword: self.keyword.clone(),
            status: self.status.clone(),
            channel: self.channel.clone(),
            pillar: self.pillar.clone(),
            format: self.format.clone(),
            assignee: self.assignee.clone(),
            week: self.week,
            range: self.range,
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

fn parse_range(s: &str) -> Result<DateRangeKind, String> {
    DateRangeKind::from_label(s).ok_or_else(|| {
        let labels: Vec<_> = DateRangeKind::all().iter().map(|k| k.label()).collect();
        format!("unknown date range '{s}'; expected one of: {}", labels.join(", "))
    })
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("cannot parse date '{s}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, config_warnings) = load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "ContentCal starting"
    );
    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Config problem; using defaults for affected values");
    }

    match run(&cli, config.result_limit, config.max_source_file_size) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "contentcal failed");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_USAGE_ERROR)
        }
    }
}

fn run(cli: &Cli, config_limit: usize, max_file_size: u64) -> util::error::Result<u8> {
    let ctx = {
        let base = match cli.today {
            Some(today) => SearchContext::new(today),
            None => SearchContext::from_clock(),
        };
        base.with_limit(cli.limit.unwrap_or(config_limit))
    };

    let source = CsvFileSource::new(&cli.table).with_max_file_size(max_file_size);

    let decoded = match cli.criteria.as_deref() {
        None => Ok(Some(FilterCriteria::default())),
        Some(input) => FilterCriteria::from_json_str(&read_criteria_text(input)?),
    };

    let outcome = match decoded {
        Ok(criteria) => {
            let criteria = criteria.map(|mut c| {
                cli.overrides().apply(&mut c);
                c
            });
            run_search(criteria.as_ref(), &source, &ctx, cli.summary)
        }
        // Unreadable criteria file: a usage error, not a search result.
        Err(e @ SearchError::CriteriaSyntax { .. }) => return Err(e.into()),
        Err(e) => {
            // Non-object criteria: still answer with a well-formed result.
            tracing::warn!(error = %e, "Search rejected");
            SearchOutcome::failed(&e, &ctx)
        }
    };

    for row_error in &outcome.row_errors {
        tracing::debug!(error = %row_error, "Row skipped");
    }

    let stdout = std::io::stdout();
    let handle = stdout.lock();
    match cli.output {
        OutputFormat::Json => {
            export::export_json(&outcome.result, outcome.summary.as_ref(), handle)?;
            println!();
        }
        OutputFormat::Csv => {
            export::export_csv(&outcome.result.results, handle)?;
            if let Some(ref summary) = outcome.summary {
                eprintln!(
                    "{} matches ({} undated); by status: {:?}; by channel: {:?}",
                    summary.total, summary.undated, summary.by_status, summary.by_channel
                );
            }
        }
    }

    if outcome.result.is_truncated() {
        eprintln!(
            "Showing {} of {} matches (limit {}).",
            outcome.result.results.len(),
            outcome.result.total_matches,
            outcome.result.limit_applied
        );
    }
    if outcome.rows_skipped > 0 {
        eprintln!(
            "Skipped {} row(s) that could not be read; run with --debug for details.",
            outcome.rows_skipped
        );
    }

    Ok(if outcome.result.is_error() {
        EXIT_SEARCH_ERROR
    } else {
        0
    })
}

fn read_criteria_text(input: &str) -> util::error::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| ContentCalError::Io {
                path: PathBuf::from("<stdin>"),
                operation: "read criteria",
                source: e,
            })?;
        return Ok(text);
    }
    std::fs::read_to_string(input).map_err(|e| ContentCalError::Io {
        path: PathBuf::from(input),
        operation: "read criteria",
        source: e,
    })
}
