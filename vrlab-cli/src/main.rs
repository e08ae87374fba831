//! VRLab CLI — variance-ratio runs over a daily price-level table.
//!
//! Commands:
//! - `run` — align a CSV price table to a weekly series and evaluate the
//!   variance-ratio test at one or more horizons
//! - `inspect` — report how the alignment went (observed, gap-filled, and
//!   dropped days) without running the estimator

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use vrlab_core::{
    build_weekly_series_with_report, evaluate_horizons, load_price_csv, AnalysisConfig,
    MemoryPriceTable, PriceSource,
};

#[derive(Parser)]
#[command(
    name = "vrlab",
    about = "VRLab CLI — variance-ratio test for serial dependence in index returns"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the variance-ratio test over a weekly-aligned series.
    Run {
        /// Path to a date,level CSV price table.
        #[arg(long)]
        data: PathBuf,

        /// Path to a TOML analysis config (overrides the other flags).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Window start (YYYY-MM-DD). Defaults to the table's first date.
        #[arg(long)]
        start: Option<String>,

        /// Window end (YYYY-MM-DD). Defaults to the table's last date.
        #[arg(long)]
        end: Option<String>,

        /// Anchor weekday defining "weekly" (mon..sun).
        #[arg(long, default_value = "wed")]
        weekday: String,

        /// Aggregation horizons in weeks.
        #[arg(long = "q", value_delimiter = ',', default_value = "2,4,8,16")]
        horizons: Vec<usize>,

        /// Write the results as JSON to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Report alignment bookkeeping for a window without estimating.
    Inspect {
        /// Path to a date,level CSV price table.
        #[arg(long)]
        data: PathBuf,

        /// Window start (YYYY-MM-DD). Defaults to the table's first date.
        #[arg(long)]
        start: Option<String>,

        /// Window end (YYYY-MM-DD). Defaults to the table's last date.
        #[arg(long)]
        end: Option<String>,

        /// Anchor weekday defining "weekly" (mon..sun).
        #[arg(long, default_value = "wed")]
        weekday: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            start,
            end,
            weekday,
            horizons,
            export,
        } => run_analysis(&data, config.as_deref(), start, end, &weekday, horizons, export),
        Commands::Inspect {
            data,
            start,
            end,
            weekday,
        } => run_inspect(&data, start, end, &weekday),
    }
}

fn run_analysis(
    data: &Path,
    config_path: Option<&Path>,
    start: Option<String>,
    end: Option<String>,
    weekday: &str,
    horizons: Vec<usize>,
    export: Option<PathBuf>,
) -> Result<()> {
    let table = load_price_csv(data)
        .with_context(|| format!("loading price table {}", data.display()))?;

    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<AnalysisConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalysisConfig {
            first_date: resolve_date(start, &table, WindowEdge::First)?,
            last_date: resolve_date(end, &table, WindowEdge::Last)?,
            anchor_weekday: parse_weekday(weekday)?,
            horizons,
        },
    };
    config.validate()?;

    let (series, report) = build_weekly_series_with_report(
        &table,
        config.first_date,
        config.last_date,
        config.anchor_weekday,
    )?;
    let results = evaluate_horizons(&series, &config.horizons)?;

    println!("source {}: {} rows", table.name(), table.len());
    println!(
        "weekly series: {} points on {}, {} .. {}",
        series.len(),
        config.anchor_weekday,
        series.first_date().expect("non-empty series"),
        series.last_date().expect("non-empty series"),
    );
    println!("config id: {}", config.config_id());
    println!();
    println!(
        "{:>5} {:>8} {:>10} {:>10} {:>10} {:>10}",
        "q", "n", "VR", "theta", "z", "p-value"
    );
    for r in &results {
        println!(
            "{:>5} {:>8} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            r.q, r.n, r.variance_ratio, r.theta, r.z_statistic, r.p_value
        );
    }

    if let Some(path) = export {
        let payload = json!({
            "config_id": config.config_id(),
            "source": table.name(),
            "weekly_points": report.weekly_points,
            "results": results,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nwrote {}", path.display());
    }

    Ok(())
}

fn run_inspect(data: &Path, start: Option<String>, end: Option<String>, weekday: &str) -> Result<()> {
    let table = load_price_csv(data)
        .with_context(|| format!("loading price table {}", data.display()))?;
    let first = resolve_date(start, &table, WindowEdge::First)?;
    let last = resolve_date(end, &table, WindowEdge::Last)?;
    let anchor = parse_weekday(weekday)?;

    let (series, report) = build_weekly_series_with_report(&table, first, last, anchor)?;

    println!("source {}: {} rows", table.name(), table.len());
    println!("window: {first} .. {last}, anchor {anchor}");
    println!("  calendar days:   {:>7}", report.total_days);
    println!("  observed days:   {:>7}", report.observed_days);
    println!("  gap-filled days: {:>7}", report.filled_days);
    println!("  dropped (tail):  {:>7}", report.dropped_trailing_days);
    println!("  weekly points:   {:>7}", report.weekly_points);
    println!(
        "  weekly span:     {} .. {}",
        series.first_date().expect("non-empty series"),
        series.last_date().expect("non-empty series"),
    );

    Ok(())
}

enum WindowEdge {
    First,
    Last,
}

/// Parse a `YYYY-MM-DD` flag, falling back to the table's own span.
fn resolve_date(
    flag: Option<String>,
    table: &MemoryPriceTable,
    edge: WindowEdge,
) -> Result<NaiveDate> {
    if let Some(text) = flag {
        return NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .with_context(|| format!("cannot parse date '{text}', expected YYYY-MM-DD"));
    }
    let Some((first, last)) = table.span() else {
        bail!("price table is empty and no explicit window was given");
    };
    Ok(match edge {
        WindowEdge::First => first,
        WindowEdge::Last => last,
    })
}

fn parse_weekday(text: &str) -> Result<Weekday> {
    text.parse::<Weekday>()
        .map_err(|_| anyhow!("unrecognized weekday '{text}', expected mon..sun"))
}
