//! Tallybook command line.
//!
//! Loads a finance snapshot and prints the dashboard or a report as JSON. Failures
//! exit with the code of their [`AppError`] kind.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tallybook_core::aggregate::ReceivablesAging;
use tallybook_core::dashboard::DashboardService;
use tallybook_core::finance::FinanceState;
use tallybook_core::period::{PeriodKind, resolve_period};
use tallybook_core::records::InvoiceRecord;
use tallybook_core::reports::ReportService;
use tallybook_shared::{AppConfig, AppError, AppResult};
use tallybook_store::{JsonFileSource, load_state};

#[derive(Parser, Debug)]
#[command(name = "tallybook", version, about = "Small-business finance summaries")]
struct Cli {
    /// Snapshot directory (defaults to the configured data dir)
    #[arg(short = 'd', long = "data")]
    data: Option<PathBuf>,

    /// Period granularity: month, quarter or year
    #[arg(short = 'p', long = "period")]
    period: Option<String>,

    /// Day the balance sheet and aging are computed for (defaults to today)
    #[arg(long = "as-of")]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Dashboard summary for the current period
    Dashboard,
    /// Profit and loss for the current period
    Pnl,
    /// Balance sheet
    BalanceSheet,
    /// Receivables aging, overdue invoices and recurring commitments
    Aging,
    /// Write the loaded snapshot, normalized, to another directory
    Export {
        /// Target directory, created if missing
        dir: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct AgingReport<'a> {
    report_type: &'static str,
    as_of: NaiveDate,
    aging: ReceivablesAging,
    overdue_invoices: Vec<&'a InvoiceRecord>,
    recurring_monthly_commitment: Decimal,
}

#[derive(Debug, Serialize)]
struct ExportSummary<'a> {
    report_type: &'static str,
    dir: &'a Path,
    incomes: usize,
    expenses: usize,
    invoices: usize,
    transfers: usize,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Internal(err.to_string()))
}

/// Period requested on the command line, or the configured default.
fn period_kind(cli: &Cli, config: &AppConfig) -> AppResult<PeriodKind> {
    match cli.period.as_deref() {
        Some(raw) => PeriodKind::parse(raw).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown period '{raw}', expected month, quarter or year"
            ))
        }),
        None => Ok(PeriodKind::parse_lenient(&config.display.default_period)),
    }
}

/// Snapshot directory. An explicitly requested directory must exist.
async fn snapshot_dir(cli: &Cli, config: &AppConfig) -> AppResult<PathBuf> {
    let Some(dir) = cli.data.clone() else {
        return Ok(config.data.dir.clone());
    };
    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => Ok(dir),
        _ => Err(AppError::NotFound(format!(
            "snapshot directory {}",
            dir.display()
        ))),
    }
}

fn render(cli: &Cli, config: &AppConfig, state: &FinanceState) -> AppResult<String> {
    let now = Utc::now();
    let local_now = state.settings().local_now(now);
    let kind = period_kind(cli, config)?;
    let as_of = cli.as_of.unwrap_or_else(|| local_now.date_naive());

    match &cli.command {
        Command::Dashboard => to_json(&DashboardService::build(state, kind, now)),
        Command::Pnl => {
            let range = resolve_period(kind, &local_now);
            to_json(&ReportService::profit_and_loss(state, &range))
        }
        Command::BalanceSheet => to_json(&ReportService::balance_sheet(state, as_of)),
        Command::Aging => {
            let aggregator = state.aggregator();
            to_json(&AgingReport {
                report_type: "receivables_aging",
                as_of,
                aging: aggregator.receivables_aging(as_of),
                overdue_invoices: aggregator.overdue_invoices(as_of),
                recurring_monthly_commitment: aggregator.recurring_monthly_commitment(as_of),
            })
        }
        Command::Export { dir } => to_json(&ExportSummary {
            report_type: "export",
            dir,
            incomes: state.incomes().len(),
            expenses: state.expenses().len(),
            invoices: state.invoices().len(),
            transfers: state.transfers().len(),
        }),
    }
}

async fn execute(cli: &Cli, config: &AppConfig) -> AppResult<String> {
    let dir = snapshot_dir(cli, config).await?;
    info!(dir = %dir.display(), command = ?cli.command, "loading snapshot");
    let state = load_state(&JsonFileSource::new(dir)).await;

    let output = render(cli, config, &state)?;
    if let Command::Export { dir } = &cli.command {
        JsonFileSource::new(dir).save(&state).await?;
    }
    Ok(output)
}

async fn run(cli: &Cli) -> AppResult<()> {
    let config = AppConfig::load()?;

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("{}", execute(cli, &config).await?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = err.error_code(), error = %err, "command failed");
            eprintln!("tallybook: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
