//! dashboard-gen: Reads the equity research workbook and generates the SaaS
//! dashboard: a markdown table plus a CSV backup with the derived metrics
//! (Rule of 40, Rule of 40 (FCF), Dilution-Adj FCF Margin, P/S ratios, MSS
//! Score and Rating).
//!
//! Usage:
//!   cargo run -p dashboard-gen -- --excel "MK Stock Analysis.xlsx" --out-dir reports
//!   cargo run -p dashboard-gen -- --sheet SaaS

mod output;
mod xlsx;

use chrono::Local;
use dashboard_core::{enrich_rows, DashboardError};
use std::path::PathBuf;

const DEFAULT_EXCEL: &str = "MK Stock Analysis.xlsx";
const DEFAULT_SHEET: &str = "SaaS";
const MARKDOWN_NAME: &str = "SaaS Dashboard.md";
const CSV_NAME: &str = "SaaS Data.csv";

struct Config {
    excel: PathBuf,
    sheet: String,
    markdown_path: PathBuf,
    csv_path: PathBuf,
}

impl Config {
    fn from_args(args: &[String]) -> Self {
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .map(|s| s.to_string())
        };

        let excel = PathBuf::from(value_of("--excel").unwrap_or_else(|| DEFAULT_EXCEL.into()));
        let sheet = value_of("--sheet").unwrap_or_else(|| DEFAULT_SHEET.into());
        let out_dir = PathBuf::from(value_of("--out-dir").unwrap_or_else(|| ".".into()));

        Self {
            excel,
            sheet,
            markdown_path: out_dir.join(MARKDOWN_NAME),
            csv_path: out_dir.join(CSV_NAME),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_gen=info,dashboard_core=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_args(&args);

    tracing::info!("Loading {} (sheet '{}')", config.excel.display(), config.sheet);
    let data = match xlsx::load_sheet(&config.excel, &config.sheet) {
        Ok(data) => data,
        Err(e @ (DashboardError::SheetNotFound { .. } | DashboardError::Workbook(_))) => {
            // Unreadable input is a diagnostic, not a crash; nothing is written.
            tracing::error!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Found {} rows in '{}' sheet", data.rows.len(), config.sheet);

    tracing::info!("Calculating formulas...");
    let enriched = enrich_rows(&data.headers, data.rows);

    output::write_csv(&config.csv_path, &enriched)?;
    tracing::info!("CSV backup: {}", config.csv_path.display());

    let source = format!(
        "{} ({} Sheet)",
        config
            .excel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.excel.display().to_string()),
        config.sheet
    );
    let md = output::render_markdown(&enriched, &source, Local::now());
    std::fs::write(&config.markdown_path, md)?;
    tracing::info!("Markdown: {}", config.markdown_path.display());

    tracing::info!("Done: {} stocks", enriched.rows.len());
    Ok(())
}
