//! Report rendering: CSV backup plus the markdown dashboard table.

use chrono::{DateTime, Local};
use dashboard_core::format::format_cell;
use dashboard_core::{DashboardError, EnrichedSheet};
use std::io::Write;
use std::path::Path;

pub fn write_csv(path: &Path, sheet: &EnrichedSheet) -> Result<(), DashboardError> {
    let file = std::fs::File::create(path)?;
    write_csv_to(file, sheet)
}

fn write_csv_to<W: Write>(writer: W, sheet: &EnrichedSheet) -> Result<(), DashboardError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(&sheet.columns)
        .map_err(|e| DashboardError::Output(e.to_string()))?;
    for row in &sheet.rows {
        let record: Vec<String> = sheet
            .columns
            .iter()
            .map(|col| row.get(col).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| DashboardError::Output(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| DashboardError::Output(e.to_string()))?;
    Ok(())
}

/// Renders the markdown dashboard. Pure so the table shape is testable; the
/// caller writes the string to disk.
pub fn render_markdown(
    sheet: &EnrichedSheet,
    source: &str,
    generated: DateTime<Local>,
) -> String {
    let mut md = String::from("# SaaS Equity Dashboard\n\n");
    md.push_str(&format!(
        "**Generated:** {} | **Source:** {}\n\n",
        generated.format("%Y-%m-%d %H:%M"),
        source
    ));
    md.push_str(&format!("**Total Stocks:** {}\n\n", sheet.rows.len()));

    md.push_str(&format!("| {} |\n", sheet.columns.join(" | ")));
    md.push_str(&format!(
        "| {} |\n",
        vec!["---"; sheet.columns.len()].join(" | ")
    ));

    for row in &sheet.rows {
        let cells: Vec<String> = sheet
            .columns
            .iter()
            .map(|col| format_cell(col, row.get(col)))
            .collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dashboard_core::{enrich_rows, Row};

    fn sample_sheet() -> EnrichedSheet {
        let headers: Vec<String> = ["Stock", "Quarter", "Q. Rev Growth (YoY)", "Ops Margin", "P/S (TTM)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut row = Row::new();
        row.insert("Stock", "ACME");
        row.insert("Quarter", "Q2/2024");
        row.insert("Q. Rev Growth (YoY)", 0.30);
        row.insert("Ops Margin", 0.10);
        row.insert("P/S (TTM)", 8.0);
        enrich_rows(&headers, vec![row])
    }

    #[test]
    fn test_csv_layout() {
        let sheet = sample_sheet();
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &sheet).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Stock,Quarter,"));
        assert!(header.ends_with("MSS Score,MSS Rating"));

        let record = lines.next().unwrap();
        assert!(record.starts_with("ACME,Q2/24,"));
        // Null derived values (no FCF inputs here) become empty fields.
        assert!(record.contains(",,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_markdown_layout() {
        let sheet = sample_sheet();
        let generated = Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let md = render_markdown(&sheet, "MK Stock Analysis.xlsx (SaaS Sheet)", generated);

        assert!(md.starts_with("# SaaS Equity Dashboard\n"));
        assert!(md.contains("**Generated:** 2025-06-01 09:30 | **Source:** MK Stock Analysis.xlsx (SaaS Sheet)"));
        assert!(md.contains("**Total Stocks:** 1"));
        // Growth column renders as a percentage, P/S as currency.
        assert!(md.contains("| 30.0% |"));
        assert!(md.contains("| $8.00 |"));
        // engine 30 + fuel 0 + price 20 + discipline 15 = 65
        assert!(md.contains("| 65.0% |"));
        assert!(md.contains("| BUY |"));
    }

    #[test]
    fn test_markdown_nulls_render_as_dash() {
        let headers = vec!["Ticker".to_string(), "Quarter".to_string(), "FCF Margin".to_string()];
        let mut row = Row::new();
        row.insert("Ticker", "ZM");
        let sheet = enrich_rows(&headers, vec![row]);
        let md = render_markdown(&sheet, "test.xlsx", Local::now());
        assert!(md.contains("| - |"));
    }
}
