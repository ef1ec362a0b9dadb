//! Display formatting for report cells. Dispatch is keyword-based on the
//! header: margin-like columns render as percentages, price-like columns as
//! currency, everything else as-is with nulls shown as `-`.

use crate::headers::normalize_key;
use crate::metrics::round_to;
use crate::types::CellValue;

const PERCENT_KEYWORDS: [&str; 6] = ["margin", "growth", "nrr", "sbc", "revenue", "score"];
const CURRENCY_KEYWORDS: [&str; 6] = ["price", "value", "target", "ev", "market", "dma"];

pub fn clean_value(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Number(v)) => round_to(*v, 2).to_string(),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Empty) | None => "-".to_string(),
    }
}

/// Percent display: fractional magnitudes are scaled by 100 first, values
/// already on the percent scale are printed directly. Same asymmetric
/// boundary as `normalize_percent`.
pub fn format_percent(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Number(v)) => {
            if v.abs() <= 1.0 && *v > -1.0 {
                format!("{:.1}%", v * 100.0)
            } else {
                format!("{:.1}%", v)
            }
        }
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Empty) | None => "-".to_string(),
    }
}

pub fn format_currency(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Number(v)) => format!("${:.2}", v),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Empty) | None => "-".to_string(),
    }
}

/// Formats one cell for the report table based on its column header.
pub fn format_cell(header: &str, value: Option<&CellValue>) -> String {
    let key = normalize_key(header);
    if PERCENT_KEYWORDS.iter().any(|kw| key.contains(kw)) {
        format_percent(value)
    } else if CURRENCY_KEYWORDS.iter().any(|kw| key.contains(kw)) {
        format_currency(value)
    } else {
        clean_value(value)
    }
}
