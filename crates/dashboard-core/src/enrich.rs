//! Single-pass enrichment: quarter normalization, derived metrics, composite
//! score, then entity filter and chronological sort.

use crate::headers::MetricColumns;
use crate::metrics::{
    dilution_adj_fcf, ps_to_growth, ps_to_rule40, round_to, rule_of_40, rule_of_40_fcf,
};
use crate::normalize::{normalize_percent, normalize_quarter, quarter_sort_key};
use crate::score::{compute_score, Rating};
use crate::types::Row;

pub const QUARTER_COL: &str = "Quarter";
pub const STOCK_COL: &str = "Stock";
pub const TICKER_COL: &str = "Ticker";

pub const RULE40_COL: &str = "Rule of 40";
pub const RULE40_FCF_COL: &str = "Rule of 40 (FCF)";
pub const DILUTION_ADJ_FCF_COL: &str = "Dilution-Adj FCF Margin";
pub const PS_TO_ROF40_COL: &str = "P/S to Rof40";
pub const PS_TO_GROWTH_COL: &str = "P/S to Growth";
pub const SCORE_COL: &str = "MSS Score";
pub const RATING_COL: &str = "MSS Rating";

/// Derived columns in output order, appended after the source columns.
pub const DERIVED_COLUMNS: [&str; 7] = [
    RULE40_COL,
    RULE40_FCF_COL,
    DILUTION_ADJ_FCF_COL,
    PS_TO_ROF40_COL,
    PS_TO_GROWTH_COL,
    SCORE_COL,
    RATING_COL,
];

/// Enriched rows plus the column order both outputs share.
#[derive(Debug, Clone)]
pub struct EnrichedSheet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Display/sort identity: truthy `Stock`, else truthy `Ticker`. Rows with
/// neither are dropped from the output set.
pub fn entity_name(row: &Row) -> Option<String> {
    for col in [STOCK_COL, TICKER_COL] {
        if let Some(v) = row.get(col) {
            if v.is_truthy() {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// Source columns in sheet order followed by the derived columns the sheet
/// does not already carry.
pub fn output_columns(headers: &[String]) -> Vec<String> {
    let mut columns = headers.to_vec();
    for col in DERIVED_COLUMNS {
        if !columns.iter().any(|c| c == col) {
            columns.push(col.to_string());
        }
    }
    columns
}

/// Runs the full pipeline over loaded rows: enrich each row in place, drop
/// entity-less rows, stable-sort by (entity, period).
pub fn enrich_rows(headers: &[String], rows: Vec<Row>) -> EnrichedSheet {
    let cols = MetricColumns::resolve(headers);

    let total = rows.len();
    let mut enriched: Vec<Row> = rows
        .into_iter()
        .map(|mut row| {
            enrich_row(&mut row, &cols);
            row
        })
        .filter(|row| entity_name(row).is_some())
        .collect();

    let dropped = total - enriched.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} rows without Stock/Ticker", dropped);
    }

    enriched.sort_by_key(|row| {
        (
            entity_name(row).unwrap_or_default().to_uppercase(),
            quarter_sort_key(row.text(QUARTER_COL)),
        )
    });

    EnrichedSheet {
        columns: output_columns(headers),
        rows: enriched,
    }
}

/// Percent-typed input: scaled to a decimal fraction.
fn percent_input(row: &Row, col: &Option<String>) -> Option<f64> {
    normalize_percent(col.as_deref().and_then(|c| row.get(c)))
}

/// Ratio/multiple-typed input (P/S, EV/NTM, NRR): read as-is, never scaled.
fn ratio_input(row: &Row, col: &Option<String>) -> Option<f64> {
    col.as_deref().and_then(|c| row.number(c))
}

fn enrich_row(row: &mut Row, cols: &MetricColumns) {
    if let Some(q) = row.text(QUARTER_COL).map(normalize_quarter) {
        row.insert(QUARTER_COL, q);
    }

    let growth = percent_input(row, &cols.growth);
    let ops = percent_input(row, &cols.ops_margin);
    let fcf = percent_input(row, &cols.fcf_margin);
    let sbc = percent_input(row, &cols.sbc);
    let rule40_fcf_existing = percent_input(row, &cols.rule40_fcf);
    let ps = ratio_input(row, &cols.price_to_sales);
    let ev_ntm = ratio_input(row, &cols.ev_ntm);
    let nrr = ratio_input(row, &cols.nrr);

    let rule40 = rule_of_40(growth, ops);
    if let Some(v) = rule40 {
        row.insert(RULE40_COL, round_to(v, 4));
    }

    // An existing non-null sheet value wins over the computed one.
    let rule40_fcf = rule40_fcf_existing.or_else(|| rule_of_40_fcf(growth, fcf));
    if let Some(v) = rule40_fcf {
        row.insert(RULE40_FCF_COL, round_to(v, 4));
    }

    if let Some(v) = dilution_adj_fcf(fcf, sbc) {
        row.insert(DILUTION_ADJ_FCF_COL, round_to(v, 4));
    }

    if let Some(v) = ps_to_rule40(ps, rule40) {
        row.insert(PS_TO_ROF40_COL, round_to(v, 2));
    }

    if let Some(v) = ps_to_growth(ps, growth) {
        row.insert(PS_TO_GROWTH_COL, round_to(v, 2));
    }

    let score = compute_score(growth, nrr, rule40_fcf, ev_ntm, sbc);
    row.insert(SCORE_COL, score);
    row.insert(RATING_COL, Rating::from_score(score).label());
}
