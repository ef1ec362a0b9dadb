//! Header resolution: maps the metric input columns to the sheet's actual
//! header labels, tolerating casing, line-wrapping, and stray whitespace.

use std::collections::HashMap;

pub const GROWTH_KEY: &str = "q. rev growth (yoy)";
pub const OPS_MARGIN_KEY: &str = "ops margin";
pub const FCF_MARGIN_KEY: &str = "fcf margin";
pub const SBC_KEY: &str = "sbc % rev";
pub const PS_KEY: &str = "p/s (ttm)";
pub const RULE40_FCF_KEY: &str = "rule of 40 (fcf)";
pub const EV_NTM_KEY: &str = "ev / ntm rev";
pub const NRR_KEY: &str = "nrr";

/// Canonical lookup form of a header label: lowercased, newlines collapsed to
/// spaces, trimmed.
pub fn normalize_key(label: &str) -> String {
    label.to_lowercase().replace('\n', " ").trim().to_string()
}

/// Original header labels for the eight metric input columns. A `None` field
/// means the sheet has no matching header and every formula depending on it
/// evaluates to null.
#[derive(Debug, Clone, Default)]
pub struct MetricColumns {
    pub growth: Option<String>,
    pub ops_margin: Option<String>,
    pub fcf_margin: Option<String>,
    pub sbc: Option<String>,
    pub price_to_sales: Option<String>,
    pub rule40_fcf: Option<String>,
    pub ev_ntm: Option<String>,
    pub nrr: Option<String>,
}

impl MetricColumns {
    pub fn resolve(headers: &[String]) -> Self {
        let lookup: HashMap<String, &String> = headers
            .iter()
            .map(|h| (normalize_key(h), h))
            .collect();
        let col = |key: &str| lookup.get(key).map(|h| (*h).clone());

        Self {
            growth: col(GROWTH_KEY),
            ops_margin: col(OPS_MARGIN_KEY),
            fcf_margin: col(FCF_MARGIN_KEY),
            sbc: col(SBC_KEY),
            price_to_sales: col(PS_KEY),
            rule40_fcf: col(RULE40_FCF_KEY),
            ev_ntm: col(EV_NTM_KEY),
            nrr: col(NRR_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("P/S (TTM)"), "p/s (ttm)");
        assert_eq!(normalize_key("  Ops\nMargin "), "ops margin");
        assert_eq!(normalize_key("NRR"), "nrr");
    }

    #[test]
    fn test_resolve_finds_wrapped_headers() {
        let headers = vec![
            "Stock".to_string(),
            "Q. Rev\nGrowth (YoY)".to_string(),
            "OPS MARGIN".to_string(),
        ];
        let cols = MetricColumns::resolve(&headers);
        assert_eq!(cols.growth.as_deref(), Some("Q. Rev\nGrowth (YoY)"));
        assert_eq!(cols.ops_margin.as_deref(), Some("OPS MARGIN"));
        assert!(cols.nrr.is_none());
    }
}
