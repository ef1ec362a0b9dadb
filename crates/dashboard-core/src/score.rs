//! Composite quality score (MSS) and its rating buckets.

use crate::metrics::round_to;
use serde::{Deserialize, Serialize};

/// Composite 0-100-nominal quality score from four weighted sub-scores.
///
/// Null inputs fall back to neutral defaults (growth 0, NRR 100%, rule40 0,
/// EV/NTM 0, SBC 0). Sub-scores work on the percent scale (fraction x 100):
/// - engine: growth + NRR expansion, capped at 35
/// - fuel: Rule of 40 (FCF) / 2, capped at 30
/// - price: stepwise on the EV/NTM multiple (20 / 12 / 6 / 0)
/// - discipline: 15 - SBC/2, floored at 0
///
/// Engine and fuel have no lower cap, so the score can go negative, and an
/// extreme NRR can push it past 100. Intentionally unclamped.
pub fn compute_score(
    growth: Option<f64>,
    nrr: Option<f64>,
    rule40_fcf: Option<f64>,
    ev_ntm: Option<f64>,
    sbc: Option<f64>,
) -> f64 {
    let k = growth.unwrap_or(0.0);
    let q = nrr.unwrap_or(1.0);
    let o = rule40_fcf.unwrap_or(0.0);
    let p = ev_ntm.unwrap_or(0.0);
    let r = sbc.unwrap_or(0.0);

    let engine = 35f64.min(k * 100.0 + (q * 100.0 - 100.0));
    let fuel = 30f64.min(o * 100.0 / 2.0);
    let price_score = if p < 6.0 {
        20.0
    } else if p < 10.0 {
        12.0
    } else if p < 15.0 {
        6.0
    } else {
        0.0
    };
    let discipline = (15.0 - r * 100.0 / 2.0).max(0.0);

    round_to(engine + fuel + price_score + discipline, 2)
}

/// Discrete rating bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    StrongBuy,
    Buy,
    Hold,
    Sell,
}

impl Rating {
    /// Ties go to the higher bucket: thresholds use `>=` in descending order.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Rating::StrongBuy
        } else if score >= 60.0 {
            Rating::Buy
        } else if score >= 40.0 {
            Rating::Hold
        } else {
            Rating::Sell
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::StrongBuy => "STRONG BUY",
            Rating::Buy => "BUY",
            Rating::Hold => "HOLD",
            Rating::Sell => "SELL",
        }
    }
}
