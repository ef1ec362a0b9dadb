//! Derived metric formulas. All null-propagating and unrounded; callers
//! round before storing.

/// Rule of 40 = growth + ops margin.
pub fn rule_of_40(growth: Option<f64>, ops_margin: Option<f64>) -> Option<f64> {
    Some(growth? + ops_margin?)
}

/// Rule of 40 (FCF) = growth + FCF margin.
pub fn rule_of_40_fcf(growth: Option<f64>, fcf_margin: Option<f64>) -> Option<f64> {
    Some(growth? + fcf_margin?)
}

/// Dilution-Adjusted FCF Margin = FCF margin - SBC % of revenue.
pub fn dilution_adj_fcf(fcf_margin: Option<f64>, sbc: Option<f64>) -> Option<f64> {
    Some(fcf_margin? - sbc?)
}

/// P/S to Rule of 40 = P/S / rule40, null on a zero denominator.
pub fn ps_to_rule40(ps: Option<f64>, rule40: Option<f64>) -> Option<f64> {
    let rule40 = rule40?;
    if rule40 == 0.0 {
        return None;
    }
    Some(ps? / rule40)
}

/// P/S to Growth = P/S / growth, null on a zero denominator.
pub fn ps_to_growth(ps: Option<f64>, growth: Option<f64>) -> Option<f64> {
    let growth = growth?;
    if growth == 0.0 {
        return None;
    }
    Some(ps? / growth)
}

/// Round to `decimals` places, applied when a derived value is stored.
pub fn round_to(v: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (v * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_of_40_exact_sum() {
        assert_eq!(rule_of_40(Some(0.30), Some(0.10)), Some(0.40));
        assert_eq!(rule_of_40(Some(0.25), Some(-0.05)), Some(0.20));
    }

    #[test]
    fn test_null_propagation() {
        assert_eq!(rule_of_40(None, Some(0.10)), None);
        assert_eq!(rule_of_40_fcf(Some(0.30), None), None);
        assert_eq!(dilution_adj_fcf(None, None), None);
        assert_eq!(ps_to_rule40(None, Some(0.4)), None);
        assert_eq!(ps_to_growth(Some(8.0), None), None);
    }

    #[test]
    fn test_ratio_zero_guards() {
        assert_eq!(ps_to_rule40(Some(8.0), Some(0.0)), None);
        assert_eq!(ps_to_growth(Some(8.0), Some(0.0)), None);
    }

    #[test]
    fn test_ratios() {
        assert_eq!(ps_to_rule40(Some(8.0), Some(0.40)), Some(20.0));
        let v = ps_to_growth(Some(8.0), Some(0.30)).unwrap();
        assert!((v - 26.666666).abs() < 1e-4);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(26.666666, 2), 26.67);
        assert_eq!(round_to(0.44995, 4), 0.45);
    }
}
