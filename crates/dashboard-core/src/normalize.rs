//! Raw value normalization: percentages to decimal fractions and quarter
//! labels to the canonical `Q<1-4>/<yy>` form.

use crate::types::CellValue;

/// Sort bucket for periods that cannot be parsed; orders them last.
pub const UNKNOWN_PERIOD: (i32, u8) = (9999, 9);

/// Converts a raw cell to a decimal fraction (0.23 for 23%).
///
/// Sheets store percentages inconsistently: sometimes 0.235, sometimes 23.5.
/// Values with `abs(v) <= 1.0 && v > -1.0` are taken as already fractional,
/// everything else is divided by 100. The boundary is ambiguous by
/// construction (0.95 could mean 95% or 0.95%) and deliberately asymmetric:
/// 1.0 passes through as 100% while -1.0 divides to -0.01. Kept as-is for
/// compatibility with existing sheets.
pub fn normalize_percent(cell: Option<&CellValue>) -> Option<f64> {
    match cell {
        Some(CellValue::Number(v)) => {
            if v.abs() <= 1.0 && *v > -1.0 {
                Some(*v)
            } else {
                Some(v / 100.0)
            }
        }
        _ => None,
    }
}

/// Leading `Q<digit>/<2-4 digit year>` parse shared by [`normalize_quarter`]
/// and [`quarter_sort_key`]. Trailing text is ignored.
fn parse_quarter(q: &str) -> Option<(u8, i32)> {
    let q = q.trim();
    let rest = q.strip_prefix('Q')?;
    let mut chars = rest.chars();
    let quarter = chars.next()?.to_digit(10)? as u8;
    let rest = chars.as_str().strip_prefix('/')?;

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).take(4).collect();
    if digits.len() < 2 {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    Some((quarter, year))
}

/// Normalizes a quarter label to a 2-digit year, e.g. `Q3/2025` -> `Q3/25`.
/// Strings not matching the pattern pass through unchanged.
pub fn normalize_quarter(q: &str) -> String {
    let q = q.trim();
    match parse_quarter(q) {
        Some((quarter, year)) => {
            let year = if year >= 2000 {
                year - 2000
            } else if year >= 1900 {
                year - 1900
            } else {
                year
            };
            format!("Q{}/{:02}", quarter, year)
        }
        None => q.to_string(),
    }
}

/// Chronological sort key `(year, quarter)` for a quarter label. Two-digit
/// years below 70 land in the 2000s, the rest in the 1900s. Absent or
/// unparsable input sorts last via [`UNKNOWN_PERIOD`].
pub fn quarter_sort_key(q: Option<&str>) -> (i32, u8) {
    let Some(q) = q else {
        return UNKNOWN_PERIOD;
    };
    match parse_quarter(q) {
        Some((quarter, year)) => {
            let year = if year < 100 {
                if year < 70 {
                    year + 2000
                } else {
                    year + 1900
                }
            } else {
                year
            };
            (year, quarter)
        }
        None => UNKNOWN_PERIOD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(v: f64) -> Option<f64> {
        normalize_percent(Some(&CellValue::Number(v)))
    }

    #[test]
    fn test_normalize_percent_whole_numbers() {
        assert_eq!(pct(23.0), Some(0.23));
        assert_eq!(pct(150.0), Some(1.5));
    }

    #[test]
    fn test_normalize_percent_fractions_pass_through() {
        assert_eq!(pct(0.23), Some(0.23));
        assert_eq!(pct(1.0), Some(1.0));
        assert_eq!(pct(-0.5), Some(-0.5));
    }

    #[test]
    fn test_normalize_percent_negative_one_boundary() {
        // -1.0 fails the strict > -1.0 bound and gets divided.
        assert_eq!(pct(-1.0), Some(-0.01));
    }

    #[test]
    fn test_normalize_percent_null_and_text() {
        assert_eq!(normalize_percent(None), None);
        assert_eq!(normalize_percent(Some(&CellValue::Text("n/a".into()))), None);
        assert_eq!(normalize_percent(Some(&CellValue::Empty)), None);
    }

    #[test]
    fn test_normalize_quarter() {
        assert_eq!(normalize_quarter("Q3/2025"), "Q3/25");
        assert_eq!(normalize_quarter("Q1/99"), "Q1/99");
        assert_eq!(normalize_quarter("Q4/1998"), "Q4/98");
        assert_eq!(normalize_quarter("FY25"), "FY25");
        assert_eq!(normalize_quarter(" Q2/22 "), "Q2/22");
    }

    #[test]
    fn test_quarter_sort_key_ordering() {
        let a = quarter_sort_key(Some("Q1/22"));
        let b = quarter_sort_key(Some("Q3/22"));
        let c = quarter_sort_key(Some("Q1/23"));
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_quarter_sort_key_centuries() {
        assert_eq!(quarter_sort_key(Some("Q1/69")), (2069, 1));
        assert_eq!(quarter_sort_key(Some("Q1/70")), (1970, 1));
        assert_eq!(quarter_sort_key(Some("Q2/2024")), (2024, 2));
    }

    #[test]
    fn test_quarter_sort_key_unknown_sorts_last() {
        assert_eq!(quarter_sort_key(None), UNKNOWN_PERIOD);
        assert_eq!(quarter_sort_key(Some("FY25")), UNKNOWN_PERIOD);
        assert!(quarter_sort_key(Some("Q4/2099")) < UNKNOWN_PERIOD);
    }
}
