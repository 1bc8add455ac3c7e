//! Amount cleaning for statement cells and text tokens.

use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_MARKERS: &[&str] = &["NT$", "NTD", "TWD", "US$", "USD", "$", "¥", "￥", "元"];

/// Parse a statement amount such as `1,234`, `$5.82`, `NT$ 390`, `(120.00)` or `300-`.
///
/// Parentheses, a leading minus and a trailing minus all mean a credit and give
/// a negative value. Returns `None` when nothing numeric is left.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut s = raw.trim().to_string();
    let mut negative = false;

    if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        negative = true;
        s = s[1..s.len() - 1].to_string();
    }

    for marker in CURRENCY_MARKERS {
        s = s.replace(marker, "");
    }
    s.retain(|c| !c.is_whitespace() && c != ',' && c != '，');

    if let Some(rest) = s.strip_suffix('-') {
        negative = !negative;
        s = rest.to_string();
    }
    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest.to_string();
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest.to_string();
    }

    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = Decimal::from_str(&s).ok()?;
    Some(if negative { -value } else { value })
}
