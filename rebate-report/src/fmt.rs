use rust_decimal::Decimal;

/// Whole number with thousands separators: 1,234,567
pub fn grouped(val: i64) -> String {
    let digits = val.unsigned_abs().to_string();
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();
    if val < 0 {
        format!("-{with_commas}")
    } else {
        with_commas
    }
}

/// Currency amount without decimals: $1,234
pub fn money(val: i64) -> String {
    let body = grouped(val);
    match body.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${body}"),
    }
}

/// Percentage with one decimal: 10.0%
pub fn percent(val: Decimal) -> String {
    format!("{:.1}%", val)
}
