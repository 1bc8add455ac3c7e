//! Statement text parser (text already extracted from a PDF or e-mail bill)
//!
//! Expected rows:
//!   2025/01/03  2025/01/05  STEAMGAMES.COM 4259522985            8,000
//!   114/01/06   114/01/08   LINE Pay*蝦皮購物                        1,280
//!   01/09       NETFLIX.COM                                         390
//!
//! Multi-card statements open each card's section with a line such as
//!   卡號：4563-XXXX-XXXX-1234        or        Card No. ****-****-****-5678
//! which tags the rows that follow with the last four digits.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::amount::parse_amount;
use crate::types::StatementTransaction;

/// Offset between Republic of China (Minguo) years and Gregorian years.
const ROC_YEAR_OFFSET: i32 = 1911;

/// Parse a date token. `statement_year` fills in `MM/DD` tokens.
///
/// Accepts `YYYY/MM/DD`, ROC `YYY/MM/DD`, `MM/DD/YYYY` and `MM/DD`, with `/`,
/// `-` or `.` separators.
pub fn parse_statement_date(token: &str, statement_year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.trim().split(['/', '-', '.']).collect();
    let num = |s: &str| s.parse::<u32>().ok();

    match parts.as_slice() {
        [m, d] => NaiveDate::from_ymd_opt(statement_year, num(m)?, num(d)?),
        [a, b, c] if a.len() == 4 => NaiveDate::from_ymd_opt(a.parse().ok()?, num(b)?, num(c)?),
        [a, b, c] if a.len() == 3 => {
            let year = a.parse::<i32>().ok()? + ROC_YEAR_OFFSET;
            NaiveDate::from_ymd_opt(year, num(b)?, num(c)?)
        }
        [m, d, y] if y.len() == 4 => NaiveDate::from_ymd_opt(y.parse().ok()?, num(m)?, num(d)?),
        _ => None,
    }
}

/// Parse extracted statement text into transactions.
///
/// `statement_year` is required because some issuers print rows as MM/DD.
/// Lines that do not look like transactions are ignored; rows before the first
/// card header carry no card tag.
pub fn parse_statement_text(text: &str, statement_year: i32) -> Result<Vec<StatementTransaction>> {
    let date = r"\d{2,4}[/.\-]\d{1,2}(?:[/.\-]\d{1,4})?";
    let txn_re = Regex::new(&format!(
        concat!(
            r"^\s*(?P<date>{date})\s+",
            r"(?:(?P<post>{date})\s+)?",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>\(?-?\s*(?:NT\$|\$)?\s*\d[\d,]*(?:\.\d{{1,2}})?\)?-?)\s*$"
        ),
        date = date
    ))?;
    let card_re = Regex::new(concat!(
        r"(?i)(?:卡號|卡末四碼|末四碼|card\s*(?:no\.?|number|ending(?:\s+in)?))\s*[:：]?\s*",
        r"(?:(?:\d{4}|[x*＊]{4})[\s\-]?){0,3}(?P<last4>\d{4})\b"
    ))?;
    let masked_re = Regex::new(r"(?i)(?:\d{4}|[x*＊]{4})[\s\-]?(?:[x*＊]{4}[\s\-]?){1,2}(?P<last4>\d{4})\b")?;

    let mut current_card: Option<String> = None;
    let mut out = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        if let Some(caps) = txn_re.captures(line) {
            let Some(trans_date) = parse_statement_date(&caps["date"], statement_year) else {
                continue;
            };

            let raw_amount = &caps["amount"];
            let amount = match parse_amount(raw_amount) {
                Some(a) => a,
                None => {
                    warn!(line = lineno + 1, raw = raw_amount, "unparseable amount, treating as 0");
                    Decimal::ZERO
                }
            };

            out.push(StatementTransaction {
                date: Some(trans_date),
                description: caps["desc"].trim().to_string(),
                amount,
                card_tag: current_card.clone(),
            });
            continue;
        }

        if let Some(caps) = card_re.captures(line).or_else(|| masked_re.captures(line)) {
            let last4 = caps["last4"].to_string();
            debug!(line = lineno + 1, card = %last4, "card section");
            current_card = Some(last4);
        }
    }

    Ok(out)
}
