//! Report formatting.
//!
//! A report is a single line: a title line (`MM/DD <store> HH:MM`) followed by
//! the body. The feedback body lists the selected option labels in
//! enumeration order, joined with `/`; the sales body carries the amount.
//! Everything here is pure apart from [`now`], the single place the local
//! wall-clock time is read.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::error::{Error, Result};
use crate::selection::SelectionState;

/// Store name used when none is configured.
pub const DEFAULT_STORE: &str = "서초점";

const TASTING_BODY: &str = " 소비기한 임박 양갱으로 시식 서비스 진행 중입니다";
const LABEL_SEPARATOR: &str = "/";

/// Build the `MM/DD <store> HH:MM` prefix, each number padded to two digits.
pub fn title_line<T>(at: &T, store: &str) -> String
where
    T: Datelike + Timelike,
{
    format!(
        "{:02}/{:02} {} {:02}:{:02}",
        at.month(),
        at.day(),
        store,
        at.hour(),
        at.minute()
    )
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// [`title_line`] for the current local wall-clock time.
pub fn title_line_now(store: &str) -> String {
    title_line(&now(), store)
}

/// Parse a `--at` override (`YYYY-MM-DD HH:MM`, seconds optional).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

/// Format the tasting-service report for `state`.
///
/// With nothing selected the parentheses are empty.
pub fn format_report(title_line: &str, state: &SelectionState) -> String {
    let labels: Vec<&str> = state.selected().map(|k| k.label()).collect();
    format!(
        "{}{}({})",
        title_line,
        TASTING_BODY,
        labels.join(LABEL_SEPARATOR)
    )
}

/// One day's sales figure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalesEntry {
    /// Amount in won. `None` until entered.
    pub amount: Option<u64>,
    pub note: Option<String>,
}

impl SalesEntry {
    /// Parse a user-typed amount. Accepts digit grouping (`1,250,000`) and a
    /// trailing `원`.
    pub fn parse_amount(raw: &str) -> Result<u64> {
        let cleaned: String = raw
            .trim()
            .trim_end_matches('원')
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        if cleaned.is_empty() {
            return Err(Error::MissingAmount);
        }
        cleaned
            .parse::<u64>()
            .map_err(|_| Error::InvalidAmount(raw.to_string()))
    }
}

/// Format the sales report. The amount must be present.
pub fn format_sales_report(title_line: &str, entry: &SalesEntry) -> Result<String> {
    let amount = entry.amount.ok_or(Error::MissingAmount)?;
    let mut out = format!("{} 매출 {}원", title_line, group_thousands(amount));
    if let Some(note) = entry.note.as_deref().map(str::trim)
        && !note.is_empty()
    {
        out.push_str(&format!(" ({})", note));
    }
    Ok(out)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
