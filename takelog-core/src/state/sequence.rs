//! Day-scoped file number generation (`YYMMDD_NNN`).

use chrono::NaiveDate;

use takelog_types::TakeRow;

/// Six-digit `YYMMDD` prefix for `date`.
pub fn day_prefix(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Next free file number for `date`: one past the highest counter among
/// rows sharing the day prefix, or `_001` when there are none.
pub fn next_file_no_on(rows: &[TakeRow], date: NaiveDate) -> String {
    let prefix = day_prefix(date);
    let max = rows
        .iter()
        .filter(|r| r.file_no.starts_with(&prefix))
        .filter_map(|r| counter_of(&r.file_no))
        .max();

    match max {
        Some(n) => format!("{}_{:03}", prefix, n.saturating_add(1)),
        None => format!("{}_001", prefix),
    }
}

/// Digits after the first `_`, with any non-digit characters stripped.
fn counter_of(file_no: &str) -> Option<u32> {
    let (_, tail) = file_no.split_once('_')?;
    let digits: String = tail.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
