//! Display formatting for ids, amounts, counters and timestamps.

use chrono::{DateTime, Local};

/// Shorten an id to its first `start` and last `end` characters joined by `...`.
///
/// Strings that already fit are returned unchanged.
pub fn shorten_id(id: &str, start: usize, end: usize) -> String {
    let len = id.chars().count();
    if len <= start + end {
        return id.to_string();
    }
    let head: String = id.chars().take(start).collect();
    let tail: String = id.chars().skip(len - end).collect();
    format!("{}...{}", head, tail)
}

/// Shorten with the default 4 + 4 characters used in tables.
pub fn short_id(id: &str) -> String {
    shorten_id(id, 4, 4)
}

/// Group digits with commas: `5830343` -> `5,830,343`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Two-decimal amount with grouped integer part: `1234.5` -> `1,234.50`.
pub fn amount(value: f64) -> String {
    let cents = (value * 100.0).round().max(0.0) as u64;
    format!("{}.{:02}", thousands(cents / 100), cents % 100)
}

/// Table timestamp: `YYYY-MM-DD / HH:MM`.
pub fn table_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d / %H:%M").to_string()
}

/// Long-form timestamp used in detail panels.
pub fn long_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_shorten_id() {
        assert_eq!(shorten_id("0x1a2b3c4d", 4, 4), "0x1a...3c4d");
        assert_eq!(shorten_id("abcdefgh", 4, 4), "abcdefgh");
        assert_eq!(shorten_id("", 4, 4), "");
        assert_eq!(shorten_id("QmPeerIdentifier", 2, 3), "Qm...ier");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(5_830_343), "5,830,343");
        assert_eq!(thousands(10_247_786), "10,247,786");
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount(1234.56), "1,234.56");
        assert_eq!(amount(0.5), "0.50");
        assert_eq!(amount(99.999), "100.00");
    }

    #[test]
    fn test_timestamps() {
        let ts = Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(table_timestamp(&ts), "2024-03-07 / 14:05");
        assert_eq!(long_timestamp(&ts), "3/7/2024, 2:05:09 PM");
    }
}
