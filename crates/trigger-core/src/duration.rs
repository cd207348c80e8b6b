//! Duration strings such as `1h5m30s` and the `HH:MM:SS` clock format

/// Sums every `<digits><unit>` token in `text`, where unit is `h`, `m` or `s`.
///
/// Anything that is not part of such a token is skipped, so `"32e9p"` is `0`
/// and `"5m1h"` equals `"1h5m"`.
pub fn parse_duration(text: &str) -> u64 {
    let mut total: u64 = 0;
    let mut value: Option<u64> = None;

    for c in text.chars() {
        if let Some(digit) = c.to_digit(10) {
            let current = value.unwrap_or(0);
            value = Some(current.saturating_mul(10).saturating_add(u64::from(digit)));
            continue;
        }

        if let Some(amount) = value.take() {
            let multiplier = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => continue,
            };
            total = total.saturating_add(amount.saturating_mul(multiplier));
        }
    }

    total
}

pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse_duration("1s"), 1);
        assert_eq!(parse_duration("5m"), 300);
        assert_eq!(parse_duration("1h"), 3600);
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1h5m30s"), 3930);
        assert_eq!(parse_duration("20m10s"), 1210);
        assert_eq!(parse_duration("2h10s"), 7210);
        assert_eq!(parse_duration("3h11m10s"), 11470);
    }

    #[test]
    fn test_parse_order_and_repetition() {
        assert_eq!(parse_duration("1h5m"), 3900);
        assert_eq!(parse_duration("5m1h"), 3900);
        assert_eq!(parse_duration("1m1m1m"), 180);
    }

    #[test]
    fn test_parse_without_tokens() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("32e9p"), 0);
        assert_eq!(parse_duration("hms"), 0);
        assert_eq!(parse_duration("42"), 0);
    }

    #[test]
    fn test_parse_skips_garbage_between_tokens() {
        assert_eq!(parse_duration(" 1h and 5m, ok?"), 3900);
        assert_eq!(parse_duration("10x5s"), 5);
        assert_eq!(parse_duration("1.5h"), 5 * 3600);
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_duration("99999999999999999999999h"), u64::MAX);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(2), "00:00:02");
        assert_eq!(format_hms(62), "00:01:02");
        assert_eq!(format_hms(3662), "01:01:02");
        assert_eq!(format_hms(40272), "11:11:12");
    }

    #[test]
    fn test_format_hours_are_not_wrapped() {
        assert_eq!(format_hms(100 * 3600 + 5), "100:00:05");
    }
}
