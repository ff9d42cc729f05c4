/// Format seconds as `MM:SS.cc` (hundredths truncated).
/// Non-finite input renders as `--:--.--`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "--:--.--".to_string();
    }
    let mins = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as i64;
    format!("{:02}:{:02}.{:02}", mins, secs, hundredths)
}

/// Parse a user-typed seconds value. Blank, non-numeric and non-finite input yields `None`.
pub fn parse_seconds_input(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|seconds| seconds.is_finite())
}

/// Parse a 1-based list position as shown in summaries into a 0-based index.
pub fn parse_position_input(value: &str) -> Option<usize> {
    let position = value.trim().parse::<usize>().ok()?;
    position.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(65.5), "01:05.50");
        assert_eq!(format_time(600.25), "10:00.25");
        assert_eq!(format_time(f64::NAN), "--:--.--");
        assert_eq!(format_time(f64::INFINITY), "--:--.--");
    }

    #[test]
    fn test_parse_seconds_input() {
        assert_eq!(parse_seconds_input(" 12.5 "), Some(12.5));
        assert_eq!(parse_seconds_input(""), None);
        assert_eq!(parse_seconds_input("abc"), None);
        assert_eq!(parse_seconds_input("inf"), None);
    }

    #[test]
    fn test_parse_position_input() {
        assert_eq!(parse_position_input("1"), Some(0));
        assert_eq!(parse_position_input("3"), Some(2));
        assert_eq!(parse_position_input("0"), None);
        assert_eq!(parse_position_input("x"), None);
    }
}
