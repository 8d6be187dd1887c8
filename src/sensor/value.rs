//! Token-level value parsing for sensor telegrams.

/// Reserved literal meaning "no reading".
pub const SENTINEL: f32 = 999.9;

/// km/h on the wire, m/s in storage.
pub const WIND_FACTOR: f32 = 1.0 / 3.6;

/// Tips per interval on the wire, mm in storage.
pub const RAIN_FACTOR: f32 = 0.2 * 6.0;

pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Parses a float token, rounded to 2 decimals.
///
/// Returns `None` when the token is not a number, or when it equals
/// [`SENTINEL`] and `skip_sentinel_check` is false.
pub fn parse_float(token: &str, skip_sentinel_check: bool) -> Option<f32> {
    let v = token.trim().parse::<f32>().ok()?;
    if !skip_sentinel_check && v == SENTINEL {
        return None;
    }
    finite(round2(v))
}

/// Like [`parse_float`], then scales by `factor` and re-rounds.
pub fn parse_float_scaled(token: &str, skip_sentinel_check: bool, factor: f32) -> Option<f32> {
    parse_float(token, skip_sentinel_check).and_then(|v| finite(round2(v * factor)))
}

// Rounding overflows to infinity above ~3.4e36.
fn finite(v: f32) -> Option<f32> {
    v.is_finite().then_some(v)
}

pub fn parse_int(token: &str) -> Option<i32> {
    token.trim().parse::<i32>().ok()
}

/// Parses a string token; empty means absent.
pub fn parse_text(token: &str) -> Option<String> {
    let t = token.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_rounds_to_two_decimals() {
        assert_eq!(parse_float("31.456", false), Some(31.46));
        assert_eq!(parse_float("-4.2", false), Some(-4.2));
    }

    #[test]
    fn zero_is_a_reading_not_an_absence() {
        assert_eq!(parse_float("0", false), Some(0.0));
        assert_eq!(parse_float("0.0", false), Some(0.0));
        assert_eq!(parse_int("0"), Some(0));
    }

    #[test]
    fn sentinel_is_absent_unless_check_skipped() {
        assert_eq!(parse_float("999.9", false), None);
        assert_eq!(parse_float("999.9", true), Some(999.9));
        assert_eq!(parse_float_scaled("999.9", false, WIND_FACTOR), None);
    }

    #[test]
    fn garbage_tokens_are_absent() {
        assert_eq!(parse_float("", false), None);
        assert_eq!(parse_float("abc", false), None);
        assert_eq!(parse_float("NaN", false), None);
        assert_eq!(parse_int("12.5"), None);
        assert_eq!(parse_int("x"), None);
    }

    #[test]
    fn values_that_overflow_rounding_are_absent() {
        assert_eq!(parse_float("1e37", false), None);
        assert_eq!(parse_float("-1e37", true), None);
        assert_eq!(parse_float("inf", false), None);
        assert_eq!(parse_float_scaled("3e36", false, RAIN_FACTOR), None);
        assert_eq!(parse_float("1e6", false), Some(1_000_000.0));
    }

    #[test]
    fn wind_and_rain_conversion() {
        assert_eq!(parse_float_scaled("36", false, WIND_FACTOR), Some(10.0));
        assert_eq!(parse_float_scaled("10.8", false, WIND_FACTOR), Some(3.0));
        assert_eq!(parse_float_scaled("6", false, RAIN_FACTOR), Some(7.2));
        assert_eq!(parse_float_scaled("1.5", false, RAIN_FACTOR), Some(1.8));
    }

    #[test]
    fn parse_text_treats_empty_as_absent() {
        assert_eq!(parse_text(""), None);
        assert_eq!(parse_text("WX12"), Some("WX12".to_string()));
    }
}
