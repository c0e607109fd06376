// Utility helpers for parsing and formatting display values.
//
// Metric strings from the API ("99%", "11.33/mo") and review dates
// ("2025-01-12", or already-relative text like "2 months ago") are normalized
// here so report builders can work with typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse the numeric prefix of a display string, the way a browser's
/// `parseFloat` reads it.
///
/// - Leading whitespace is skipped.
/// - An optional sign, digits, one decimal point and an exponent are accepted.
/// - Anything after the longest valid prefix is ignored (`"99%"` reads as 99).
/// - Returns `None` if no digits lead the string.
pub fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut digits = 0usize;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when it carries at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

pub fn parse_date_safe(s: &str) -> Option<NaiveDate> {
    // Review dates are expected in `YYYY-MM-DD` format.
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn days_diff(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn average(v: &[f64]) -> f64 {
    // Returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Render a number the way the dashboard printed raw values: integers without
/// a fractional part, everything else in shortest round-trip form.
pub fn format_plain(n: f64) -> String {
    format!("{}", n)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let Ok(int_val) = int_part.parse::<i64>() else {
        return format_plain(n);
    };
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Five-glyph star bar: filled for every position up to `rating`.
pub fn star_bar(rating: u8) -> String {
    (1..=5u8)
        .map(|star| if star <= rating { '★' } else { '☆' })
        .collect()
}

/// Fixed-width bar filled to `percent` of `width` cells, rounded to the
/// nearest cell.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// "Known for being thorough and patient." from the first two keywords.
pub fn praise_blurb(keywords: &[String]) -> String {
    let top: Vec<&str> = keywords.iter().take(2).map(String::as_str).collect();
    format!("Known for being {}.", top.join(" and "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("99%", Some(99.0))]
    #[case("11.33/mo", Some(11.33))]
    #[case("  42", Some(42.0))]
    #[case("-3.5 points", Some(-3.5))]
    #[case(".5", Some(0.5))]
    #[case("1e3 reviews", Some(1000.0))]
    #[case("7e", Some(7.0))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("-", None)]
    #[case(".", None)]
    fn parses_leading_numeric_prefix(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_leading_f64(input), expected);
    }

    #[test]
    fn rejects_non_iso_dates() {
        assert_eq!(parse_date_safe("2 months ago"), None);
        assert_eq!(
            parse_date_safe("2025-01-12"),
            NaiveDate::from_ymd_opt(2025, 1, 12)
        );
    }

    #[test]
    fn formats_numbers_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1.5, 1), "-1.5");
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_int(9855u32), "9,855");
    }

    #[test]
    fn oversized_numbers_fall_back_to_plain_format() {
        assert_eq!(format_number(1e30, 1), format_plain(1e30));
        assert_eq!(format_number(-1e30, 0), format_plain(-1e30));
    }

    #[test]
    fn plain_format_drops_integer_fraction() {
        assert_eq!(format_plain(505.0), "505");
        assert_eq!(format_plain(4.9), "4.9");
    }

    #[rstest]
    #[case(0, "☆☆☆☆☆")]
    #[case(2, "★★☆☆☆")]
    #[case(5, "★★★★★")]
    fn renders_star_bar(#[case] rating: u8, #[case] expected: &str) {
        assert_eq!(star_bar(rating), expected);
    }

    #[rstest]
    #[case(0.0, "░░░░░░░░░░")]
    #[case(65.5, "███████░░░")]
    #[case(100.0, "██████████")]
    #[case(250.0, "██████████")]
    #[case(-5.0, "░░░░░░░░░░")]
    fn renders_progress_bar(#[case] percent: f64, #[case] expected: &str) {
        assert_eq!(progress_bar(percent, 10), expected);
    }

    #[test]
    fn praise_blurb_uses_first_two_keywords() {
        let keywords = vec!["thorough".to_string(), "patient".to_string(), "caring".to_string()];
        assert_eq!(praise_blurb(&keywords), "Known for being thorough and patient.");
        assert_eq!(praise_blurb(&keywords[..1]), "Known for being thorough.");
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 3.0]), 2.0);
    }
}
