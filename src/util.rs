// Utility helpers for header normalization, cell parsing and number
// formatting.
//
// This module centralizes all the "dirty" CSV text handling so the rest of
// the code can assume normalized column names and typed cell values.
use crate::types::Value;
use num_format::{Locale, ToFormattedString};

/// Normalize a raw CSV header into its canonical form: leading/trailing
/// whitespace stripped and every word title-cased.
///
/// A word starts after any non-alphabetic character, so separators survive
/// untouched: `" country/region "` becomes `"Country/Region"` and `"YEAR"`
/// becomes `"Year"`.
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

/// Parse one CSV cell into a typed [`Value`], being forgiving about the
/// formatting quirks common in exported spreadsheets.
///
/// - Blank or whitespace-only cells become [`Value::Missing`].
/// - Thousands separators (`"1,234"`) are stripped before numeric parsing.
/// - Integers are preferred over floats (`"2020"` stays an integer).
/// - Non-finite parses (`"NaN"`, `"inf"`) are kept as text rather than
///   poisoning later sums.
pub fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    let plain = trimmed.replace(',', "");
    if let Ok(i) = plain.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = plain.parse::<f64>() {
        if f.is_finite() {
            return Value::Float(f);
        }
    }
    Value::Text(trimmed.to_string())
}

/// Format a floating-point value with a fixed number of decimal places and
/// locale-aware thousands separators (e.g. `1,234,567.89`).
pub fn format_number(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    // `num-format` only groups integers, so the fractional digits are
    // re-attached after grouping.
    let mut out = int_part
        .parse::<i64>()
        .unwrap_or(0)
        .to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    if n.is_sign_negative() && n != 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Thousands-separated rendering for integer-like counts in console
/// messages (e.g. `9,855 rows`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_stripped_and_title_cased() {
        assert_eq!(normalize_header(" country/region "), "Country/Region");
        assert_eq!(normalize_header("YEAR"), "Year");
        assert_eq!(normalize_header("deaths per 100k"), "Deaths Per 100k");
        assert_eq!(normalize_header("pm2.5"), "Pm2.5");
    }

    #[test]
    fn cells_parse_to_typed_values() {
        assert_eq!(parse_value("2020"), Value::Int(2020));
        assert_eq!(parse_value("1,234"), Value::Int(1234));
        assert_eq!(parse_value("3.5"), Value::Float(3.5));
        assert_eq!(parse_value("  "), Value::Missing);
        assert_eq!(parse_value("India"), Value::Text("India".to_string()));
        assert_eq!(parse_value("NaN"), Value::Text("NaN".to_string()));
    }

    #[test]
    fn numbers_format_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(-4500.0, 2), "-4,500.00");
        assert_eq!(format_int(9855i64), "9,855");
    }
}
