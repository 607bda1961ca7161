//! Number formatting for report tables: `,` groups thousands, `.` separates decimals.

/// Rounds half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // avoid "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a number with thousands grouping and exactly `decimals` fractional digits
///
/// # Examples
///
/// ```
/// use dashboard_frontend::shared::components::table::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let formatted = format!("{:.*}", decimals as usize, round_to(value, decimals));
    group_thousands(&formatted)
}

/// Like [`format_number_with_decimals`] but drops trailing fractional zeros
///
/// ```
/// use dashboard_frontend::shared::components::table::format_number_trimmed;
/// assert_eq!(format_number_trimmed(1.2, 2), "1.2");
/// ```
pub fn format_number_trimmed(value: f64, max_decimals: u8) -> String {
    let formatted = format_number_with_decimals(value, max_decimals);
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Integer with thousands grouping
pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

fn group_thousands(formatted: &str) -> String {
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted, None),
    };

    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(',');
        }
        result.push(c);
    }
    let grouped: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", grouped, d),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234.5, 2), "1,234.50");
        assert_eq!(format_number_with_decimals(1234567.891, 3), "1,234,567.891");
        assert_eq!(format_number_with_decimals(-1234.56, 2), "-1,234.56");
        assert_eq!(format_number_with_decimals(-123.0, 0), "-123");
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(format_number_with_decimals(1234.5, 0), "1,235");
        assert_eq!(format_number_with_decimals(2.5, 0), "3");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_trimmed() {
        assert_eq!(format_number_trimmed(1.2, 2), "1.2");
        assert_eq!(format_number_trimmed(1.0, 2), "1");
        assert_eq!(format_number_trimmed(1200.0, 2), "1,200");
        assert_eq!(format_number_trimmed(0.456, 2), "0.46");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1,234,567");
        assert_eq!(format_number_int(0.0), "0");
        assert_eq!(format_number_int(-1234.0), "-1,234");
    }
}
