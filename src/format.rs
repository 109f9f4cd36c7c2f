const SUFFIXES: [&str; 5] = ["", "k", "M", "B", "T"];

/// Abbreviate a number with a magnitude suffix, e.g. `1234567.0` → `"1.235M"`.
///
/// The quotient is rounded to 3 decimal places with trailing zeros dropped.
/// Division stops at the last suffix, so 10^15 renders as `"1000T"`.
pub fn format_number(number: f64) -> String {
    if !number.is_finite() {
        return number.to_string();
    }
    let mut value = number;
    let mut magnitude = 0;
    while value.abs() >= 1000.0 && magnitude < SUFFIXES.len() - 1 {
        magnitude += 1;
        value /= 1000.0;
    }
    let rounded = format!("{value:.3}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{trimmed}{}", SUFFIXES[magnitude])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_suffixes() {
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1k");
        assert_eq!(format_number(1_234_567.0), "1.235M");
        assert_eq!(format_number(567_800_000.0), "567.8M");
        assert_eq!(format_number(2_500_000_000.0), "2.5B");
    }

    #[test]
    fn small_and_negative_values() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.3456), "12.346");
        assert_eq!(format_number(-4_200.0), "-4.2k");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn beyond_billions() {
        assert_eq!(format_number(3e12), "3T");
        assert_eq!(format_number(1e15), "1000T");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }
}
