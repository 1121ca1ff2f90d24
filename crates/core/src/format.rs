//! Label formatting.

/// Formats whole minutes as `"{h}h{mm}'"`, e.g. `70 -> "1h10'"`.
///
/// Hours are unpadded, minutes always have two digits.
pub fn format_hours_minutes(mins: u32) -> String {
    format!("{}h{:02}'", mins / 60, mins % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_hours_minutes(0), "0h00'");
    }

    #[test]
    fn test_known_values() {
        assert_eq!(format_hours_minutes(10), "0h10'");
        assert_eq!(format_hours_minutes(59), "0h59'");
        assert_eq!(format_hours_minutes(60), "1h00'");
        assert_eq!(format_hours_minutes(70), "1h10'");
        assert_eq!(format_hours_minutes(150), "2h30'");
        assert_eq!(format_hours_minutes(840), "14h00'");
        assert_eq!(format_hours_minutes(1000), "16h40'");
    }

    #[test]
    fn test_minutes_always_two_digits() {
        for mins in 0..=1500u32 {
            let label = format_hours_minutes(mins);
            let (hours, rest) = label.split_once('h').unwrap();
            assert_eq!(hours.parse::<u32>().unwrap(), mins / 60);
            assert_eq!(rest.len(), 3, "bad label {label}");
            assert!(rest.ends_with('\''));
            assert_eq!(rest[..2].parse::<u32>().unwrap(), mins % 60);
        }
    }

    #[test]
    fn test_large_hours_unpadded() {
        assert_eq!(format_hours_minutes(100 * 60 + 5), "100h05'");
    }
}
