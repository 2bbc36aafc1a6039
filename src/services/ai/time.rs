use std::sync::LazyLock;

use regex::Regex;

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(1[0-2]|0?[1-9]):([0-5][0-9])\s*([AP]M)\b").unwrap()
});

/// Pull the first `H:MM AM/PM` clock time out of free text, normalized to
/// uppercase meridiem. A local fallback that avoids a model round-trip.
pub fn extract_time(text: &str) -> Option<String> {
    CLOCK_TIME.captures(text).map(|caps| {
        format!("{}:{} {}", &caps[1], &caps[2], caps[3].to_uppercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_standard_time() {
        assert_eq!(
            extract_time("how about 10:30 AM on Monday?"),
            Some("10:30 AM".to_string())
        );
    }

    #[test]
    fn test_normalizes_lowercase_and_spacing() {
        assert_eq!(extract_time("3:05pm works"), Some("3:05 PM".to_string()));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            extract_time("either 9:00 AM or 2:00 PM"),
            Some("9:00 AM".to_string())
        );
    }

    #[test]
    fn test_no_time_present() {
        assert_eq!(extract_time("sometime next week"), None);
        assert_eq!(extract_time("at 25:99 PM"), None);
    }
}
