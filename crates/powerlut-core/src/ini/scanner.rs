//! Section/key scanner for INI-like car data

use regex::Regex;
use std::sync::OnceLock;

/// `[NAME]` on a trimmed line; the capture is the header name
fn header_re() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"^\[(.*)\]$").unwrap())
}

/// Return the header name if the line is a `[...]` section header
pub fn section_header(line: &str) -> Option<&str> {
    header_re()
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Find the first `key=value` inside `[section]`
///
/// Scanning stops at the next section header. The returned value has any
/// `;` comment removed and is trimmed; it may be empty, in which case the
/// caller decides whether that counts as missing.
pub fn find_key<S: AsRef<str>>(lines: &[S], section: &str, key: &str) -> Option<String> {
    let wanted = format!("[{}]", section).to_uppercase();
    let prefix = format!("{}=", key);
    let mut in_section = false;

    for line in lines {
        let line = line.as_ref().trim();

        if in_section {
            if section_header(line).is_some() {
                break;
            }
            if let Some(rest) = line.strip_prefix(&prefix) {
                return Some(clean_value(rest));
            }
        } else if line.to_uppercase() == wanted {
            in_section = true;
        }
    }

    None
}

/// Find the first `key=value` anywhere in the file, ignoring sections
pub fn find_global_key<S: AsRef<str>>(lines: &[S], key: &str) -> Option<String> {
    let prefix = format!("{}=", key);
    lines
        .iter()
        .find_map(|line| line.as_ref().trim().strip_prefix(&prefix).map(clean_value))
}

/// Drop a trailing `;` comment and surrounding whitespace
fn clean_value(raw: &str) -> String {
    raw.split(';').next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINE_INI: &[&str] = &[
        "[HEADER]\n",
        "VERSION=1\n",
        "POWER_CURVE=power_v2.lut ; torque curve\n",
        "\n",
        "[TURBO_0]\n",
        "LAG_DN=0.99\n",
        "MAX_BOOST=1.2 ; bar\n",
        "[TURBO_1]\n",
        "MAX_BOOST=0.4\n",
    ];

    #[test]
    fn test_find_key_in_section() {
        assert_eq!(
            find_key(ENGINE_INI, "HEADER", "POWER_CURVE"),
            Some("power_v2.lut".to_string())
        );
        assert_eq!(
            find_key(ENGINE_INI, "TURBO_0", "MAX_BOOST"),
            Some("1.2".to_string())
        );
    }

    #[test]
    fn test_find_key_section_case_insensitive() {
        let lines = ["[header]", "POWER_CURVE=a.lut"];
        assert_eq!(
            find_key(&lines, "HEADER", "POWER_CURVE"),
            Some("a.lut".to_string())
        );
    }

    #[test]
    fn test_find_key_is_case_sensitive() {
        let lines = ["[HEADER]", "power_curve=a.lut"];
        assert_eq!(find_key(&lines, "HEADER", "POWER_CURVE"), None);
    }

    #[test]
    fn test_find_key_stops_at_next_section() {
        let lines = ["[TURBO_0]", "LAG_UP=0.9", "[TURBO_1]", "MAX_BOOST=0.4"];
        assert_eq!(find_key(&lines, "TURBO_0", "MAX_BOOST"), None);
    }

    #[test]
    fn test_find_key_missing_section() {
        assert_eq!(find_key(ENGINE_INI, "ENGINE_DATA", "MINIMUM"), None);
    }

    #[test]
    fn test_find_key_ignores_key_outside_section() {
        let lines = ["POWER_CURVE=outside.lut", "[HEADER]", "VERSION=1"];
        assert_eq!(find_key(&lines, "HEADER", "POWER_CURVE"), None);
    }

    #[test]
    fn test_find_key_empty_value() {
        let lines = ["[HEADER]", "POWER_CURVE= ; nothing here"];
        assert_eq!(
            find_key(&lines, "HEADER", "POWER_CURVE"),
            Some(String::new())
        );
    }

    #[test]
    fn test_find_key_prefix_must_include_equals() {
        let lines = ["[TURBO_0]", "MAX_BOOST_RATE=3", "MAX_BOOST=0.8"];
        assert_eq!(
            find_key(&lines, "TURBO_0", "MAX_BOOST"),
            Some("0.8".to_string())
        );
    }

    #[test]
    fn test_find_global_key() {
        let lines = ["[INFO]", "SCREEN_NAME=Ferrari 458 Italia ; name\n"];
        assert_eq!(
            find_global_key(&lines, "SCREEN_NAME"),
            Some("Ferrari 458 Italia".to_string())
        );
        assert_eq!(find_global_key(&lines, "BRAND"), None);
    }

    #[test]
    fn test_section_header() {
        assert_eq!(section_header("  [TURBO_0]  \n"), Some("TURBO_0"));
        assert_eq!(section_header("TURBO_0"), None);
        assert_eq!(section_header("[]"), Some(""));
    }
}
