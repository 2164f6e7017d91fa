use std::sync::OnceLock;

use regex::Regex;

/// URL schemes a link or image may point at. Scheme-less (relative) targets are
/// also allowed.
pub const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// The target to emit for a link or image, or `""` when it is missing or uses a
/// scheme outside [`ALLOWED_SCHEMES`].
///
/// Browsers ignore whitespace and control characters inside a scheme
/// (`java\tscript:` is `javascript:`), so those are dropped before the check.
pub fn safe_target(target: Option<&str>) -> &str {
    static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
    let scheme_regex = SCHEME_REGEX
        .get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("Invalid scheme regex"));

    let Some(target) = target.map(str::trim).filter(|t| !t.is_empty()) else {
        return "";
    };

    let normalized: String = target
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match scheme_regex.captures(&normalized) {
        None => target,
        Some(caps) => {
            let scheme = caps[1].to_ascii_lowercase();
            if ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                target
            } else {
                log::debug!("Dropping target with disallowed scheme {scheme:?}");
                ""
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com/a?b=c")]
    #[case("http://example.com")]
    #[case("HTTPS://EXAMPLE.COM")]
    #[case("mailto:me@example.com")]
    #[case("tel:+441234567890")]
    #[case("/images/cat.png")]
    #[case("cat.png")]
    #[case("#section")]
    #[case("//cdn.example.com/x.js")]
    #[case("/notes/a:b")]
    fn allowed_targets_pass_through(#[case] target: &str) {
        assert_eq!(safe_target(Some(target)), target);
    }

    #[rstest]
    #[case("javascript:alert(1)")]
    #[case("JavaScript:alert(1)")]
    #[case("  javascript:alert(1)")]
    #[case("java\tscript:alert(1)")]
    #[case("java\nscript:alert(1)")]
    #[case("data:text/html;base64,PHNjcmlwdD4=")]
    #[case("vbscript:msgbox")]
    #[case("file:///etc/passwd")]
    fn disallowed_schemes_are_dropped(#[case] target: &str) {
        assert_eq!(safe_target(Some(target)), "");
    }

    #[test]
    fn missing_or_blank_target_is_empty() {
        assert_eq!(safe_target(None), "");
        assert_eq!(safe_target(Some("   ")), "");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(safe_target(Some("  /a.png \n")), "/a.png");
    }
}
