//! URL-safe slug derivation from quiz titles.

/// Reduces a title to a lowercase, dash-separated slug of at most 100
/// characters. Characters outside ASCII alphanumerics, whitespace, dashes
/// and underscores are dropped, so a title with no latin characters yields
/// an empty slug and the caller must fall back to a generated one.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;

    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
        // Other punctuation is dropped without forcing a separator.
    }

    out.chars().take(100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title_slugifies() {
        assert_eq!(slugify("My Quiz"), "my-quiz");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("Discover Your Perfect Blend!"), "discover-your-perfect-blend");
        assert_eq!(slugify("What's Your Match?"), "whats-your-match");
    }

    #[test]
    fn runs_of_separators_collapse() {
        assert_eq!(slugify("  a  -  b __ c  "), "a-b-c");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slugify("--hello world--"), "hello-world");
    }

    #[test]
    fn non_latin_titles_yield_empty_slug() {
        assert_eq!(slugify("第一季度测验"), "");
    }

    #[test]
    fn long_titles_are_truncated_to_100() {
        let long = "a".repeat(150);
        assert_eq!(slugify(&long).len(), 100);
    }
}
