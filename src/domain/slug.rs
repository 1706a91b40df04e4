//! URL slugs for articles.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::constants::articles::MAX_SLUG_CHARS;

const SLUG_SUFFIX_LEN: usize = 6;
const FALLBACK_SLUG: &str = "article";

/// Reduces text to `[a-z0-9]` runs joined by single hyphens.
///
/// Anything outside ASCII letters and digits is dropped, including Hangul.
/// Whitespace, underscores and hyphens become separators.
#[must_use]
pub fn generate_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// Slug plus a random suffix so repeated titles do not collide. The result
/// never exceeds the article slug limit.
#[must_use]
pub fn generate_unique_slug(text: &str) -> String {
    let mut base = generate_slug(text);
    let max_base = MAX_SLUG_CHARS - SLUG_SUFFIX_LEN - 1;
    if base.len() > max_base {
        base.truncate(max_base);
        base.truncate(base.trim_end_matches('-').len());
    }
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("{base}-{suffix}")
}

/// Matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_english_title() {
        assert_eq!(generate_slug("Hello World"), "hello-world");
        assert_eq!(generate_slug("  Rust: The Good Parts! "), "rust-the-good-parts");
        assert_eq!(generate_slug("snake_case and - dashes"), "snake-case-and-dashes");
    }

    #[test]
    fn slug_drops_hangul() {
        assert_eq!(generate_slug("SEO 가이드 2025"), "seo-2025");
        assert_eq!(generate_slug("키워드 관리"), "");
    }

    #[test]
    fn unique_slug_is_valid() {
        for title in ["Hello World", "키워드 관리", "---", "A  B"] {
            let slug = generate_unique_slug(title);
            assert!(is_valid_slug(&slug), "invalid slug {slug:?} for {title:?}");
        }
        assert!(generate_unique_slug("키워드").starts_with("article-"));
    }

    #[test]
    fn unique_slug_respects_length_limit() {
        let title = "word ".repeat(100);
        let slug = generate_unique_slug(&title);
        assert!(slug.len() <= MAX_SLUG_CHARS);
        assert!(is_valid_slug(&slug), "invalid slug {slug:?}");
    }

    #[test]
    fn slug_pattern() {
        assert!(is_valid_slug("a"));
        assert!(is_valid_slug("my-post-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("Upper"));
        assert!(!is_valid_slug("under_score"));
    }
}
