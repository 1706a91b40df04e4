//! Turns free-form model output into a structured article.
//!
//! Models asked for JSON do not always return only JSON. Parsing falls back
//! through progressively looser shapes:
//!
//! 1. the whole text as a JSON object,
//! 2. a fenced ```` ```json ```` block,
//! 3. `key: value` blocks (`title:`, `content:`, `metaDescription:`,
//!    `keywords:`, `headings:`),
//! 4. the first Markdown H1 as the title and the rest as the body.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

pub const FALLBACK_TITLE: &str = "AI 생성 글";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub headings: Vec<String>,
}

impl GeneratedArticle {
    fn is_meaningful(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }
}

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"(?is)```(?:json)?\s*(.+?)```")
}

fn field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(
        &RE,
        r"(?i)^\s*(title|content|metaDescription|keywords|headings)\s*:\s*(.*)$",
    )
}

fn h1_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"(?m)^#\s+(.+)$")
}

#[must_use]
pub fn parse_generated_text(raw: &str) -> GeneratedArticle {
    let text = raw.trim();

    if let Some(article) = parse_json_object(text) {
        return article;
    }

    if let Some(article) = fence_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|body| parse_json_object(body.as_str().trim()))
    {
        return article;
    }

    let article = parse_key_value_blocks(text);
    if article.is_meaningful() {
        return article;
    }

    parse_markdown(text, article)
}

fn parse_json_object(text: &str) -> Option<GeneratedArticle> {
    let Value::Object(obj) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };

    let string_field = |key: &str| -> String {
        match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    };

    let list_field = |key: &str| -> Vec<String> {
        match obj.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    };

    let article = GeneratedArticle {
        title: string_field("title"),
        content: string_field("content"),
        meta_description: Some(string_field("metaDescription")).filter(|s| !s.is_empty()),
        keywords: list_field("keywords"),
        headings: list_field("headings"),
    };

    article.is_meaningful().then_some(article)
}

fn split_list(segment: &str) -> Vec<String> {
    segment
        .split([',', '|', '\n'])
        .map(|s| s.trim_start_matches(['-', ' ', '\t']).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_key_value_blocks(text: &str) -> GeneratedArticle {
    let lines: Vec<&str> = text.lines().collect();
    let field_re = field_regex();
    let mut article = GeneratedArticle::default();

    // Lines after `start` up to the next field line.
    let block_end = |start: usize| -> usize {
        lines[start..]
            .iter()
            .position(|l| field_re.is_match(l))
            .map_or(lines.len(), |offset| start + offset)
    };

    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = field_re.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let key = caps[1].to_ascii_lowercase();
        let rest = caps.get(2).map_or("", |m| m.as_str()).trim();

        match key.as_str() {
            "title" => article.title = rest.to_string(),
            "metadescription" => {
                article.meta_description = Some(rest.to_string()).filter(|s| !s.is_empty());
            }
            "content" => {
                let end = block_end(i + 1);
                let mut body = String::from(rest);
                let block = lines[i + 1..end].join("\n");
                if !body.is_empty() && !block.is_empty() {
                    body.push('\n');
                }
                body.push_str(&block);
                article.content = body.trim().to_string();
                i = end;
                continue;
            }
            "keywords" | "headings" => {
                let items = if rest.is_empty() {
                    let end = block_end(i + 1);
                    let items = split_list(&lines[i + 1..end].join("\n"));
                    i = end;
                    items
                } else {
                    i += 1;
                    split_list(rest)
                };
                if key == "keywords" {
                    article.keywords = items;
                } else {
                    article.headings = items;
                }
                continue;
            }
            _ => {}
        }

        i += 1;
    }

    article
}

fn parse_markdown(text: &str, partial: GeneratedArticle) -> GeneratedArticle {
    let (title, content) = match h1_regex().captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let title = caps[1].trim().to_string();
            (title, text[whole.end..].trim().to_string())
        }
        None => (FALLBACK_TITLE.to_string(), text.to_string()),
    };

    GeneratedArticle {
        title,
        content,
        ..partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_json() {
        let raw = r#"{"title":"SEO 가이드","content":"본문","metaDescription":"요약","keywords":["seo","블로그"],"headings":["소개"]}"#;
        let article = parse_generated_text(raw);
        assert_eq!(article.title, "SEO 가이드");
        assert_eq!(article.content, "본문");
        assert_eq!(article.meta_description.as_deref(), Some("요약"));
        assert_eq!(article.keywords, vec!["seo", "블로그"]);
        assert_eq!(article.headings, vec!["소개"]);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "Here you go:\n```json\n{\"title\": \"Rust Tips\", \"content\": \"## Intro\\nBody\"}\n```\nEnjoy!";
        let article = parse_generated_text(raw);
        assert_eq!(article.title, "Rust Tips");
        assert_eq!(article.content, "## Intro\nBody");
        assert!(article.keywords.is_empty());
        assert!(article.meta_description.is_none());
    }

    #[test]
    fn parses_key_value_blocks() {
        let raw = "title: My Post\n\
                   metaDescription: Short summary\n\
                   keywords: rust, axum | tokio\n\
                   content:\n\
                   ## First\n\
                   Paragraph one.\n\
                   \n\
                   ## Second\n\
                   headings:\n\
                   - First\n\
                   - Second\n";
        let article = parse_generated_text(raw);
        assert_eq!(article.title, "My Post");
        assert_eq!(article.meta_description.as_deref(), Some("Short summary"));
        assert_eq!(article.keywords, vec!["rust", "axum", "tokio"]);
        assert_eq!(article.content, "## First\nParagraph one.\n\n## Second");
        assert_eq!(article.headings, vec!["First", "Second"]);
    }

    #[test]
    fn content_on_same_line_is_kept() {
        let article = parse_generated_text("Title: T\nContent: first line\nsecond line");
        assert_eq!(article.title, "T");
        assert_eq!(article.content, "first line\nsecond line");
    }

    #[test]
    fn falls_back_to_first_h1() {
        let raw = "Some preamble\n# The Real Title\n\nBody text here.";
        let article = parse_generated_text(raw);
        assert_eq!(article.title, "The Real Title");
        assert_eq!(article.content, "Body text here.");
    }

    #[test]
    fn falls_back_to_default_title() {
        let article = parse_generated_text("just some prose without structure");
        assert_eq!(article.title, FALLBACK_TITLE);
        assert_eq!(article.content, "just some prose without structure");
    }

    #[test]
    fn empty_json_object_is_not_accepted() {
        let article = parse_generated_text("{}");
        assert_eq!(article.title, FALLBACK_TITLE);
        assert_eq!(article.content, "{}");
    }
}
