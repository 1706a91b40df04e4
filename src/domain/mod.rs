//! Domain primitives shared by the keyword, quota, article and style guide
//! subsystems.
//!
//! Every enum here is persisted as its lowercase wire name, so the same string
//! travels through JSON bodies and database columns unchanged.

pub mod keyword;
pub mod slug;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use keyword::{PhraseError, normalize_keyword, validate_keyword_phrase};
pub use slug::{generate_slug, generate_unique_slug, is_valid_slug};

/// Returned when a stored or submitted string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Where a keyword row came from.
    KeywordSource {
        Manual => "manual",
        DataForSeo => "dataforseo",
    }
}

string_enum! {
    /// Usage bucket that decides how many generations a user may run.
    QuotaTier {
        Free => "free",
        Pro => "pro",
    }
}

impl QuotaTier {
    #[must_use]
    pub const fn limit(&self) -> i32 {
        match self {
            Self::Free => crate::constants::quota::FREE_TIER_LIMIT,
            Self::Pro => crate::constants::quota::PRO_TIER_LIMIT,
        }
    }
}

string_enum! {
    ArticleStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

string_enum! {
    ContentTone {
        Professional => "professional",
        Friendly => "friendly",
        Inspirational => "inspirational",
        Educational => "educational",
    }
}

string_enum! {
    ContentLength {
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

string_enum! {
    ReadingLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    Formality {
        Casual => "casual",
        Neutral => "neutral",
        Formal => "formal",
    }
}

string_enum! {
    /// Language a style guide writes in; selects the prompt template.
    GuideLanguage {
        Ko => "ko",
        En => "en",
    }
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Asc)
    }
}

/// Formats a timestamp the way every table stores it.
///
/// Fixed microsecond precision with a `Z` suffix keeps the text
/// lexicographically ordered, so `ORDER BY created_at` sorts chronologically.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_through_strings() {
        assert_eq!(KeywordSource::DataForSeo.as_str(), "dataforseo");
        assert_eq!(
            "published".parse::<ArticleStatus>(),
            Ok(ArticleStatus::Published)
        );
        assert_eq!(GuideLanguage::Ko.to_string(), "ko");
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "enterprise".parse::<QuotaTier>().unwrap_err();
        assert_eq!(err.kind, "QuotaTier");
        assert_eq!(err.value, "enterprise");
    }

    #[test]
    fn enums_serialize_as_wire_names() {
        let json = serde_json::to_string(&ContentTone::Inspirational).unwrap();
        assert_eq!(json, "\"inspirational\"");
        let parsed: Formality = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(parsed, Formality::Casual);
    }

    #[test]
    fn tier_limits() {
        assert_eq!(QuotaTier::Free.limit(), 10);
        assert_eq!(QuotaTier::Pro.limit(), 100);
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::milliseconds(5);
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert!(format_timestamp(earlier).ends_with('Z'));
    }
}
