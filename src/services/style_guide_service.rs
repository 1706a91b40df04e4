//! Domain service for brand style guides.

use crate::api::{StyleGuideDto, StyleGuideRequest, UpdateStyleGuideRequest};
use crate::constants::style_guides::{
    MAX_BRAND_DESCRIPTION_CHARS, MAX_BRAND_NAME_CHARS, MAX_NOTES_CHARS, MAX_PAIN_POINTS_CHARS,
    MAX_PERSONALITY_TRAITS, MAX_TARGET_AUDIENCE_CHARS,
};
use crate::context::RequestContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleGuideError {
    #[error("{0}")]
    Validation(String),

    #[error("Style guide not found")]
    NotFound,

    #[error("{message}")]
    Database { code: &'static str, message: String },
}

impl StyleGuideError {
    pub const CREATE_ERROR: &'static str = "STYLE_GUIDE_CREATE_ERROR";
    pub const FETCH_ERROR: &'static str = "STYLE_GUIDE_FETCH_ERROR";
    pub const UPSERT_ERROR: &'static str = "STYLE_GUIDE_UPSERT_ERROR";

    pub fn database(code: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Database {
            code,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "STYLE_GUIDE_VALIDATION_ERROR",
            Self::NotFound => "STYLE_GUIDE_NOT_FOUND",
            Self::Database { code, .. } => *code,
        }
    }
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), StyleGuideError> {
    if value.trim().is_empty() {
        return Err(StyleGuideError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(StyleGuideError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_personality(traits: &[String]) -> Result<(), StyleGuideError> {
    if traits.is_empty() || traits.len() > MAX_PERSONALITY_TRAITS {
        return Err(StyleGuideError::Validation(format!(
            "personality must list between 1 and {MAX_PERSONALITY_TRAITS} traits"
        )));
    }
    if traits.iter().any(|t| t.trim().is_empty()) {
        return Err(StyleGuideError::Validation(
            "personality traits must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn check_notes(notes: &str) -> Result<(), StyleGuideError> {
    if notes.chars().count() > MAX_NOTES_CHARS {
        return Err(StyleGuideError::Validation(format!(
            "notes must be at most {MAX_NOTES_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_request(req: &StyleGuideRequest) -> Result<(), StyleGuideError> {
    check_text("brandName", &req.brand_name, MAX_BRAND_NAME_CHARS)?;
    check_text(
        "brandDescription",
        &req.brand_description,
        MAX_BRAND_DESCRIPTION_CHARS,
    )?;
    check_personality(&req.personality)?;
    check_text(
        "targetAudience",
        &req.target_audience,
        MAX_TARGET_AUDIENCE_CHARS,
    )?;
    check_text("painPoints", &req.pain_points, MAX_PAIN_POINTS_CHARS)?;
    if let Some(notes) = &req.notes {
        check_notes(notes)?;
    }
    Ok(())
}

pub fn validate_update(req: &UpdateStyleGuideRequest) -> Result<(), StyleGuideError> {
    if let Some(v) = &req.brand_name {
        check_text("brandName", v, MAX_BRAND_NAME_CHARS)?;
    }
    if let Some(v) = &req.brand_description {
        check_text("brandDescription", v, MAX_BRAND_DESCRIPTION_CHARS)?;
    }
    if let Some(v) = &req.personality {
        check_personality(v)?;
    }
    if let Some(v) = &req.target_audience {
        check_text("targetAudience", v, MAX_TARGET_AUDIENCE_CHARS)?;
    }
    if let Some(v) = &req.pain_points {
        check_text("painPoints", v, MAX_PAIN_POINTS_CHARS)?;
    }
    if let Some(v) = &req.notes {
        check_notes(v)?;
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait StyleGuideService: Send + Sync {
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<StyleGuideDto>, StyleGuideError>;

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<StyleGuideDto, StyleGuideError>;

    /// The caller's first guide becomes their default.
    async fn create(
        &self,
        ctx: &RequestContext,
        req: StyleGuideRequest,
    ) -> Result<StyleGuideDto, StyleGuideError>;

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateStyleGuideRequest,
    ) -> Result<StyleGuideDto, StyleGuideError>;

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), StyleGuideError>;

    async fn set_default(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<StyleGuideDto, StyleGuideError>;

    /// Guide to write with: the requested one, else the caller's default,
    /// else none. A requested id the caller does not own is `NotFound`.
    async fn resolve(
        &self,
        ctx: &RequestContext,
        requested: Option<&str>,
    ) -> Result<Option<StyleGuideDto>, StyleGuideError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentLength, ContentTone, Formality, GuideLanguage, ReadingLevel};

    fn request() -> StyleGuideRequest {
        StyleGuideRequest {
            brand_name: "Acme".to_string(),
            brand_description: "Tools for builders".to_string(),
            personality: vec!["bold".to_string(), "warm".to_string()],
            formality: Formality::Neutral,
            target_audience: "Small teams".to_string(),
            pain_points: "Too little time".to_string(),
            language: GuideLanguage::Ko,
            tone: ContentTone::Friendly,
            content_length: ContentLength::Medium,
            reading_level: ReadingLevel::Beginner,
            notes: None,
        }
    }

    #[test]
    fn accepts_complete_request() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn brand_name_bounds() {
        let mut req = request();
        req.brand_name = " ".to_string();
        assert!(validate_request(&req).is_err());
        req.brand_name = "x".repeat(101);
        assert!(validate_request(&req).is_err());
        req.brand_name = "브".repeat(100);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn personality_bounds() {
        let mut req = request();
        req.personality = vec![];
        assert!(validate_request(&req).is_err());
        req.personality = (0..6).map(|i| format!("t{i}")).collect();
        assert!(validate_request(&req).is_err());
        req.personality = vec!["ok".to_string(), "  ".to_string()];
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn update_checks_present_fields_only() {
        assert!(validate_update(&UpdateStyleGuideRequest::default()).is_ok());
        let bad = UpdateStyleGuideRequest {
            notes: Some("n".repeat(2001)),
            ..Default::default()
        };
        let err = validate_update(&bad).unwrap_err();
        assert_eq!(err.code(), "STYLE_GUIDE_VALIDATION_ERROR");
    }
}
