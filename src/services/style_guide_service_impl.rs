use crate::api::{StyleGuideDto, StyleGuideRequest, UpdateStyleGuideRequest};
use crate::context::RequestContext;
use crate::db::Store;
use crate::domain::{
    ContentLength, ContentTone, Formality, GuideLanguage, ReadingLevel, now_timestamp,
};
use crate::entities::style_guides;
use crate::services::style_guide_service::{
    StyleGuideError, StyleGuideService, validate_request, validate_update,
};
use async_trait::async_trait;
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

pub struct SeaOrmStyleGuideService {
    store: Store,
}

fn parse_or<T>(guide_id: &str, field: &str, value: &str, fallback: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        warn!(guide_id, field, error = %e, "Unreadable style guide column, using fallback");
        fallback
    })
}

#[must_use]
pub fn style_guide_to_dto(model: style_guides::Model) -> StyleGuideDto {
    let personality = serde_json::from_str(&model.personality).unwrap_or_else(|e| {
        warn!(guide_id = %model.id, error = %e, "Unreadable personality traits");
        Vec::new()
    });

    StyleGuideDto {
        formality: parse_or(&model.id, "formality", &model.formality, Formality::Neutral),
        language: parse_or(&model.id, "language", &model.language, GuideLanguage::Ko),
        tone: parse_or(&model.id, "tone", &model.tone, ContentTone::Professional),
        content_length: parse_or(
            &model.id,
            "content_length",
            &model.content_length,
            ContentLength::Medium,
        ),
        reading_level: parse_or(
            &model.id,
            "reading_level",
            &model.reading_level,
            ReadingLevel::Intermediate,
        ),
        personality,
        id: model.id,
        owner_id: model.owner_id,
        brand_name: model.brand_name,
        brand_description: model.brand_description,
        target_audience: model.target_audience,
        pain_points: model.pain_points,
        notes: model.notes,
        is_default: model.is_default,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn encode_traits(traits: &[String]) -> Result<String, StyleGuideError> {
    let trimmed: Vec<&str> = traits.iter().map(|t| t.trim()).collect();
    serde_json::to_string(&trimmed).map_err(|e| StyleGuideError::Validation(e.to_string()))
}

fn apply_update(
    model: &mut style_guides::Model,
    req: UpdateStyleGuideRequest,
    now: String,
) -> Result<(), StyleGuideError> {
    if let Some(v) = req.brand_name {
        model.brand_name = v.trim().to_string();
    }
    if let Some(v) = req.brand_description {
        model.brand_description = v;
    }
    if let Some(v) = req.personality {
        model.personality = encode_traits(&v)?;
    }
    if let Some(v) = req.formality {
        model.formality = v.as_str().to_string();
    }
    if let Some(v) = req.target_audience {
        model.target_audience = v;
    }
    if let Some(v) = req.pain_points {
        model.pain_points = v;
    }
    if let Some(v) = req.language {
        model.language = v.as_str().to_string();
    }
    if let Some(v) = req.tone {
        model.tone = v.as_str().to_string();
    }
    if let Some(v) = req.content_length {
        model.content_length = v.as_str().to_string();
    }
    if let Some(v) = req.reading_level {
        model.reading_level = v.as_str().to_string();
    }
    if let Some(v) = req.notes {
        model.notes = Some(v);
    }
    model.updated_at = now;
    Ok(())
}

impl SeaOrmStyleGuideService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn load(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<style_guides::Model, StyleGuideError> {
        self.store
            .style_guides()
            .get(&ctx.user_id, id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::FETCH_ERROR, e))?
            .ok_or(StyleGuideError::NotFound)
    }
}

#[async_trait]
impl StyleGuideService for SeaOrmStyleGuideService {
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<StyleGuideDto>, StyleGuideError> {
        let rows = self
            .store
            .style_guides()
            .list(&ctx.user_id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::FETCH_ERROR, e))?;
        Ok(rows.into_iter().map(style_guide_to_dto).collect())
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<StyleGuideDto, StyleGuideError> {
        self.load(ctx, id).await.map(style_guide_to_dto)
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        req: StyleGuideRequest,
    ) -> Result<StyleGuideDto, StyleGuideError> {
        validate_request(&req)?;

        let repo = self.store.style_guides();
        let is_first = repo
            .find_default(&ctx.user_id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::CREATE_ERROR, e))?
            .is_none();

        let now = now_timestamp();
        let model = style_guides::Model {
            id: Uuid::new_v4().to_string(),
            owner_id: ctx.user_id.clone(),
            brand_name: req.brand_name.trim().to_string(),
            brand_description: req.brand_description,
            personality: encode_traits(&req.personality)?,
            formality: req.formality.as_str().to_string(),
            target_audience: req.target_audience,
            pain_points: req.pain_points,
            language: req.language.as_str().to_string(),
            tone: req.tone.as_str().to_string(),
            content_length: req.content_length.as_str().to_string(),
            reading_level: req.reading_level.as_str().to_string(),
            notes: req.notes,
            is_default: is_first,
            created_at: now.clone(),
            updated_at: now,
        };

        let created = repo
            .insert(model)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::CREATE_ERROR, e))?;

        info!(
            request_id = %ctx.request_id,
            guide_id = %created.id,
            is_default = created.is_default,
            "Style guide created"
        );
        Ok(style_guide_to_dto(created))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: UpdateStyleGuideRequest,
    ) -> Result<StyleGuideDto, StyleGuideError> {
        validate_update(&req)?;

        let mut model = self.load(ctx, id).await?;
        apply_update(&mut model, req, now_timestamp())?;

        let saved = self
            .store
            .style_guides()
            .save(model)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::UPSERT_ERROR, e))?
            .ok_or(StyleGuideError::NotFound)?;

        info!(request_id = %ctx.request_id, guide_id = %id, "Style guide updated");
        Ok(style_guide_to_dto(saved))
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), StyleGuideError> {
        let deleted = self
            .store
            .style_guides()
            .delete(&ctx.user_id, id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::UPSERT_ERROR, e))?;

        if !deleted {
            return Err(StyleGuideError::NotFound);
        }
        info!(request_id = %ctx.request_id, guide_id = %id, "Style guide deleted");
        Ok(())
    }

    async fn set_default(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<StyleGuideDto, StyleGuideError> {
        let updated = self
            .store
            .style_guides()
            .set_default(&ctx.user_id, id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::UPSERT_ERROR, e))?;

        if !updated {
            return Err(StyleGuideError::NotFound);
        }
        info!(request_id = %ctx.request_id, guide_id = %id, "Default style guide changed");
        self.get(ctx, id).await
    }

    async fn resolve(
        &self,
        ctx: &RequestContext,
        requested: Option<&str>,
    ) -> Result<Option<StyleGuideDto>, StyleGuideError> {
        if let Some(id) = requested {
            return self.get(ctx, id).await.map(Some);
        }

        let guide = self
            .store
            .style_guides()
            .find_default(&ctx.user_id)
            .await
            .map_err(|e| StyleGuideError::database(StyleGuideError::FETCH_ERROR, e))?;
        Ok(guide.map(style_guide_to_dto))
    }
}
