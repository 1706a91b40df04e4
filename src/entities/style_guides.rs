use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "style_guides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub brand_name: String,
    #[sea_orm(column_type = "Text")]
    pub brand_description: String,
    /// JSON array of personality traits.
    pub personality: String,
    pub formality: String,
    #[sea_orm(column_type = "Text")]
    pub target_audience: String,
    #[sea_orm(column_type = "Text")]
    pub pain_points: String,
    pub language: String,
    pub tone: String,
    pub content_length: String,
    pub reading_level: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
