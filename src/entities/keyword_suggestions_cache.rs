use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "keyword_suggestions_cache")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// JSON array of the seed terms the response was fetched for.
    #[sea_orm(column_type = "Text")]
    pub seeds: String,
    pub language_name: String,
    pub location_code: i32,
    #[sea_orm(column_type = "Text")]
    pub response_data: String,
    pub created_at: String,
    pub expires_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
