use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "keywords")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Phrase as entered, trimmed.
    pub phrase: String,

    /// Dedup key produced by `normalize_keyword`.
    #[sea_orm(unique)]
    pub normalized: String,

    pub source: String,

    pub search_volume: Option<i64>,

    pub cpc: Option<f64>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
