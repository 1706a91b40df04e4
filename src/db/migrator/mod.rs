use sea_orm_migration::prelude::*;

mod m20250301_keywords;
mod m20250318_articles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_keywords::Migration),
            Box::new(m20250318_articles::Migration),
        ]
    }
}
