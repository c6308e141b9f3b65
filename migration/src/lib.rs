pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_movies;
mod m20251030_000001_add_is_top_pick;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_movies::Migration),
            Box::new(m20251030_000001_add_is_top_pick::Migration),
        ]
    }
}
