use sea_orm_migration::prelude::*;

mod m20260301_create_schema;
mod m20260302_seed_defaults;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_create_schema::Migration),
            Box::new(m20260302_seed_defaults::Migration),
        ]
    }
}
