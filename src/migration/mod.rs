//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260210_000001_create_users;
mod m20260210_000002_create_api_keys;
mod m20260210_000003_create_messages;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260210_000001_create_users::Migration),
            Box::new(m20260210_000002_create_api_keys::Migration),
            Box::new(m20260210_000003_create_messages::Migration),
        ]
    }
}
