pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_profiles;
mod m20260105_000002_create_vacation_requests;
mod m20260105_000003_create_christmas_options;
mod m20260105_000004_create_user_year_choices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_profiles::Migration),
            Box::new(m20260105_000002_create_vacation_requests::Migration),
            Box::new(m20260105_000003_create_christmas_options::Migration),
            Box::new(m20260105_000004_create_user_year_choices::Migration),
        ]
    }
}
