pub use sea_orm_migration::prelude::*;

mod m20250601_120000_create_donations_table;
mod m20250601_120500_create_claimed_numbers_table;
mod m20250601_121000_create_fundraiser_settings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_120000_create_donations_table::Migration),
            Box::new(m20250601_120500_create_claimed_numbers_table::Migration),
            Box::new(m20250601_121000_create_fundraiser_settings_table::Migration),
        ]
    }
}
