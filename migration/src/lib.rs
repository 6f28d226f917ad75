pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_sections;
mod m20250315_000001_create_student_anthros;
mod m20250401_000001_create_performance_tests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_sections::Migration),
            Box::new(m20250315_000001_create_student_anthros::Migration),
            Box::new(m20250401_000001_create_performance_tests::Migration),
        ]
    }
}
