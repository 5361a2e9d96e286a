pub use sea_orm_migration::prelude::*;

mod m20250301_000001_initial;
mod m20250308_000001_add_comments_likes_follows;
mod m20250315_000001_add_verifications;
mod m20250322_000001_add_point_system;
mod m20250329_000001_add_reports;
mod m20250412_000001_add_streak_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_initial::Migration),
            Box::new(m20250308_000001_add_comments_likes_follows::Migration),
            Box::new(m20250315_000001_add_verifications::Migration),
            Box::new(m20250322_000001_add_point_system::Migration),
            Box::new(m20250329_000001_add_reports::Migration),
            Box::new(m20250412_000001_add_streak_columns::Migration),
        ]
    }
}
