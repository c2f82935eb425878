pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_played_games_table;
mod m20240101_000003_create_game_stats_table;
mod m20240101_000004_create_daily_games_and_leaderboards;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_played_games_table::Migration),
            Box::new(m20240101_000003_create_game_stats_table::Migration),
            Box::new(m20240101_000004_create_daily_games_and_leaderboards::Migration),
        ]
    }
}
