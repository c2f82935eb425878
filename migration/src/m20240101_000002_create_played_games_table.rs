use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlayedGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayedGames::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayedGames::UserId).string().not_null())
                    .col(ColumnDef::new(PlayedGames::GameType).string().not_null())
                    .col(ColumnDef::new(PlayedGames::StartTime).big_integer().not_null())
                    .col(ColumnDef::new(PlayedGames::EndTime).big_integer().not_null())
                    // JSON array of guessed words
                    .col(ColumnDef::new(PlayedGames::Guesses).text().not_null())
                    .col(
                        ColumnDef::new(PlayedGames::NumberOfGuesses)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayedGames::Word).string().not_null())
                    .col(ColumnDef::new(PlayedGames::WonGame).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        // Per-user statistics and the at-most-once-per-day check
        manager
            .create_index(
                Index::create()
                    .name("idx_played_games_user_game_type")
                    .table(PlayedGames::Table)
                    .col(PlayedGames::UserId)
                    .col(PlayedGames::GameType)
                    .to_owned(),
            )
            .await?;

        // Daily leaderboard window scans
        manager
            .create_index(
                Index::create()
                    .name("idx_played_games_start_time")
                    .table(PlayedGames::Table)
                    .col(PlayedGames::StartTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayedGames::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PlayedGames {
    Table,
    Id,
    UserId,
    GameType,
    StartTime,
    EndTime,
    Guesses,
    NumberOfGuesses,
    Word,
    WonGame,
}
