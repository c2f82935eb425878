use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyGames::GameType)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyGames::DailyWords).text().not_null())
                    .col(ColumnDef::new(DailyGames::PreviousWords).text().not_null())
                    .col(
                        ColumnDef::new(DailyGames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaderboardEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaderboardEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaderboardEntries::Kind).string().not_null())
                    .col(ColumnDef::new(LeaderboardEntries::Rank).integer().not_null())
                    .col(ColumnDef::new(LeaderboardEntries::User).string().not_null())
                    .col(ColumnDef::new(LeaderboardEntries::Score).double().not_null())
                    .col(
                        ColumnDef::new(LeaderboardEntries::AverageTime)
                            .double()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leaderboard_entries_kind_rank")
                    .table(LeaderboardEntries::Table)
                    .col(LeaderboardEntries::Kind)
                    .col(LeaderboardEntries::Rank)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaderboardEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyGames::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DailyGames {
    Table,
    GameType,
    DailyWords,
    PreviousWords,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LeaderboardEntries {
    Table,
    Id,
    Kind,
    Rank,
    User,
    Score,
    AverageTime,
}
