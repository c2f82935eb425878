use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameStats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameStats::UserId).string().not_null())
                    .col(ColumnDef::new(GameStats::GameType).string().not_null())
                    .col(ColumnDef::new(GameStats::AverageGuesses).double().not_null())
                    .col(ColumnDef::new(GameStats::AverageTime).double().not_null())
                    .col(
                        ColumnDef::new(GameStats::TotalGamesPlayed)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameStats::WinRate).double().not_null())
                    // Bumped on every write, checked by compare-and-swap updates
                    .col(
                        ColumnDef::new(GameStats::Version)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .primary_key(
                        Index::create()
                            .col(GameStats::UserId)
                            .col(GameStats::GameType),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameStats {
    Table,
    UserId,
    GameType,
    AverageGuesses,
    AverageTime,
    TotalGamesPlayed,
    WinRate,
    Version,
}
