use anyhow::{Result, bail};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::entities::{
    daily_games, game_stats, leaderboard_entries, played_games, prelude::*, users,
};
use crate::store::{MindleStore, PlayedGameQuery, VersionedStats};
use mindle_types::{
    DailyGame, DailyLeaderboardEntry, GameStats as Stats, GameType, GeneralLeaderboardEntry,
    Leaderboard, LeaderboardKind, PlayedGame, User, UserId,
};

/// Store backed by a SeaORM connection
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> Result<User> {
        Ok(User {
            id: model.id,
            email: model.email,
            name: model.name,
            consecutive_days_played: u32::try_from(model.consecutive_days_played)?,
            total_games_played: u32::try_from(model.total_games_played)?,
            last_login: model.last_login,
        })
    }

    fn model_to_played_game(model: played_games::Model) -> Result<PlayedGame> {
        Ok(PlayedGame {
            user_id: model.user_id,
            game_type: model.game_type.parse()?,
            start_time: model.start_time,
            end_time: model.end_time,
            guesses: serde_json::from_str(&model.guesses)?,
            number_of_guesses: u32::try_from(model.number_of_guesses)?,
            word: model.word,
            won_game: model.won_game,
        })
    }

    fn model_to_stats(model: &game_stats::Model) -> Stats {
        Stats {
            average_guesses: model.average_guesses,
            average_time: model.average_time,
            total_games_played: model.total_games_played,
            win_rate: model.win_rate,
        }
    }

    fn model_to_daily_game(model: daily_games::Model) -> Result<DailyGame> {
        Ok(DailyGame {
            game_type: model.game_type.parse()?,
            daily_words: serde_json::from_str(&model.daily_words)?,
            previous_words: serde_json::from_str(&model.previous_words)?,
        })
    }

    fn leaderboard_rows(
        kind: LeaderboardKind,
        leaderboard: &Leaderboard,
    ) -> Result<Vec<leaderboard_entries::ActiveModel>> {
        let rows: Vec<(String, f64, f64)> = match (kind, leaderboard) {
            (LeaderboardKind::Daily(_), Leaderboard::Daily(entries)) => entries
                .iter()
                .map(|e| (e.user.clone(), e.average_guesses, e.average_time))
                .collect(),
            (LeaderboardKind::General, Leaderboard::General(entries)) => entries
                .iter()
                .map(|e| (e.user.clone(), e.average_win_rate, e.average_time))
                .collect(),
            _ => bail!("Leaderboard does not match the {} board", kind),
        };

        rows.into_iter()
            .enumerate()
            .map(
                |(index, (user, score, average_time))| -> Result<leaderboard_entries::ActiveModel> {
                Ok(leaderboard_entries::ActiveModel {
                    id: ActiveValue::NotSet,
                    kind: ActiveValue::Set(kind.key().to_string()),
                    rank: ActiveValue::Set(i32::try_from(index + 1)?),
                    user: ActiveValue::Set(user),
                    score: ActiveValue::Set(score),
                    average_time: ActiveValue::Set(average_time),
                })
            })
            .collect()
    }
}

#[async_trait]
impl MindleStore for SeaOrmStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        let user_model = Users::find_by_id(user_id.to_string()).one(&self.db).await?;
        user_model.map(Self::model_to_user).transpose()
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();

        let user_model = users::ActiveModel {
            id: ActiveValue::Set(user.id.clone()),
            email: ActiveValue::Set(user.email.clone()),
            name: ActiveValue::Set(user.name.clone()),
            consecutive_days_played: ActiveValue::Set(i32::try_from(user.consecutive_days_played)?),
            total_games_played: ActiveValue::Set(i32::try_from(user.total_games_played)?),
            last_login: ActiveValue::Set(user.last_login),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Users::insert(user_model)
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([
                        users::Column::Email,
                        users::Column::Name,
                        users::Column::ConsecutiveDaysPlayed,
                        users::Column::TotalGamesPlayed,
                        users::Column::LastLogin,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let models = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?;
        models.into_iter().map(Self::model_to_user).collect()
    }

    async fn insert_played_game(&self, record: &PlayedGame) -> Result<()> {
        let model = played_games::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(record.user_id.clone()),
            game_type: ActiveValue::Set(record.game_type.to_string()),
            start_time: ActiveValue::Set(record.start_time),
            end_time: ActiveValue::Set(record.end_time),
            guesses: ActiveValue::Set(serde_json::to_string(&record.guesses)?),
            number_of_guesses: ActiveValue::Set(i32::try_from(record.number_of_guesses)?),
            word: ActiveValue::Set(record.word.clone()),
            won_game: ActiveValue::Set(record.won_game),
        };

        PlayedGames::insert(model).exec(&self.db).await?;
        debug!("Stored {} game of {}", record.game_type, record.user_id);
        Ok(())
    }

    async fn find_played_games(&self, query: &PlayedGameQuery) -> Result<Vec<PlayedGame>> {
        let mut select = PlayedGames::find();

        if let Some(user_id) = &query.user_id {
            select = select.filter(played_games::Column::UserId.eq(user_id.as_str()));
        }
        if let Some(game_type) = query.game_type {
            select = select.filter(played_games::Column::GameType.eq(game_type.as_str()));
        }
        if let Some((start, end)) = query.started_between {
            select = select.filter(played_games::Column::StartTime.between(start, end));
        }

        let models = select
            .order_by_asc(played_games::Column::StartTime)
            .order_by_asc(played_games::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_played_game).collect()
    }

    async fn ensure_stats(&self, user_id: &str, game_type: GameType) -> Result<()> {
        let no_data = Stats::NO_DATA;
        let model = game_stats::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            game_type: ActiveValue::Set(game_type.to_string()),
            average_guesses: ActiveValue::Set(no_data.average_guesses),
            average_time: ActiveValue::Set(no_data.average_time),
            total_games_played: ActiveValue::Set(no_data.total_games_played),
            win_rate: ActiveValue::Set(no_data.win_rate),
            version: ActiveValue::Set(0),
        };

        GameStats::insert(model)
            .on_conflict(
                OnConflict::columns([game_stats::Column::UserId, game_stats::Column::GameType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn load_stats(&self, user_id: &str, game_type: GameType) -> Result<Option<VersionedStats>> {
        let model = GameStats::find_by_id((user_id.to_string(), game_type.to_string()))
            .one(&self.db)
            .await?;

        Ok(model.map(|model| VersionedStats {
            stats: Self::model_to_stats(&model),
            version: model.version,
        }))
    }

    async fn compare_and_swap_stats(
        &self,
        user_id: &str,
        game_type: GameType,
        expected_version: i64,
        stats: &Stats,
    ) -> Result<bool> {
        let result = GameStats::update_many()
            .col_expr(game_stats::Column::AverageGuesses, Expr::value(stats.average_guesses))
            .col_expr(game_stats::Column::AverageTime, Expr::value(stats.average_time))
            .col_expr(
                game_stats::Column::TotalGamesPlayed,
                Expr::value(stats.total_games_played),
            )
            .col_expr(game_stats::Column::WinRate, Expr::value(stats.win_rate))
            .col_expr(
                game_stats::Column::Version,
                Expr::col(game_stats::Column::Version).add(1),
            )
            .filter(game_stats::Column::UserId.eq(user_id))
            .filter(game_stats::Column::GameType.eq(game_type.as_str()))
            .filter(game_stats::Column::Version.eq(expected_version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 1 {
            return Ok(true);
        }
        if expected_version != 0 {
            return Ok(false);
        }

        // A missing row counts as version 0
        let model = game_stats::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            game_type: ActiveValue::Set(game_type.to_string()),
            average_guesses: ActiveValue::Set(stats.average_guesses),
            average_time: ActiveValue::Set(stats.average_time),
            total_games_played: ActiveValue::Set(stats.total_games_played),
            win_rate: ActiveValue::Set(stats.win_rate),
            version: ActiveValue::Set(1),
        };

        let inserted = GameStats::insert(model)
            .on_conflict(
                OnConflict::columns([game_stats::Column::UserId, game_stats::Column::GameType])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted == 1)
    }

    async fn all_stats(&self) -> Result<HashMap<UserId, Vec<Stats>>> {
        let models = GameStats::find().all(&self.db).await?;

        let mut grouped: HashMap<UserId, Vec<Stats>> = HashMap::new();
        for model in models {
            let stats = Self::model_to_stats(&model);
            grouped.entry(model.user_id).or_default().push(stats);
        }
        Ok(grouped)
    }

    async fn find_daily_game(&self, game_type: GameType) -> Result<Option<DailyGame>> {
        let model = DailyGames::find_by_id(game_type.to_string())
            .one(&self.db)
            .await?;
        model.map(Self::model_to_daily_game).transpose()
    }

    async fn save_daily_game(&self, daily_game: &DailyGame) -> Result<()> {
        let model = daily_games::ActiveModel {
            game_type: ActiveValue::Set(daily_game.game_type.to_string()),
            daily_words: ActiveValue::Set(serde_json::to_string(&daily_game.daily_words)?),
            previous_words: ActiveValue::Set(serde_json::to_string(&daily_game.previous_words)?),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        DailyGames::insert(model)
            .on_conflict(
                OnConflict::column(daily_games::Column::GameType)
                    .update_columns([
                        daily_games::Column::DailyWords,
                        daily_games::Column::PreviousWords,
                        daily_games::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn replace_leaderboard(&self, kind: LeaderboardKind, leaderboard: &Leaderboard) -> Result<()> {
        let rows = Self::leaderboard_rows(kind, leaderboard)?;
        let count = rows.len();

        let txn = self.db.begin().await?;
        LeaderboardEntries::delete_many()
            .filter(leaderboard_entries::Column::Kind.eq(kind.key()))
            .exec(&txn)
            .await?;
        if !rows.is_empty() {
            LeaderboardEntries::insert_many(rows).exec(&txn).await?;
        }
        txn.commit().await?;

        info!("Replaced {} leaderboard with {} entries", kind, count);
        Ok(())
    }

    async fn find_leaderboard(&self, kind: LeaderboardKind) -> Result<Leaderboard> {
        let models = LeaderboardEntries::find()
            .filter(leaderboard_entries::Column::Kind.eq(kind.key()))
            .order_by_asc(leaderboard_entries::Column::Rank)
            .all(&self.db)
            .await?;

        Ok(match kind {
            LeaderboardKind::Daily(_) => Leaderboard::Daily(
                models
                    .into_iter()
                    .map(|m| DailyLeaderboardEntry {
                        user: m.user,
                        average_guesses: m.score,
                        average_time: m.average_time,
                    })
                    .collect(),
            ),
            LeaderboardKind::General => Leaderboard::General(
                models
                    .into_iter()
                    .map(|m| GeneralLeaderboardEntry {
                        user: m.user,
                        average_win_rate: m.score,
                        average_time: m.average_time,
                    })
                    .collect(),
            ),
        })
    }
}
