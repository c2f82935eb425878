use mindle_core::{DailyWordPicker, WordValidator};
use mindle_persistence::MindleStore;
use mindle_types::{DailyGame, GameType};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};

pub struct DailyWordService {
    store: Arc<dyn MindleStore>,
    vocabulary: Arc<WordValidator>,
    rng: Mutex<StdRng>,
}

impl DailyWordService {
    pub fn new(store: Arc<dyn MindleStore>, vocabulary: Arc<WordValidator>) -> Self {
        Self::with_rng(store, vocabulary, StdRng::from_os_rng())
    }

    pub fn with_rng(store: Arc<dyn MindleStore>, vocabulary: Arc<WordValidator>, rng: StdRng) -> Self {
        Self {
            store,
            vocabulary,
            rng: Mutex::new(rng),
        }
    }

    /// Pick the words of the day for every game type and remember them
    pub async fn choose_daily_words(&self) -> ServiceResult<Vec<DailyGame>> {
        let mut chosen = Vec::with_capacity(GameType::ALL.len());
        for game_type in GameType::ALL {
            chosen.push(self.choose_for(game_type).await?);
        }
        Ok(chosen)
    }

    /// Choose words only for game types that have none yet
    pub async fn ensure_daily_words(&self) -> ServiceResult<()> {
        for game_type in GameType::ALL {
            let missing = self
                .store
                .find_daily_game(game_type)
                .await?
                .is_none_or(|daily| daily.daily_words.is_empty());
            if missing {
                self.choose_for(game_type).await?;
            }
        }
        Ok(())
    }

    async fn choose_for(&self, game_type: GameType) -> ServiceResult<DailyGame> {
        let mut daily = self
            .store
            .find_daily_game(game_type)
            .await?
            .unwrap_or_else(|| DailyGame::empty(game_type));

        let words = {
            let mut rng = self.rng.lock().await;
            DailyWordPicker::pick_for(&self.vocabulary, game_type, &daily.previous_words, &mut *rng)
                .map_err(|e| ServiceError::Vocabulary(format!("{game_type}: {e}")))?
        };

        DailyWordPicker::advance(&mut daily, words);
        self.store.save_daily_game(&daily).await?;

        info!(
            "New {} words chosen, {} remembered",
            game_type,
            daily.previous_words.len()
        );
        Ok(daily)
    }

    pub async fn daily_game(&self, game_type: GameType) -> ServiceResult<Option<DailyGame>> {
        Ok(self.store.find_daily_game(game_type).await?)
    }
}
