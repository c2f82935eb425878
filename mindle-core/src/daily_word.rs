use anyhow::{Result, anyhow};
use mindle_types::{DailyGame, GameType, PREVIOUS_WORDS_LIMIT};
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::collections::HashSet;
use tracing::debug;

use crate::WordValidator;

pub struct DailyWordPicker;

impl DailyWordPicker {
    /// Random word of `length` letters that is not in `previous_words`
    pub fn pick<R: Rng + ?Sized>(
        vocabulary: &WordValidator,
        length: usize,
        previous_words: &[String],
        rng: &mut R,
    ) -> Result<String> {
        let used: HashSet<&str> = previous_words.iter().map(String::as_str).collect();
        let candidates: Vec<&str> = vocabulary
            .words_of_length(length)
            .into_iter()
            .filter(|word| !used.contains(word))
            .collect();

        debug!("{} unused {}-letter words to pick from", candidates.len(), length);

        candidates
            .choose(rng)
            .map(|word| word.to_string())
            .ok_or_else(|| anyhow!("No unused {}-letter words left", length))
    }

    /// One word per target length of the game type, in ladder order
    pub fn pick_for<R: Rng + ?Sized>(
        vocabulary: &WordValidator,
        game_type: GameType,
        previous_words: &[String],
        rng: &mut R,
    ) -> Result<Vec<String>> {
        game_type
            .word_lengths()
            .iter()
            .map(|&length| Self::pick(vocabulary, length, previous_words, rng))
            .collect()
    }

    /// Make `words` the words of the day and remember them, forgetting the oldest
    /// beyond [`PREVIOUS_WORDS_LIMIT`]
    pub fn advance(daily_game: &mut DailyGame, words: Vec<String>) {
        daily_game.previous_words.extend(words.iter().cloned());
        let overflow = daily_game
            .previous_words
            .len()
            .saturating_sub(PREVIOUS_WORDS_LIMIT);
        daily_game.previous_words.drain(..overflow);
        daily_game.daily_words = words;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn vocabulary() -> WordValidator {
        WordValidator::from_word_list("boat\ncrane\ntoast\nhouse\nplanet\nfreedom")
    }

    #[test]
    fn test_pick_avoids_previous_words() {
        let vocabulary = vocabulary();
        let previous = vec!["crane".to_string(), "toast".to_string()];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let word = DailyWordPicker::pick(&vocabulary, 5, &previous, &mut rng).unwrap();
            assert_eq!(word, "house");
        }
    }

    #[test]
    fn test_pick_fails_when_exhausted() {
        let vocabulary = vocabulary();
        let previous = vec!["crane".to_string(), "toast".to_string(), "house".to_string()];
        let mut rng = StdRng::seed_from_u64(7);

        assert!(DailyWordPicker::pick(&vocabulary, 5, &previous, &mut rng).is_err());
        assert!(DailyWordPicker::pick(&vocabulary, 6, &previous, &mut rng).is_ok());
    }

    #[test]
    fn test_pick_for_stepdle_ladder() {
        let mut rng = StdRng::seed_from_u64(1);
        let words =
            DailyWordPicker::pick_for(&vocabulary(), GameType::Stepdle, &[], &mut rng).unwrap();

        let lengths: Vec<usize> = words.iter().map(|w| w.len()).collect();
        assert_eq!(lengths, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_advance_caps_history() {
        let mut daily = DailyGame::empty(GameType::Wordle);
        daily.previous_words = (0..PREVIOUS_WORDS_LIMIT).map(|i| format!("w{i}")).collect();

        DailyWordPicker::advance(&mut daily, vec!["toast".to_string()]);

        assert_eq!(daily.daily_words, vec!["toast"]);
        assert_eq!(daily.previous_words.len(), PREVIOUS_WORDS_LIMIT);
        assert_eq!(daily.previous_words.first().unwrap(), "w1");
        assert_eq!(daily.previous_words.last().unwrap(), "toast");
    }
}
