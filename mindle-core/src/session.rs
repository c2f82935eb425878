use mindle_types::{GameError, GameType, LetterResult, PlayedGame, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GuessEvaluator, WordValidator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Won,
    Lost,
}

/// What one accepted guess produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub letters: Vec<LetterResult>,
    pub solved_step: bool,
    pub status: SessionStatus,
    pub guesses_left: usize,
}

/// One user playing one daily game, from the first guess until won or lost
#[derive(Debug, Clone)]
pub struct GameSession {
    game_type: GameType,
    user_id: UserId,
    daily_words: Vec<String>,
    step: usize,
    guesses: Vec<String>,
    started_at: i64,
    ended_at: Option<i64>,
    status: SessionStatus,
}

impl GameSession {
    pub fn new(
        game_type: GameType,
        user_id: UserId,
        daily_words: Vec<String>,
        started_at: i64,
    ) -> Result<Self, GameError> {
        let lengths = game_type.word_lengths();
        if daily_words.len() != lengths.len() {
            return Err(GameError::MissingDailyWords {
                game_type: game_type.to_string(),
            });
        }

        let daily_words: Vec<String> = daily_words.iter().map(|w| w.trim().to_lowercase()).collect();
        for (word, &expected) in daily_words.iter().zip(lengths) {
            let actual = word.chars().count();
            if actual != expected {
                return Err(GameError::WrongLength {
                    expected: expected as u32,
                    actual: actual as u32,
                });
            }
        }

        Ok(Self {
            game_type,
            user_id,
            daily_words,
            step: 0,
            guesses: Vec::new(),
            started_at,
            ended_at: None,
            status: SessionStatus::InProgress,
        })
    }

    pub fn submit_guess(
        &mut self,
        guess: &str,
        vocabulary: &WordValidator,
        now_ms: i64,
    ) -> Result<GuessOutcome, GameError> {
        if self.status != SessionStatus::InProgress {
            return Err(GameError::GameAlreadyCompleted);
        }

        let guess = guess.trim().to_lowercase();
        let target = &self.daily_words[self.step];

        let expected = target.chars().count();
        let actual = guess.chars().count();
        if actual != expected {
            return Err(GameError::WrongLength {
                expected: expected as u32,
                actual: actual as u32,
            });
        }

        // The target itself is always accepted, even when missing from the word lists
        if guess != *target
            && (!WordValidator::is_alphabetic(&guess) || !vocabulary.is_valid_word(&guess))
        {
            return Err(GameError::InvalidWord { word: guess });
        }

        let letters = GuessEvaluator::evaluate_letters(target, &guess).map_err(|_| {
            GameError::WrongLength {
                expected: expected as u32,
                actual: actual as u32,
            }
        })?;
        let solved_step = GuessEvaluator::is_solved(target, &guess);
        self.guesses.push(guess);

        if solved_step {
            if self.step + 1 == self.daily_words.len() {
                self.finish(SessionStatus::Won, now_ms);
            } else {
                self.step += 1;
                debug!(
                    "{} advanced {} to a {}-letter word",
                    self.user_id,
                    self.game_type,
                    self.current_word_length()
                );
            }
        }

        if self.status == SessionStatus::InProgress && self.guesses_left() == 0 {
            self.finish(SessionStatus::Lost, now_ms);
        }

        Ok(GuessOutcome {
            letters,
            solved_step,
            status: self.status,
            guesses_left: self.guesses_left(),
        })
    }

    fn finish(&mut self, status: SessionStatus, now_ms: i64) {
        self.status = status;
        self.ended_at = Some(now_ms);
    }

    /// The record to store once the session is over
    pub fn played_game(&self) -> Option<PlayedGame> {
        let end_time = self.ended_at?;
        let word = self.daily_words.last()?.clone();

        Some(PlayedGame {
            user_id: self.user_id.clone(),
            game_type: self.game_type,
            start_time: self.started_at,
            end_time,
            guesses: self.guesses.clone(),
            number_of_guesses: self.guesses.len() as u32,
            word,
            won_game: self.status == SessionStatus::Won,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn guesses_left(&self) -> usize {
        self.game_type.max_guesses().saturating_sub(self.guesses.len())
    }

    /// Length of the word currently being guessed
    pub fn current_word_length(&self) -> usize {
        self.daily_words[self.step].chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindle_types::LetterVerdict;

    const START: i64 = 1_710_072_000_000;

    fn vocabulary() -> WordValidator {
        WordValidator::from_word_list(
            "boat\ncoat\ncrane\ntoast\nhouse\nplanet\nplants\nfreedom\nkingdom",
        )
    }

    fn wordle(word: &str) -> GameSession {
        GameSession::new(GameType::Wordle, "user-1".to_string(), vec![word.to_string()], START)
            .unwrap()
    }

    #[test]
    fn test_win_on_first_guess() {
        let mut session = wordle("toast");
        let outcome = session.submit_guess("TOAST", &vocabulary(), START + 5_000).unwrap();

        assert!(outcome.solved_step);
        assert_eq!(outcome.status, SessionStatus::Won);
        assert!(outcome.letters.iter().all(|l| l.verdict == LetterVerdict::Correct));

        let record = session.played_game().unwrap();
        assert!(record.won_game);
        assert_eq!(record.number_of_guesses, 1);
        assert_eq!(record.duration_ms(), 5_000);
        assert_eq!(record.word, "toast");
    }

    #[test]
    fn test_rejections_do_not_use_a_guess() {
        let mut session = wordle("toast");
        let vocabulary = vocabulary();

        assert_eq!(
            session.submit_guess("boat", &vocabulary, START),
            Err(GameError::WrongLength {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            session.submit_guess("zzzzz", &vocabulary, START),
            Err(GameError::InvalidWord {
                word: "zzzzz".to_string()
            })
        );
        assert!(matches!(
            session.submit_guess("ho-se", &vocabulary, START),
            Err(GameError::InvalidWord { .. })
        ));
        assert_eq!(session.guesses_left(), 6);
        assert!(session.played_game().is_none());
    }

    #[test]
    fn test_lost_after_guess_budget() {
        let mut session = wordle("toast");
        let vocabulary = vocabulary();

        for i in 0..6 {
            let outcome = session.submit_guess("crane", &vocabulary, START + i).unwrap();
            assert_eq!(outcome.guesses_left, 5 - i as usize);
        }

        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(
            session.submit_guess("toast", &vocabulary, START + 10),
            Err(GameError::GameAlreadyCompleted)
        );

        let record = session.played_game().unwrap();
        assert!(!record.won_game);
        assert_eq!(record.number_of_guesses, 6);
        assert_eq!(record.end_time, START + 5);
    }

    #[test]
    fn test_stepdle_ladder() {
        let words = ["boat", "crane", "planet", "freedom"].map(String::from).to_vec();
        let mut session =
            GameSession::new(GameType::Stepdle, "user-1".to_string(), words, START).unwrap();
        let vocabulary = vocabulary();

        assert_eq!(session.current_word_length(), 4);
        session.submit_guess("coat", &vocabulary, START).unwrap();
        let outcome = session.submit_guess("boat", &vocabulary, START).unwrap();
        assert!(outcome.solved_step);
        assert_eq!(outcome.status, SessionStatus::InProgress);
        assert_eq!(session.current_word_length(), 5);

        session.submit_guess("crane", &vocabulary, START).unwrap();
        session.submit_guess("plants", &vocabulary, START).unwrap();
        session.submit_guess("planet", &vocabulary, START).unwrap();
        session.submit_guess("kingdom", &vocabulary, START).unwrap();
        let outcome = session.submit_guess("freedom", &vocabulary, START + 60_000).unwrap();

        assert_eq!(outcome.status, SessionStatus::Won);
        assert_eq!(outcome.guesses_left, 13);

        let record = session.played_game().unwrap();
        assert_eq!(record.word, "freedom");
        assert_eq!(record.number_of_guesses, 7);
    }

    #[test]
    fn test_new_checks_daily_words() {
        assert_eq!(
            GameSession::new(GameType::Stepdle, "u".to_string(), vec!["boat".to_string()], START)
                .unwrap_err(),
            GameError::MissingDailyWords {
                game_type: "stepdle".to_string()
            }
        );
        assert_eq!(
            GameSession::new(GameType::Ordle, "u".to_string(), vec!["boat".to_string()], START)
                .unwrap_err(),
            GameError::WrongLength {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_target_accepted_outside_vocabulary() {
        let mut session = wordle("quirk");
        let outcome = session.submit_guess("quirk", &vocabulary(), START).unwrap();
        assert_eq!(outcome.status, SessionStatus::Won);
    }
}
