use mindle_types::{EvaluationError, LetterResult, LetterVerdict};
use std::collections::HashMap;

pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Colour every letter of `guess` against `target`.
    ///
    /// Correct letters are settled first and consume their target letter.
    /// Remaining letters are then marked Present left to right while the
    /// target still has unclaimed occurrences of them, so a letter guessed more
    /// often than it appears turns Absent on its later occurrences.
    pub fn evaluate(target: &str, guess: &str) -> Result<Vec<LetterVerdict>, EvaluationError> {
        let target_chars: Vec<char> = target.to_lowercase().chars().collect();
        let guess_chars: Vec<char> = guess.to_lowercase().chars().collect();

        if target_chars.len() != guess_chars.len() {
            return Err(EvaluationError::InvalidInput {
                target_len: target_chars.len() as u32,
                guess_len: guess_chars.len() as u32,
            });
        }

        let mut verdicts = vec![LetterVerdict::Absent; guess_chars.len()];

        // Letters of the target not yet claimed by a Correct or Present mark
        let mut remaining: HashMap<char, usize> = HashMap::new();

        // First pass: mark correct positions
        for (i, (&guessed, &expected)) in guess_chars.iter().zip(&target_chars).enumerate() {
            if guessed == expected {
                verdicts[i] = LetterVerdict::Correct;
            } else {
                *remaining.entry(expected).or_insert(0) += 1;
            }
        }

        // Second pass: mark present letters
        for (i, guessed) in guess_chars.iter().enumerate() {
            if verdicts[i] == LetterVerdict::Correct {
                continue;
            }

            if let Some(count) = remaining.get_mut(guessed).filter(|count| **count > 0) {
                verdicts[i] = LetterVerdict::Present;
                *count -= 1;
            }
        }

        Ok(verdicts)
    }

    /// Same verdicts as [`GuessEvaluator::evaluate`], paired with their letter for display
    pub fn evaluate_letters(target: &str, guess: &str) -> Result<Vec<LetterResult>, EvaluationError> {
        let verdicts = Self::evaluate(target, guess)?;

        Ok(guess
            .to_lowercase()
            .chars()
            .zip(verdicts)
            .enumerate()
            .map(|(position, (letter, verdict))| LetterResult {
                letter,
                verdict,
                position: position as u32,
            })
            .collect())
    }

    pub fn is_solved(target: &str, guess: &str) -> bool {
        target.to_lowercase() == guess.to_lowercase()
    }
}
