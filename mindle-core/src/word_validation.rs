use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MIN_WORD_LENGTH: usize = 4;
pub const MAX_WORD_LENGTH: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct WordValidator {
    valid_words: HashSet<String>,
}

impl WordValidator {
    /// Create a new word validator from a word list, one word per line
    pub fn from_word_list(word_list: &str) -> Self {
        let mut validator = Self::default();
        validator.extend_from_word_list(word_list);
        validator
    }

    /// Load every `.txt` file of a directory into one vocabulary
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut validator = Self::default();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read words directory {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }

            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read word file {}", path.display()))?;
            let before = validator.valid_words.len();
            validator.extend_from_word_list(&contents);
            debug!(
                "Loaded {} words from {}",
                validator.valid_words.len() - before,
                path.display()
            );
        }

        if validator.valid_words.is_empty() {
            return Err(anyhow!("No words found in directory {}", dir.display()));
        }

        info!("Vocabulary loaded with {} words", validator.valid_words.len());
        Ok(validator)
    }

    fn extend_from_word_list(&mut self, word_list: &str) {
        let words = word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .filter(|word| Self::is_supported_length(word.chars().count()))
            .filter(|word| Self::is_alphabetic(word));

        self.valid_words.extend(words);
    }

    pub fn is_supported_length(length: usize) -> bool {
        (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&length)
    }

    /// Check if a word is in the vocabulary
    pub fn is_valid_word(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.valid_words.contains(&word)
    }

    /// Words of the given length in alphabetical order
    pub fn words_of_length(&self, length: usize) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .valid_words
            .iter()
            .filter(|word| word.chars().count() == length)
            .map(String::as_str)
            .collect();
        words.sort_unstable();
        words
    }

    pub fn word_count_by_length(&self, length: usize) -> usize {
        self.valid_words
            .iter()
            .filter(|word| word.chars().count() == length)
            .count()
    }

    pub fn len(&self) -> usize {
        self.valid_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_words.is_empty()
    }

    /// Check if word contains only ASCII letters
    pub fn is_alphabetic(word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
    }
}
