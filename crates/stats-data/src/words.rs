//! Word frequency over message bodies.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use stats_core::models::{Message, WordCount};
use stats_core::stopwords::StopwordList;

/// Runs of Unicode letters, combining marks or digits; everything else
/// separates tokens.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{M}\p{N}]+").expect("regex is valid"))
}

/// Split `text` into case-folded tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    token_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Options for [`word_frequency`].
#[derive(Debug, Clone, Copy)]
pub struct WordFrequencyOptions {
    /// Tokens with fewer characters are skipped.
    pub min_len: usize,
    /// Maximum number of entries returned.
    pub limit: usize,
}

impl Default for WordFrequencyOptions {
    fn default() -> Self {
        Self {
            min_len: 2,
            limit: 100,
        }
    }
}

/// Most frequent words across all bodies.
///
/// Sorted by count descending, ties by word ascending, truncated to
/// `options.limit`. Stopwords and short tokens never appear.
pub fn word_frequency(
    messages: &[Message],
    stopwords: &StopwordList,
    options: WordFrequencyOptions,
) -> Vec<WordCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();

    for msg in messages {
        for token in tokenize(&msg.body) {
            if token.chars().count() < options.min_len || stopwords.contains(&token) {
                continue;
            }
            *counts.entry(token).or_default() += 1;
        }
    }

    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(options.limit);
    ranked
}
