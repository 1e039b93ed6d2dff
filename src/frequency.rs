use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

lazy_static! {
    static ref TOKEN_SEPARATOR: Regex = Regex::new(r"[\s-]+").unwrap();
}

/// Words dropped from every cloud
pub const STOP_WORDS: [&str; 7] = ["and", "the", "for", "with", "in", "of", "to"];

/// Tokens with this many characters or fewer are dropped
pub const MIN_TOKEN_CHARS: usize = 2;

/// A distinct normalized token and how often it occurred
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordFrequency {
    pub text: String,
    pub value: u32,
}

impl WordFrequency {
    pub fn new(text: impl Into<String>, value: u32) -> Self {
        WordFrequency {
            text: text.into(),
            value,
        }
    }
}

/// Lowercases one item and splits it on runs of whitespace or hyphens,
/// keeping only tokens that survive the length and stop-word filters.
pub fn tokenize(item: &str) -> Vec<String> {
    let lowered = item.to_lowercase();
    TOKEN_SEPARATOR
        .split(&lowered)
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}

/// Counts words across every item of a multi-valued attribute
///
/// Counts accumulate over the whole sequence. The result lists each word
/// once, in the order it was first seen.
///
/// # Examples
/// ```
/// use profile_cloud::frequency::{word_frequency, WordFrequency};
///
/// let words = word_frequency(&["Machine Learning", "machine-learning", "Deep Learning"]);
/// assert_eq!(
///     words,
///     vec![
///         WordFrequency::new("machine", 2),
///         WordFrequency::new("learning", 3),
///         WordFrequency::new("deep", 1),
///     ]
/// );
/// ```
pub fn word_frequency<S: AsRef<str>>(items: &[S]) -> Vec<WordFrequency> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut words: Vec<WordFrequency> = Vec::new();

    for item in items {
        for token in tokenize(item.as_ref()) {
            match positions.get(&token) {
                Some(&index) => words[index].value += 1,
                None => {
                    positions.insert(token.clone(), words.len());
                    words.push(WordFrequency::new(token, 1));
                }
            }
        }
    }

    words
}

/// Sum of all counts in a frequency set
pub fn total_count(words: &[WordFrequency]) -> u32 {
    words.iter().map(|word| word.value).sum()
}
