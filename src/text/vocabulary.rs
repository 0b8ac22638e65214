use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::sequences::PAD_TOKEN_ID;
use crate::utils::classes::invert_map;

/// How words outside the vocabulary are encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OovPolicy {
    /// Drop the word from the sequence
    #[default]
    Skip,

    /// Replace the word with the padding index
    Sentinel,
}

/// Word occurrence counts over a corpus, remembering the order words were first seen
#[derive(Debug, Clone, Default)]
pub struct WordCounts {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl WordCounts {
    /// Count every word of a tokenized corpus
    pub fn from_documents<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut counts = Self::default();

        for document in documents {
            for word in document {
                counts.add(word.as_ref());
            }
        }

        counts
    }

    /// Record one occurrence of a word
    pub fn add(&mut self, word: &str) {
        match self.positions.get(word) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.positions.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    /// Occurrences of a word
    pub fn get(&self, word: &str) -> usize {
        self.positions
            .get(word)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no word was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words by descending count, ties in first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .entries
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();

        // `sort_by` is stable, so equal counts keep their first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
    }
}

/// A ranked word with its corpus count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWord {
    /// The word
    pub word: String,

    /// Occurrences in the corpus the vocabulary was built from
    pub count: usize,
}

/// The most frequent words of a corpus, indexed from 1 by rank. Index 0 is reserved for padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<RankedWord>", into = "Vec<RankedWord>")]
pub struct Vocabulary {
    words: Vec<RankedWord>,
    word_to_index: HashMap<String, usize>,
}

impl From<Vec<RankedWord>> for Vocabulary {
    fn from(words: Vec<RankedWord>) -> Self {
        let word_to_index = invert_map(
            words
                .iter()
                .enumerate()
                .map(|(i, ranked)| (i + 1, ranked.word.clone())),
        );

        Self {
            words,
            word_to_index,
        }
    }
}

impl From<Vocabulary> for Vec<RankedWord> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.words
    }
}

impl Vocabulary {
    /// Keep the `cap` most frequent words of the corpus
    pub fn build(counts: &WordCounts, cap: usize) -> Self {
        counts
            .ranked()
            .into_iter()
            .take(cap)
            .map(|(word, count)| RankedWord {
                word: word.to_string(),
                count,
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Number of words, excluding the padding index
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word at a 1-based index
    pub fn word(&self, index: usize) -> Option<&str> {
        if index == PAD_TOKEN_ID {
            return None;
        }

        self.words.get(index - 1).map(|ranked| ranked.word.as_str())
    }

    /// The index of a word, if it is in the vocabulary
    pub fn index(&self, word: &str) -> Option<usize> {
        self.word_to_index.get(word).copied()
    }

    /// Iterate over `(index, word)` pairs in rank order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, ranked)| (i + 1, ranked.word.as_str()))
    }

    /// A mapping from index to word
    pub fn index_to_word(&self) -> BTreeMap<usize, String> {
        self.iter()
            .map(|(index, word)| (index, word.to_string()))
            .collect()
    }

    /// A mapping from word to index
    pub fn word_to_index(&self) -> HashMap<String, usize> {
        self.word_to_index.clone()
    }

    /// A mapping from word to corpus count, restricted to the vocabulary
    pub fn word_to_count(&self) -> HashMap<String, usize> {
        self.words
            .iter()
            .map(|ranked| (ranked.word.clone(), ranked.count))
            .collect()
    }

    /// Map words to indices
    pub fn encode<S: AsRef<str>>(&self, words: &[S], oov: OovPolicy) -> Vec<usize> {
        words
            .iter()
            .filter_map(|word| match (self.index(word.as_ref()), oov) {
                (Some(index), _) => Some(index),
                (None, OovPolicy::Skip) => None,
                (None, OovPolicy::Sentinel) => Some(PAD_TOKEN_ID),
            })
            .collect()
    }

    /// Map indices back to words, skipping padding and unknown indices
    pub fn decode(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&index| self.word(index))
            .map(str::to_string)
            .collect()
    }
}
