use derive_new::new;

use super::{pad_sequence, OovPolicy, Vocabulary, WordTokenizer};

/// Turns raw descriptions into fixed-length index sequences
#[derive(Debug, Clone, new)]
pub struct SequenceEncoder {
    /// Word-level tokenizer
    pub tokenizer: WordTokenizer,

    /// Vocabulary used to map words to indices
    pub vocabulary: Vocabulary,

    /// The fixed length of every encoded sequence
    pub sequence_length: usize,

    /// How out-of-vocabulary words are encoded
    pub oov: OovPolicy,
}

impl SequenceEncoder {
    /// Map a text to vocabulary indices, without padding
    pub fn indices(&self, text: &str) -> tokenizers::Result<Vec<usize>> {
        let words = self.tokenizer.words(text)?;

        Ok(self.vocabulary.encode(&words, self.oov))
    }

    /// Map a text to a padded or truncated index sequence
    pub fn encode(&self, text: &str) -> tokenizers::Result<Vec<usize>> {
        Ok(pad_sequence(&self.indices(text)?, self.sequence_length))
    }

    /// Encode a batch of texts
    pub fn encode_batch<S: AsRef<str>>(&self, texts: &[S]) -> tokenizers::Result<Vec<Vec<usize>>> {
        texts.iter().map(|text| self.encode(text.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::text::WordCounts;

    fn encoder(oov: OovPolicy) -> SequenceEncoder {
        let tokenizer = WordTokenizer::new();
        let documents = tokenizer
            .words_batch(&["Great product", "bad product"])
            .unwrap();
        let vocabulary = Vocabulary::build(&WordCounts::from_documents(&documents), 2);

        SequenceEncoder::new(tokenizer, vocabulary, 3, oov)
    }

    #[test]
    fn encodes_and_pads() {
        let encoder = encoder(OovPolicy::Skip);

        assert_eq!(encoder.encode("GREAT product!").unwrap(), vec![0, 2, 1]);
        assert_eq!(encoder.encode("bad product").unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn sentinel_policy_keeps_unknown_positions() {
        let encoder = encoder(OovPolicy::Sentinel);

        assert_eq!(encoder.indices("bad product").unwrap(), vec![0, 1]);
        assert_eq!(
            encoder.encode("product great unknown product").unwrap(),
            vec![2, 0, 1]
        );
    }
}
