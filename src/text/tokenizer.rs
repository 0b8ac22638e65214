use tokenizers::{
    normalizers::Lowercase,
    pre_tokenizers::{punctuation::Punctuation, whitespace::WhitespaceSplit},
    Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer,
    SplitDelimiterBehavior,
};

/// Splits descriptions into lowercase words, dropping punctuation
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    normalizer: Lowercase,
    whitespace: WhitespaceSplit,
    punctuation: Punctuation,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self {
            normalizer: Lowercase,
            whitespace: WhitespaceSplit,
            punctuation: Punctuation::new(SplitDelimiterBehavior::Removed),
        }
    }
}

impl WordTokenizer {
    /// Creates a new tokenizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a text into its words
    pub fn words(&self, text: &str) -> tokenizers::Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);

        pretokenized.normalize(|normalized| self.normalizer.normalize(normalized))?;
        self.whitespace.pre_tokenize(&mut pretokenized)?;
        self.punctuation.pre_tokenize(&mut pretokenized)?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(word, _, _)| word.to_string())
            .filter(|word| !word.is_empty())
            .collect())
    }

    /// Split every text of a corpus into words
    pub fn words_batch<S: AsRef<str>>(&self, texts: &[S]) -> tokenizers::Result<Vec<Vec<String>>> {
        texts.iter().map(|text| self.words(text.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::WordTokenizer;

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        let tokenizer = WordTokenizer::new();

        let words = tokenizer.words("Great   Product\tfor\nthe PRICE").unwrap();

        assert_eq!(words, vec!["great", "product", "for", "the", "price"]);
    }

    #[test]
    fn drops_punctuation() {
        let tokenizer = WordTokenizer::new();

        let words = tokenizer.words("Wow! great, (really) great...").unwrap();

        assert_eq!(words, vec!["wow", "great", "really", "great"]);
    }

    #[test]
    fn empty_text_has_no_words() {
        let tokenizer = WordTokenizer::new();

        assert!(tokenizer.words("  ?! ").unwrap().is_empty());
    }
}
