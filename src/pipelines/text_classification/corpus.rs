use crate::text::{
    max_length, pad_sequences, OovPolicy, SequenceEncoder, Vocabulary, WordCounts, WordTokenizer,
};

use super::{EncodedItem, Item};

/// Training and validation data encoded against a shared vocabulary.
///
/// The vocabulary is ranked over training and validation text together, while the sequence
/// length is the longest encoded training sample. Validation samples are padded or truncated
/// to that same length.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Encodes new text exactly like the corpus was encoded
    pub encoder: SequenceEncoder,

    /// Encoded training samples
    pub train: Vec<EncodedItem>,

    /// Encoded validation samples
    pub valid: Vec<EncodedItem>,
}

impl Corpus {
    /// Tokenize, rank, and encode both splits
    pub fn prepare<I: Item>(
        train: &[I],
        valid: &[I],
        vocabulary_size: usize,
        oov: OovPolicy,
    ) -> anyhow::Result<Self> {
        let tokenizer = WordTokenizer::new();

        let train_words = words(&tokenizer, train)?;
        let valid_words = words(&tokenizer, valid)?;

        let mut documents = train_words.clone();
        documents.extend(valid_words.iter().cloned());

        let counts = WordCounts::from_documents(&documents);
        let vocabulary = Vocabulary::build(&counts, vocabulary_size);

        log::info!(
            "Built a vocabulary of {} words from {} distinct words",
            vocabulary.len(),
            counts.len()
        );

        let train_sequences: Vec<Vec<usize>> = train_words
            .iter()
            .map(|words| vocabulary.encode(words, oov))
            .collect();
        let valid_sequences: Vec<Vec<usize>> = valid_words
            .iter()
            .map(|words| vocabulary.encode(words, oov))
            .collect();

        let sequence_length = max_length(&train_sequences);

        if sequence_length == 0 {
            return Err(anyhow!(
                "No training sample contains a vocabulary word, cannot pick a sequence length"
            ));
        }

        log::info!("Padding sequences to {} tokens", sequence_length);

        let train = encoded_items(train, pad_sequences(&train_sequences, sequence_length));
        let valid = encoded_items(valid, pad_sequences(&valid_sequences, sequence_length));

        Ok(Self {
            encoder: SequenceEncoder::new(tokenizer, vocabulary, sequence_length, oov),
            train,
            valid,
        })
    }

    /// The shared vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.encoder.vocabulary
    }

    /// The length of every encoded sequence
    pub fn sequence_length(&self) -> usize {
        self.encoder.sequence_length
    }
}

fn words<I: Item>(tokenizer: &WordTokenizer, items: &[I]) -> anyhow::Result<Vec<Vec<String>>> {
    items
        .iter()
        .map(|item| tokenizer.words(item.input()))
        .collect::<Result<_, _>>()
        .map_err(|e| anyhow!("Unable to tokenize text: {}", e))
}

fn encoded_items<I: Item>(items: &[I], sequences: Vec<Vec<usize>>) -> Vec<EncodedItem> {
    items
        .iter()
        .zip(sequences)
        .map(|(item, tokens)| EncodedItem::new(tokens, item.label()))
        .collect()
}
