/// Word-level tokenization
pub mod tokenizer;

/// Frequency-ranked vocabulary
pub mod vocabulary;

/// Fixed-length sequence padding
pub mod sequences;

/// Text to padded index sequences
pub mod encoder;

pub use encoder::SequenceEncoder;
pub use sequences::{max_length, pad_sequence, pad_sequences, PAD_TOKEN_ID};
pub use tokenizer::WordTokenizer;
pub use vocabulary::{OovPolicy, Vocabulary, WordCounts};
