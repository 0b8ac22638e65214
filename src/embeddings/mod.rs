/// Pretrained GloVe word vectors
pub mod glove;

/// Embedding matrix initialization from pretrained vectors
pub mod matrix;

pub use glove::{VectorTable, VectorTableError};
pub use matrix::{EmbeddingMatrix, MatrixError};
