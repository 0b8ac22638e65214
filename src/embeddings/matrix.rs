use burn::tensor::{backend::Backend, Tensor};

use super::VectorTable;
use crate::{text::Vocabulary, utils::tensors::matrix_to_tensor};

/// Matrix Error
#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    /// A pretrained vector does not fit the matrix width
    #[error("vector for {word:?} has {actual} values, the matrix is {expected} wide")]
    DimensionMismatch {
        /// The word whose vector was rejected
        word: String,
        /// Matrix width
        expected: usize,
        /// Length of the vector
        actual: usize,
    },
}

/// A dense `(rows, dimension)` lookup table used to seed an embedding layer.
///
/// Row 0 belongs to the padding index and is always zero. Row `i` holds the pretrained vector of
/// the vocabulary word with index `i`, or zeros when the word has no pretrained vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Build a `(cap + 1, dimension)` matrix for the given vocabulary
    pub fn build(
        vocabulary: &Vocabulary,
        table: &VectorTable,
        cap: usize,
        dimension: usize,
    ) -> Result<Self, MatrixError> {
        let rows = cap + 1;
        let mut matrix = Self {
            rows,
            dimension,
            values: vec![0.0; rows * dimension],
        };

        let mut found = 0;

        for (index, word) in vocabulary.iter().take(cap) {
            let Some(vector) = table.get(word) else {
                continue;
            };

            if vector.len() != dimension {
                return Err(MatrixError::DimensionMismatch {
                    word: word.to_string(),
                    expected: dimension,
                    actual: vector.len(),
                });
            }

            matrix.values[index * dimension..(index + 1) * dimension].copy_from_slice(vector);
            found += 1;
        }

        log::info!(
            "Found pretrained vectors for {} of {} vocabulary words",
            found,
            vocabulary.len().min(cap)
        );

        Ok(matrix)
    }

    /// Number of rows, including the padding row
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of each row
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The `(rows, dimension)` shape
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.dimension]
    }

    /// A single row
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }

        Some(&self.values[index * self.dimension..(index + 1) * self.dimension])
    }

    /// Row-major values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Hand the matrix to the framework as a `[rows, dimension]` tensor
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        matrix_to_tensor(&self.values, self.rows, self.dimension, device)
    }
}
