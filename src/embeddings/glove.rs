//! Loader for whitespace-delimited word vector files, such as the Stanford GloVe releases
//! (`glove.6B.300d.txt`): one `word v_1 ... v_D` entry per line.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::utils::files::file_reader;

/// Vector Table Error
#[derive(thiserror::Error, Debug)]
pub enum VectorTableError {
    /// The vector file could not be opened or read
    #[error("unable to read vector table {path}: {source}")]
    Io {
        /// Path of the vector file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line is malformed or disagrees with the dimension of the first line
    #[error("malformed vector on line {line}: {reason}")]
    Format {
        /// 1-based line number in the vector file
        line: usize,
        /// What was wrong with the entry
        reason: String,
    },

    /// The table dimension differs from the configured embedding dimension
    #[error("vector table has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        /// Configured embedding dimension
        expected: usize,
        /// Dimension found in the file
        actual: usize,
    },
}

/// A memory-resident mapping from words to dense vectors of a single dimension
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl VectorTable {
    /// Load every entry of a vector file into memory
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, VectorTableError> {
        let path = path.as_ref();
        let io_error = |source| VectorTableError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut lines = file_reader(path).await.map_err(io_error)?;
        let mut table = Self::default();
        let mut line_number = 0;
        let mut blank_line = None;

        while let Some(line) = lines.next_line().await.map_err(io_error)? {
            line_number += 1;
            table.insert_line(line_number, &line, &mut blank_line)?;
        }

        log::debug!(
            "Loaded {} vectors of dimension {} from {}",
            table.len(),
            table.dimension,
            path.display()
        );

        Ok(table)
    }

    /// Load a vector file and make sure its vectors have the expected width
    pub async fn load_with_dimension(
        path: impl AsRef<Path>,
        expected: usize,
    ) -> Result<Self, VectorTableError> {
        let table = Self::load(path).await?;

        if !table.is_empty() && table.dimension != expected {
            return Err(VectorTableError::DimensionMismatch {
                expected,
                actual: table.dimension,
            });
        }

        Ok(table)
    }

    /// Build a table from in-memory lines in the file format
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, VectorTableError> {
        let mut table = Self::default();
        let mut blank_line = None;

        for (i, line) in lines.iter().enumerate() {
            table.insert_line(i + 1, line.as_ref(), &mut blank_line)?;
        }

        Ok(table)
    }

    /// Parse one entry. Blank lines are only accepted at the end of the file, so the first one
    /// seen is remembered in `blank_line` and rejected once another entry follows it.
    fn insert_line(
        &mut self,
        line_number: usize,
        line: &str,
        blank_line: &mut Option<usize>,
    ) -> Result<(), VectorTableError> {
        let mut fields = line.split_whitespace();

        let Some(word) = fields.next() else {
            blank_line.get_or_insert(line_number);
            return Ok(());
        };

        if let Some(blank) = *blank_line {
            return Err(VectorTableError::Format {
                line: blank,
                reason: "blank line between entries".to_string(),
            });
        }

        let vector = fields
            .map(|value| {
                value.parse::<f32>().map_err(|_| VectorTableError::Format {
                    line: line_number,
                    reason: format!("non-numeric value {value:?} for {word:?}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if vector.is_empty() {
            return Err(VectorTableError::Format {
                line: line_number,
                reason: format!("no values for {word:?}"),
            });
        }

        if self.dimension == 0 {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(VectorTableError::Format {
                line: line_number,
                reason: format!(
                    "{word:?} has {} values, expected {}",
                    vector.len(),
                    self.dimension
                ),
            });
        }

        self.vectors.insert(word.to_string(), vector);

        Ok(())
    }

    /// The width of every vector in the table (0 for an empty table)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Look up the vector for a word
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::files::testing::temp_file;

    #[tokio::test]
    async fn loads_words_and_vectors() {
        let path = temp_file("glove.txt", "the 0.1 -0.2 0.3\nproduct 1 2 3\n\n");

        let table = VectorTable::load(&path).await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), 3);
        assert_eq!(table.get("the"), Some(&[0.1, -0.2, 0.3][..]));
        assert_eq!(table.get("product"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn inconsistent_dimensions_are_a_format_error() {
        let result = VectorTable::from_lines(&["great 0.5 0.5 0.5", "bad 0.1 0.2"]);

        assert!(matches!(
            result,
            Err(VectorTableError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_values_are_a_format_error() {
        let result = VectorTable::from_lines(&["great 0.5 nope"]);

        assert!(matches!(
            result,
            Err(VectorTableError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn word_without_values_is_a_format_error() {
        let result = VectorTable::from_lines(&["lonely"]);

        assert!(matches!(
            result,
            Err(VectorTableError::Format { line: 1, .. })
        ));
    }

    #[test]
    fn blank_line_between_entries_is_a_format_error() {
        let result = VectorTable::from_lines(&["great 1 2", "", "bad 3 4"]);

        assert!(matches!(
            result,
            Err(VectorTableError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let table = VectorTable::from_lines(&["great 1 2", "", "  "]).unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn later_duplicates_replace_earlier_ones() {
        let table = VectorTable::from_lines(&["word 1 1", "word 2 2"]).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("word"), Some(&[2.0, 2.0][..]));
    }

    #[tokio::test]
    async fn rejects_unexpected_dimension() {
        let path = temp_file("glove.50d.txt", "the 0.1 0.2\n");

        let result = VectorTable::load_with_dimension(&path, 300).await;

        assert!(matches!(
            result,
            Err(VectorTableError::DimensionMismatch {
                expected: 300,
                actual: 2
            })
        ));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let result = VectorTable::load("/no/such/glove.txt").await;

        assert!(matches!(result, Err(VectorTableError::Io { .. })));
    }
}
