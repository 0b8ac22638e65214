use std::path::{Path, PathBuf};

use burn::data::dataset::{self, InMemDataset};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::{pipelines::text_classification, utils::files::read_file};

/// A labeled description, as stored on each line of the dataset file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Item {
    /// The text for classification
    pub description: String,

    /// The binary class of the text (0 or 1)
    pub label: u8,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.description
    }

    fn label(&self) -> u8 {
        self.label
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be opened or read
    #[error("unable to read dataset {path}: {source}")]
    Io {
        /// Path of the dataset file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line is not a valid record
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the dataset file
        line: usize,
        /// What was wrong with the record
        reason: String,
    },
}

/// An in-memory dataset of labeled descriptions, in file order
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,
}

/// Implement the Dataset trait for the descriptions dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

impl Dataset {
    /// Wrap already loaded items
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            dataset: InMemDataset::new(items),
        }
    }

    /// Load a dataset from a file with one JSON object per line
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();

        let lines = read_file(path).await.map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let items = parse_lines(&lines)?;

        log::debug!("Loaded {} records from {}", items.len(), path.display());

        Ok(Self::from_items(items))
    }

    /// Split the dataset into parallel sequences of texts and labels
    pub fn split(&self) -> (Vec<String>, Vec<u8>) {
        self.items()
            .into_iter()
            .map(|item| (item.description, item.label))
            .unzip()
    }

    /// All items, in file order
    pub fn items(&self) -> Vec<Item> {
        dataset::Dataset::iter(&self.dataset).collect()
    }
}

fn parse_lines(lines: &[String]) -> Result<Vec<Item>, DatasetError> {
    let mut items = Vec::with_capacity(lines.len());

    // Trailing blank lines carry no record, blank lines between records are malformed
    let last_record = lines.iter().rposition(|line| !line.trim().is_empty());

    for (i, line) in lines.iter().enumerate() {
        let line_number = i + 1;
        let line = line.trim();

        if line.is_empty() {
            if last_record.is_some_and(|last| i < last) {
                return Err(DatasetError::MalformedRecord {
                    line: line_number,
                    reason: "blank line between records".to_string(),
                });
            }

            continue;
        }

        let item: Item =
            serde_json::from_str(line).map_err(|e| DatasetError::MalformedRecord {
                line: line_number,
                reason: e.to_string(),
            })?;

        if item.label > 1 {
            return Err(DatasetError::MalformedRecord {
                line: line_number,
                reason: format!("label must be 0 or 1, got {}", item.label),
            });
        }

        items.push(item);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use burn::data::dataset::Dataset as _;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::files::testing::temp_file;

    #[tokio::test]
    async fn loads_records_in_file_order() {
        let path = temp_file(
            "train.txt",
            concat!(
                "{\"description\": \"great product\", \"label\": 1}\n",
                "{\"description\": \"bad product\", \"label\": 0, \"id\": 7}\n",
                "\n",
            ),
        );

        let dataset = Dataset::load(&path).await.unwrap();
        let (texts, labels) = dataset.split();

        assert_eq!(dataset.len(), 2);
        assert_eq!(texts, vec!["great product", "bad product"]);
        assert_eq!(labels, vec![1, 0]);
        assert_eq!(texts.len(), labels.len());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let result = Dataset::load("/no/such/dataset.txt").await;

        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }

    #[test]
    fn rejects_invalid_json() {
        let lines = vec![
            "{\"description\": \"ok\", \"label\": 1}".to_string(),
            "{not json".to_string(),
        ];

        let result = parse_lines(&lines);

        assert!(matches!(
            result,
            Err(DatasetError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_blank_lines_between_records() {
        let lines = vec![
            "{\"description\": \"first\", \"label\": 1}".to_string(),
            "".to_string(),
            "{\"description\": \"second\", \"label\": 0}".to_string(),
        ];

        assert!(matches!(
            parse_lines(&lines),
            Err(DatasetError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn ignores_trailing_blank_lines() {
        let lines = vec![
            "{\"description\": \"only\", \"label\": 1}".to_string(),
            "".to_string(),
            "   ".to_string(),
        ];

        assert_eq!(parse_lines(&lines).unwrap().len(), 1);
    }

    #[test]
    fn rejects_missing_fields() {
        let lines = vec!["{\"label\": 1}".to_string()];

        assert!(matches!(
            parse_lines(&lines),
            Err(DatasetError::MalformedRecord { line: 1, .. })
        ));

        let lines = vec!["{\"description\": \"no label\"}".to_string()];

        assert!(matches!(
            parse_lines(&lines),
            Err(DatasetError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_non_binary_labels() {
        let lines = vec!["{\"description\": \"x\", \"label\": 2}".to_string()];

        assert!(matches!(
            parse_lines(&lines),
            Err(DatasetError::MalformedRecord { line: 1, .. })
        ));
    }
}
