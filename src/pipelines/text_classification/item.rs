use std::fmt::Debug;

use derive_new::new;

/// A trait for items that can be used for binary text classification
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the input text for the item
    fn input(&self) -> &str;

    /// Returns the class (0 or 1) for the item
    fn label(&self) -> u8;
}

/// An item whose text has already been encoded as a padded index sequence
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct EncodedItem {
    /// Vocabulary indices, padded to the corpus sequence length
    pub tokens: Vec<usize>,

    /// The class (0 or 1)
    pub label: u8,
}
