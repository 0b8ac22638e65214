/// Batcher
pub mod batcher;

/// Experiment configuration
pub mod config;

/// Preprocessed training and validation data
pub mod corpus;

/// Text Classification Items
pub mod item;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use config::Config;
pub use corpus::Corpus;
pub use inference::infer;
pub use item::{EncodedItem, Item};
pub use training::train;
