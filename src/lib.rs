//! # BiLSTM Classifier
#![forbid(unsafe_code)]

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Pretrained word embeddings
pub mod embeddings;

/// Tokenization, vocabulary, and sequence encoding
pub mod text;

/// Utilities
pub mod utils;

/// Error macros
#[macro_use]
extern crate anyhow;
