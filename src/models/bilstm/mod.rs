/// BiLSTM Classifier Configuration
pub mod config;

/// BiLSTM Classifier
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{BiLstm, Model, ModelRecord};
