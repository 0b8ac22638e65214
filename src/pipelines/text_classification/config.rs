use burn::LearningRate;

use crate::text::OovPolicy;

/// Define configuration struct for the experiment
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Line-delimited JSON training set
    #[config(default = "\"data/dataset/training_set.txt\".to_string()")]
    pub training_set_path: String,

    /// Line-delimited JSON validation set
    #[config(default = "\"data/dataset/validation_set.txt\".to_string()")]
    pub validation_set_path: String,

    /// Pretrained word vectors
    #[config(default = "\"data/glove/glove.6B.300d.txt\".to_string()")]
    pub vector_table_path: String,

    /// Directory for the trained model, its configuration, and checkpoints
    #[config(default = "\"data/classifiers/bilstm\".to_string()")]
    pub artifact_dir: String,

    /// Number of most frequent words kept in the vocabulary
    #[config(default = 3000)]
    pub vocabulary_size: usize,

    /// Width of the pretrained word vectors
    #[config(default = 300)]
    pub embedding_dimension: usize,

    /// How words outside the vocabulary are encoded
    #[config(default = "OovPolicy::Skip")]
    pub oov_policy: OovPolicy,

    /// Hidden units of the LSTM in each direction
    #[config(default = 300)]
    pub lstm_units: usize,

    /// Units of the dense block
    #[config(default = 100)]
    pub dense_units: usize,

    /// Dropout rate
    #[config(default = 0.2)]
    pub dropout: f64,

    /// Batch size
    #[config(default = 100)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 100)]
    pub num_epochs: usize,

    /// Adam epsilon
    #[config(default = 1e-7)]
    pub adam_epsilon: f32,

    /// Learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Seed for weight initialization and batch shuffling
    #[config(default = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use burn::config::Config as _;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::utils::files::testing::temp_file;

    #[test]
    fn defaults_match_the_reference_experiment() {
        let config = Config::new();

        assert_eq!(config.vocabulary_size, 3000);
        assert_eq!(config.embedding_dimension, 300);
        assert_eq!(config.num_epochs, 100);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.oov_policy, OovPolicy::Skip);
        assert_eq!(config.vector_table_path, "data/glove/glove.6B.300d.txt");
    }

    #[test]
    fn loads_from_json() {
        let path = temp_file("config.json", "");
        Config::new()
            .with_vocabulary_size(10)
            .with_oov_policy(OovPolicy::Sentinel)
            .save(&path)
            .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.vocabulary_size, 10);
        assert_eq!(config.oov_policy, OovPolicy::Sentinel);
        assert_eq!(config.batch_size, 100);
    }
}
