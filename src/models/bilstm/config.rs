use burn::{
    module::Param,
    nn::{BatchNormConfig, DropoutConfig, EmbeddingConfig, LinearConfig, LstmConfig},
    tensor::backend::Backend,
};

use crate::embeddings::EmbeddingMatrix;

use super::{BiLstm, Model};

/// The Model Configuration
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Rows in the embedding table, including the padding row
    pub vocab_size: usize,

    /// Width of each word embedding (e.g., 300 for glove.6B.300d)
    pub embedding_dimension: usize,

    /// Length of every input sequence
    pub sequence_length: usize,

    /// Hidden units of the LSTM in each direction
    #[config(default = 300)]
    pub lstm_units: usize,

    /// Units of the dense block after pooling
    #[config(default = 100)]
    pub dense_units: usize,

    /// Dropout probability after the dense block
    #[config(default = 0.2)]
    pub dropout: f64,
}

impl Config {
    /// Initialize the model with randomly initialized embeddings
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dimension).init(device);

        let lstm = BiLstm {
            forward_lstm: LstmConfig::new(self.embedding_dimension, self.lstm_units, true)
                .init(device),
            backward_lstm: LstmConfig::new(self.embedding_dimension, self.lstm_units, true)
                .init(device),
        };

        let dense = LinearConfig::new(2 * self.lstm_units, self.dense_units).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        let norm = BatchNormConfig::new(self.dense_units).init(device);
        let output = LinearConfig::new(self.dense_units, 1).init(device);

        Model {
            embedding,
            lstm,
            dense,
            dropout,
            norm,
            output,
        }
    }

    /// Initialize the model, seeding the embedding layer with pretrained vectors
    pub fn init_with_embeddings<B: Backend>(
        &self,
        matrix: &EmbeddingMatrix,
        device: &B::Device,
    ) -> anyhow::Result<Model<B>> {
        if matrix.shape() != [self.vocab_size, self.embedding_dimension] {
            return Err(anyhow!(
                "Embedding matrix has shape {:?}, the model expects [{}, {}]",
                matrix.shape(),
                self.vocab_size,
                self.embedding_dimension
            ));
        }

        let mut model = self.init(device);
        model.embedding.weight = Param::from_tensor(matrix.to_tensor(device));

        Ok(model)
    }
}
