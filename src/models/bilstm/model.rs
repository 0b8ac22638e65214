use burn::{
    module::Module,
    nn::{loss::BinaryCrossEntropyLossConfig, BatchNorm, Dropout, Embedding, Linear, Lstm},
    tensor::{
        activation::{relu, sigmoid},
        backend::Backend,
        Int, Tensor,
    },
    train::ClassificationOutput,
};

use crate::pipelines::text_classification::batcher;

/// Probabilities are clipped away from 0 and 1 before the log in the loss
const EPSILON: f32 = 1e-7;

/// Runs one LSTM over the sequence and another over the reversed sequence
#[derive(Module, Debug)]
pub struct BiLstm<B: Backend> {
    /// Reads the sequence front to back
    pub forward_lstm: Lstm<B>,

    /// Reads the sequence back to front
    pub backward_lstm: Lstm<B>,
}

impl<B: Backend> BiLstm<B> {
    /// Maps `[batch_size, seq_length, d_input]` to `[batch_size, seq_length, 2 * d_hidden]`,
    /// the forward states followed by the backward states at every time step
    pub fn forward(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        let (_, forward) = self.forward_lstm.forward(input.clone(), None);

        let (_, backward) = self.backward_lstm.forward(reverse_time(input), None);
        let backward = reverse_time(backward);

        Tensor::cat(vec![forward, backward], 2)
    }
}

/// Reverse a `[batch_size, seq_length, features]` tensor along the time axis
fn reverse_time<B: Backend>(tensor: Tensor<B, 3>) -> Tensor<B, 3> {
    let [_, seq_length, _] = tensor.dims();

    let indices = Tensor::<B, 1, Int>::arange(0..seq_length as i64, &tensor.device())
        .mul_scalar(-1)
        .add_scalar(seq_length as i64 - 1);

    tensor.select(1, indices)
}

/// BiLSTM binary classifier over word embeddings
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Word embeddings, row 0 for padding
    pub embedding: Embedding<B>,

    /// Bidirectional recurrent layer returning the full sequence
    pub lstm: BiLstm<B>,

    /// Dense block after global max pooling
    pub dense: Linear<B>,

    /// Dropout after the dense block
    pub dropout: Dropout,

    /// Batch normalization of the dense features
    pub norm: BatchNorm<B, 0>,

    /// Single sigmoid output unit
    pub output: Linear<B>,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Positive-class probability for each `[batch_size, seq_length]` token sequence
    pub fn probabilities(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, _seq_length] = tokens.dims();

        let embedded = self.embedding.forward(tokens);
        let states = self.lstm.forward(embedded);

        // Global max pooling over time, reduced on the last axis so ndarray can backpropagate it
        let pooled = states.swap_dims(1, 2).max_dim(2).squeeze::<2>(2);

        let hidden = relu(self.dense.forward(pooled));
        let hidden = self.dropout.forward(hidden);
        let hidden = self.norm.forward(hidden);

        sigmoid(self.output.forward(hidden)).reshape([batch_size])
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: batcher::Train<B>) -> ClassificationOutput<B> {
        let [batch_size, _seq_length] = item.input.tokens.dims();
        let device = &self.devices()[0];

        let targets = item.targets.to_device(device);
        let probabilities = self.probabilities(item.input.tokens.to_device(device));

        let loss = BinaryCrossEntropyLossConfig::new()
            .init(&probabilities.device())
            .forward(
                probabilities.clone().clamp(EPSILON, 1.0 - EPSILON),
                targets.clone(),
            );

        // Two columns, [P(0), P(1)], so class metrics can take the argmax
        let positive = probabilities.reshape([batch_size, 1]);
        let output = Tensor::cat(vec![positive.clone().neg().add_scalar(1.0), positive], 1);

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference
    pub fn infer(&self, input: batcher::Infer<B>) -> Tensor<B, 1> {
        let device = &self.devices()[0];

        self.probabilities(input.tokens.to_device(device))
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::{Autodiff, NdArray},
        module::Module,
        tensor::{Data, Shape},
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        embeddings::{EmbeddingMatrix, VectorTable},
        models::bilstm::Config,
        pipelines::text_classification::batcher::{Infer, Train},
        text::{Vocabulary, WordCounts},
    };

    type B = NdArray;

    fn tokens(values: Vec<i64>, batch_size: usize, seq_length: usize) -> Tensor<B, 2, Int> {
        Tensor::from_data(
            Data::<i64, 2>::new(values, Shape::new([batch_size, seq_length])),
            &Default::default(),
        )
    }

    fn small_config() -> Config {
        Config::new(3, 4, 2).with_lstm_units(5).with_dense_units(6)
    }

    #[test]
    fn reverses_the_time_axis() {
        let device = Default::default();
        let tensor = Tensor::<B, 3>::from_data(
            Data::<f32, 3>::new(
                vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
                Shape::new([1, 3, 2]),
            ),
            &device,
        );

        let reversed = reverse_time(tensor);

        assert_eq!(
            reversed.into_data().convert::<f32>().value,
            vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]
        );
    }

    #[test]
    fn bidirectional_states_have_twice_the_units() {
        let device = Default::default();
        let model = small_config().init::<B>(&device);

        let embedded = model.embedding.forward(tokens(vec![0, 2, 1, 1, 2, 1], 3, 2));
        let states = model.lstm.forward(embedded);

        assert_eq!(states.dims(), [3, 2, 10]);
    }

    #[test]
    fn produces_one_probability_per_sample() {
        let device = Default::default();
        let model = small_config().init::<B>(&device);

        let probabilities = model.infer(Infer::new(tokens(vec![0, 2, 2, 1], 2, 2)));

        let values = probabilities.into_data().convert::<f32>().value;
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn training_output_has_two_class_columns() {
        let device = Default::default();
        let model = small_config().init::<Autodiff<B>>(&device);

        let targets =
            Tensor::from_data(Data::<i64, 1>::new(vec![1, 0], Shape::new([2])), &device);
        let input = Infer::new(Tensor::from_data(
            Data::<i64, 2>::new(vec![0, 2, 2, 1], Shape::new([2, 2])),
            &device,
        ));

        let output = model.forward(Train::new(input, targets));

        assert_eq!(output.output.dims(), [2, 2]);
        assert_eq!(output.loss.dims(), [1]);

        let rows = output.output.into_data().convert::<f32>().value;
        assert!((rows[0] + rows[1] - 1.0).abs() < 1e-5);
        assert!((rows[2] + rows[3] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn backward_pass_reaches_the_embedding_weights() {
        let device = Default::default();
        let model = small_config().init::<Autodiff<B>>(&device);

        let targets =
            Tensor::from_data(Data::<i64, 1>::new(vec![1, 0, 1], Shape::new([3])), &device);
        let input = Infer::new(Tensor::from_data(
            Data::<i64, 2>::new(vec![0, 2, 2, 1, 1, 1], Shape::new([3, 2])),
            &device,
        ));

        let output = model.forward(Train::new(input, targets));
        let grads = output.loss.backward();

        let embedding_grad = model
            .embedding
            .weight
            .grad(&grads)
            .expect("embedding weights should receive a gradient");

        assert_eq!(embedding_grad.dims(), [3, 4]);
        assert!(model.output.weight.grad(&grads).is_some());
    }

    #[test]
    fn train_step_runs_on_the_cpu_backend() {
        use burn::train::TrainStep;

        let device = Default::default();
        let model = small_config().init::<Autodiff<B>>(&device);

        let targets =
            Tensor::from_data(Data::<i64, 1>::new(vec![0, 1], Shape::new([2])), &device);
        let input = Infer::new(Tensor::from_data(
            Data::<i64, 2>::new(vec![2, 1, 0, 2], Shape::new([2, 2])),
            &device,
        ));

        let output = TrainStep::step(&model, Train::new(input, targets));

        assert_eq!(output.item.output.dims(), [2, 2]);
    }

    #[test]
    fn embedding_layer_is_seeded_with_the_matrix() {
        let device = Default::default();
        let vocabulary = Vocabulary::build(
            &WordCounts::from_documents(&[vec!["great", "product"], vec!["bad", "product"]]),
            2,
        );
        let table = VectorTable::from_lines(&["product 1 2 3 4", "great 5 6 7 8"]).unwrap();
        let matrix = EmbeddingMatrix::build(&vocabulary, &table, 2, 4).unwrap();

        let model = small_config()
            .init_with_embeddings::<B>(&matrix, &device)
            .unwrap();

        assert_eq!(
            model.embedding.weight.val().into_data().convert::<f32>().value,
            matrix.values().to_vec()
        );
        assert!(model.num_params() > 0);
    }

    #[test]
    fn rejects_a_matrix_of_the_wrong_shape() {
        let device = Default::default();
        let vocabulary = Vocabulary::build(&WordCounts::default(), 2);
        let matrix =
            EmbeddingMatrix::build(&vocabulary, &VectorTable::default(), 5, 4).unwrap();

        let result = small_config().init_with_embeddings::<B>(&matrix, &device);

        assert!(result.is_err());
    }
}
