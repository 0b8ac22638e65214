use burn::{
    data::dataloader,
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use crate::utils::tensors::{labels_to_tensor, sequences_to_tensor};

use super::EncodedItem;

/// An inference batch for text classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Padded token ids as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching encoded text classification items
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Length of every padded sequence
    pub seq_length: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<Vec<usize>, Infer<B>> for Batcher<B> {
    /// Stacks padded sequences into an inference batch
    fn batch(&self, items: Vec<Vec<usize>>) -> Infer<B> {
        Infer {
            tokens: sequences_to_tensor(&items, self.seq_length, &self.device),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<EncodedItem, Train<B>> for Batcher<B> {
    /// Collects a vector of encoded items into a training batch
    fn batch(&self, items: Vec<EncodedItem>) -> Train<B> {
        let (sequences, labels): (Vec<_>, Vec<_>) = items
            .into_iter()
            .map(|item| (item.tokens, item.label))
            .unzip();

        let input =
            dataloader::batcher::Batcher::<Vec<usize>, Infer<B>>::batch(self, sequences);

        Train {
            input,
            targets: labels_to_tensor(&labels, &self.device),
        }
    }
}
