use std::path::Path;

use burn::{
    config::Config as _,
    data::dataloader::batcher::Batcher as BatcherTrait,
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::backend::Backend,
};

use crate::{
    models::bilstm,
    text::{SequenceEncoder, Vocabulary, WordTokenizer},
};

use super::{batcher::Infer, Batcher, Config};

/// Define inference function, returning the positive-class probability of each sample
pub async fn infer<B: Backend>(
    device: B::Device,    // Device on which to perform computation (e.g., CPU or CUDA device)
    artifact_dir: &str,   // Directory containing model, vocabulary, and config files
    samples: Vec<String>, // Text samples for inference
) -> anyhow::Result<Vec<f32>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let artifact_dir = Path::new(artifact_dir);

    // Load experiment configuration
    let config = Config::load(artifact_dir.join("config.json"))
        .map_err(|e| anyhow!("Unable to load config file: {}", e))?;

    let model_config = bilstm::Config::load(artifact_dir.join("model.json"))
        .map_err(|e| anyhow!("Unable to load model config file: {}", e))?;

    let vocabulary = tokio::fs::read_to_string(artifact_dir.join("vocabulary.json")).await?;
    let vocabulary: Vocabulary = serde_json::from_str(&vocabulary)?;

    let encoder = SequenceEncoder::new(
        WordTokenizer::new(),
        vocabulary,
        model_config.sequence_length,
        config.oov_policy,
    );

    // Load trained model weights
    log::info!("Loading weights...");

    let record = CompactRecorder::new()
        .load(artifact_dir.join("model"), &device)
        .map_err(|e| anyhow!("Unable to load trained model weights: {}", e))?;

    let model = model_config.init::<B>(&device).load_record(record);

    log::info!("Running inference on {} samples...", samples.len());

    let sequences = encoder
        .encode_batch(&samples)
        .map_err(|e| anyhow!("Unable to tokenize text: {}", e))?;

    let batcher = Batcher::<B>::new(encoder.sequence_length, device);
    let item: Infer<B> = batcher.batch(sequences);

    Ok(model.infer(item).into_data().convert::<f32>().value)
}
