use std::path::Path;

use burn::{
    config::Config as _,
    data::{
        dataloader::DataLoaderBuilder,
        dataset::{Dataset as _, InMemDataset},
    },
    module::Module,
    optim::AdamConfig,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
    train::{
        metric::{AccuracyMetric, LossMetric},
        LearnerBuilder,
    },
};

use crate::{
    datasets::Dataset,
    embeddings::{EmbeddingMatrix, VectorTable},
    models::bilstm,
    utils::renderer,
};

use super::{Batcher, Config, Corpus};

/// Everything the learner needs, loaded and preprocessed from the configured files
pub struct Prepared {
    /// Encoded training and validation data
    pub corpus: Corpus,

    /// Pretrained vectors for the corpus vocabulary
    pub matrix: EmbeddingMatrix,
}

/// Load the datasets and word vectors named in the config and preprocess them
pub async fn prepare(config: &Config) -> anyhow::Result<Prepared> {
    log::info!("Loading datasets...");

    let train = Dataset::load(&config.training_set_path).await?;
    let valid = Dataset::load(&config.validation_set_path).await?;

    log::info!(
        "Loaded {} training and {} validation samples",
        train.len(),
        valid.len()
    );

    let corpus = Corpus::prepare(
        &train.items(),
        &valid.items(),
        config.vocabulary_size,
        config.oov_policy,
    )?;

    log::info!("Loading word vectors from {}...", config.vector_table_path);

    let table =
        VectorTable::load_with_dimension(&config.vector_table_path, config.embedding_dimension)
            .await?;

    let matrix = EmbeddingMatrix::build(
        corpus.vocabulary(),
        &table,
        config.vocabulary_size,
        config.embedding_dimension,
    )?;

    Ok(Prepared { corpus, matrix })
}

/// The model configuration implied by the experiment configuration and the corpus
pub fn model_config(config: &Config, corpus: &Corpus) -> bilstm::Config {
    bilstm::Config::new(
        config.vocabulary_size + 1,
        config.embedding_dimension,
        corpus.sequence_length(),
    )
    .with_lstm_units(config.lstm_units)
    .with_dense_units(config.dense_units)
    .with_dropout(config.dropout)
}

/// Define train function
pub fn train<B: AutodiffBackend>(
    devices: Vec<B::Device>, // Devices on which to perform computation (e.g., CPU or CUDA device)
    prepared: Prepared,      // Encoded data and the embedding matrix
    config: Config,          // Experiment configuration
    use_tui: bool,           // Render the training dashboard instead of logging progress
) -> anyhow::Result<bilstm::Model<B>> {
    let device = devices
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("At least one device is required for training"))?;

    let artifact_dir = config.artifact_dir.as_str();
    std::fs::create_dir_all(artifact_dir)?;

    B::seed(config.seed);

    let Prepared { corpus, matrix } = prepared;

    let model_config = model_config(&config, &corpus);
    let model = model_config.init_with_embeddings::<B>(&matrix, &device)?;

    log::info!("{}", model);

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(corpus.sequence_length(), device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(corpus.sequence_length(), device.clone());

    let workers = std::thread::available_parallelism()?;

    // Initialize data loaders for training and validation data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(workers.into())
        .build(InMemDataset::new(corpus.train.clone()));

    let dataloader_valid = DataLoaderBuilder::new(batcher_valid)
        .batch_size(config.batch_size)
        .num_workers(workers.into())
        .build(InMemDataset::new(corpus.valid.clone()));

    // Initialize optimizer
    let optimizer = AdamConfig::new().with_epsilon(config.adam_epsilon).init();

    // Initialize learner
    let builder = LearnerBuilder::new(artifact_dir)
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .with_file_checkpointer(CompactRecorder::new())
        .devices(devices)
        .num_epochs(config.num_epochs)
        .summary();

    let builder = if use_tui {
        builder
    } else {
        builder.renderer(renderer::Simple::new())
    };

    let learner = builder.build(model, optimizer, config.learning_rate);

    // Train the model
    let model_trained = learner.fit(dataloader_train, dataloader_valid);

    save(artifact_dir, &config, &model_config, &corpus, &model_trained)?;

    Ok(model_trained)
}

/// Save the configuration, vocabulary, and trained weights
fn save<B: AutodiffBackend>(
    artifact_dir: &str,
    config: &Config,
    model_config: &bilstm::Config,
    corpus: &Corpus,
    model: &bilstm::Model<B>,
) -> anyhow::Result<()> {
    let artifact_dir = Path::new(artifact_dir);

    config.save(artifact_dir.join("config.json"))?;
    model_config.save(artifact_dir.join("model.json"))?;

    std::fs::write(
        artifact_dir.join("vocabulary.json"),
        serde_json::to_string_pretty(corpus.vocabulary())?,
    )?;

    CompactRecorder::new()
        .record(model.clone().into_record(), artifact_dir.join("model"))
        .map_err(|e| anyhow!("Unable to save trained model weights: {}", e))?;

    log::info!("Saved trained model to {}", artifact_dir.display());

    Ok(())
}
