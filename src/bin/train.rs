//! Command line tool to train the description classifier

use anyhow::anyhow;
use bilstm_classifier::{
    pipelines::text_classification::{self, training},
    utils::logging,
};
use burn::{
    backend::{libtorch::LibTorchDevice, ndarray::NdArrayDevice, Autodiff, LibTorch, NdArray},
    config::Config as _,
};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help             Print help
  -c, --config           A JSON experiment config to start from
  -t, --train            The training set (JSON lines with 'description' and 'label')
  -v, --valid            The validation set
  -g, --glove            The pretrained word vector file
  -o, --output           The directory to write the trained model to
  -n, --num-epochs       Number of epochs to train for
  -b, --batch-size       Batch size
  -s, --vocabulary-size  Number of most frequent words to keep
  --cpu                  Train on the CPU instead of the first CUDA device
  --no-tui               Disable TUI
";

#[derive(Debug)]
struct Args {
    config: Option<String>,
    training_set: Option<String>,
    validation_set: Option<String>,
    vector_table: Option<String>,
    artifact_dir: Option<String>,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    vocabulary_size: Option<usize>,
    use_cpu: bool,
    use_tui: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            training_set: pargs.opt_value_from_str(["-t", "--train"])?,
            validation_set: pargs.opt_value_from_str(["-v", "--valid"])?,
            vector_table: pargs.opt_value_from_str(["-g", "--glove"])?,
            artifact_dir: pargs.opt_value_from_str(["-o", "--output"])?,
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            vocabulary_size: pargs.opt_value_from_str(["-s", "--vocabulary-size"])?,
            use_cpu: pargs.contains("--cpu"),
            use_tui: !(pargs.contains("--no-tui")),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }

    fn config(&self) -> anyhow::Result<text_classification::Config> {
        let mut config = match &self.config {
            Some(path) => text_classification::Config::load(path)
                .map_err(|e| anyhow!("Unable to load config file {}: {}", path, e))?,
            None => text_classification::Config::new(),
        };

        if let Some(path) = &self.training_set {
            config.training_set_path = path.clone();
        }

        if let Some(path) = &self.validation_set {
            config.validation_set_path = path.clone();
        }

        if let Some(path) = &self.vector_table {
            config.vector_table_path = path.clone();
        }

        if let Some(dir) = &self.artifact_dir {
            config.artifact_dir = dir.clone();
        }

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(vocabulary_size) = self.vocabulary_size {
            config.vocabulary_size = vocabulary_size;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config()?;
    let prepared = training::prepare(&config).await?;

    if args.use_cpu {
        training::train::<Autodiff<NdArray>>(
            vec![NdArrayDevice::Cpu],
            prepared,
            config,
            args.use_tui,
        )?;
    } else {
        training::train::<Autodiff<LibTorch>>(
            vec![LibTorchDevice::Cuda(0)],
            prepared,
            config,
            args.use_tui,
        )?;
    }

    Ok(())
}
