//! Command line tool to score descriptions with a trained classifier

use anyhow::anyhow;
use bilstm_classifier::{pipelines::text_classification::infer, utils::logging};
use burn::backend::{libtorch::LibTorchDevice, ndarray::NdArrayDevice, LibTorch, NdArray};
use pico_args::Arguments;

const HELP: &str = "\
Usage: infer [OPTIONS] TEXT...

Arguments:
  TEXT                 One or more descriptions to classify

Options:
  -h, --help           Print help
  -o, --output         The directory the trained model was written to (defaults to 'data/classifiers/bilstm')
  --cpu                Run on the CPU instead of the first CUDA device
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The artifact directory of a trained model
    artifact_dir: Option<String>,

    /// Run on the CPU
    use_cpu: bool,

    /// The descriptions to classify
    samples: Vec<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let help = pargs.contains(["-h", "--help"]);
    let artifact_dir = pargs.opt_value_from_str(["-o", "--output"])?;
    let use_cpu = pargs.contains("--cpu");

    let samples = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    Ok(Args {
        help,
        artifact_dir,
        use_cpu,
        samples,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    if args.samples.is_empty() {
        return Err(anyhow!("At least one TEXT to classify is required"));
    }

    let artifact_dir = args
        .artifact_dir
        .unwrap_or_else(|| "data/classifiers/bilstm".to_string());

    let probabilities = if args.use_cpu {
        infer::<NdArray>(NdArrayDevice::Cpu, &artifact_dir, args.samples.clone()).await?
    } else {
        infer::<LibTorch>(LibTorchDevice::Cuda(0), &artifact_dir, args.samples.clone()).await?
    };

    for (text, probability) in args.samples.iter().zip(probabilities) {
        let label = u8::from(probability >= 0.5);
        println!("{label}\t{probability:.4}\t{text}");
    }

    Ok(())
}
