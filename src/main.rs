use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Level;

use trinet::data::{linearly_separable, load_csv};
use trinet::{evaluate, train_loop, Network, TrainConfig};

/// Trains the 10-5-1 sigmoid network on a labelled CSV (or synthetic data)
/// one sample at a time and reports the loss per epoch.
#[derive(Parser, Debug)]
#[command(name = "trinet", version, about)]
struct Args {
    /// Delimited data file; last column is the class. Synthetic data if omitted.
    #[arg(long)]
    data: Option<PathBuf>,

    /// JSON training config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of synthetic samples when no data file is given.
    #[arg(long, default_value_t = 200)]
    samples: usize,

    /// Write the per-epoch stats as JSON to this path.
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log one debug event per trained sample, plus setup detail.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let mut config = match &args.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => TrainConfig::default(),
    };
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    if let Some(lr) = args.learning_rate {
        config.learning_rate = lr;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut dataset = match &args.data {
        Some(path) => load_csv(path, config.delimiter, config.label_offset)
            .with_context(|| format!("loading {}", path.display()))?,
        None => linearly_separable(args.samples)?,
    };
    dataset.shuffle(&mut rng);
    dataset.standardize()?;
    let (train, test) = dataset.split(config.test_fraction)?;
    tracing::info!(
        train = train.len(),
        test = test.as_ref().map_or(0, |t| t.len()),
        features = train.n_features(),
        "prepared data"
    );

    let mut network = Network::with_rng(train.n_features(), config.learning_rate, &mut rng)?;
    let history = train_loop(&mut network, &train, test.as_ref(), &config)?;

    if let Some(test) = &test {
        let eval = evaluate(&mut network, test)?;
        println!(
            "Test: loss = {:.6}, accuracy = {:.2}%",
            eval.mean_loss,
            eval.accuracy * 100.0
        );
    }

    if let Some(path) = &args.history {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &history)?;
        println!("Wrote {} epochs to {}", history.len(), path.display());
    }

    Ok(())
}
