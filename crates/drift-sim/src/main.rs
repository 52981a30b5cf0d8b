//! drift-sim - run drift-aware stream classifiers over synthetic streams
//!
//! Usage:
//!   drift-sim run --algorithm ensemble --stream sea --instances 20000
//!   drift-sim run --algorithm window --stream blobs --config window.json
//!   drift-sim list

use clap::{Parser, Subcommand, ValueEnum};
use drift_core::{DriftEnsemble, EnsembleConfig, StreamClassifier, WindowConfig, WindowedSelector};
use drift_sim::{Prequential, scenarios};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "drift-sim")]
#[command(about = "Prequential evaluation of drift-aware stream classifiers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one classifier on one stream
    Run {
        /// Classifier to evaluate
        #[arg(short, long, default_value = "ensemble")]
        algorithm: Algorithm,

        /// Stream to draw instances from
        #[arg(short, long, default_value = "sea")]
        stream: String,

        /// Number of instances to process
        #[arg(short = 'n', long, default_value = "10000")]
        instances: u64,

        /// Seed for the stream generator
        #[arg(long, default_value = "42")]
        seed: u64,

        /// JSON configuration for the chosen classifier
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Accuracy window size
        #[arg(short, long, default_value = "1000")]
        window: u64,
    },

    /// List available streams
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Windowed neighbor selection
    Window,
    /// Drift-adaptive ensemble
    Ensemble,
}

impl Algorithm {
    fn name(self) -> &'static str {
        match self {
            Algorithm::Window => "window",
            Algorithm::Ensemble => "ensemble",
        }
    }

    fn build(self, config: Option<&str>) -> drift_core::Result<Box<dyn StreamClassifier>> {
        let classifier: Box<dyn StreamClassifier> = match (self, config) {
            (Algorithm::Window, Some(json)) => {
                Box::new(WindowedSelector::new(WindowConfig::from_json(json)?)?)
            }
            (Algorithm::Window, None) => Box::new(WindowedSelector::new(WindowConfig::default())?),
            (Algorithm::Ensemble, Some(json)) => {
                Box::new(DriftEnsemble::new(EnsembleConfig::from_json(json)?)?)
            }
            (Algorithm::Ensemble, None) => Box::new(DriftEnsemble::new(EnsembleConfig::default())?),
        };
        Ok(classifier)
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            algorithm,
            stream,
            instances,
            seed,
            config,
            window,
        } => run_evaluation(algorithm, &stream, instances, seed, config, window),
        Commands::List => run_list(),
    }
}

fn run_evaluation(
    algorithm: Algorithm,
    stream_name: &str,
    instances: u64,
    seed: u64,
    config: Option<PathBuf>,
    window: u64,
) {
    let Some(mut stream) = scenarios::create_stream(stream_name, seed) else {
        eprintln!("Unknown stream '{}'. Use `drift-sim list`.", stream_name);
        std::process::exit(2);
    };

    let config_json = match config.as_deref().map(std::fs::read_to_string).transpose() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to read config: {}", e);
            std::process::exit(2);
        }
    };

    let mut classifier = match algorithm.build(config_json.as_deref()) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Failed to build {}: {}", algorithm.name(), e);
            std::process::exit(2);
        }
    };

    info!(
        algorithm = algorithm.name(),
        stream = stream.name(),
        instances,
        seed,
        "Starting prequential evaluation"
    );

    let report =
        Prequential::new(window).run(algorithm.name(), &mut classifier, stream.as_mut(), instances);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_list() {
    println!("Available streams:");
    for (name, description) in scenarios::list_streams() {
        println!("  {:12} - {}", name, description);
    }
    println!("\nUsage: drift-sim run --algorithm <window|ensemble> --stream <STREAM>");
}
