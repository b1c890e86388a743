use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use platescan::detection::{Tesseract, TesseractConfig};
use platescan::{Outcome, PlatePipeline, present};

#[derive(Parser)]
#[command(name = "platescan")]
#[command(about = "License plate recognition: find the plate in a car photo and read it")]
struct Cli {
    /// Path to the car image
    #[arg(short, long, value_name = "PATH")]
    image: PathBuf,

    /// Disable image display
    #[arg(long)]
    no_gui: bool,

    /// Tesseract executable (name on PATH or full path)
    #[arg(long, value_name = "PATH", env = "TESSERACT_CMD", default_value = "tesseract")]
    tesseract: PathBuf,

    /// OCR language, e.g. "eng"
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save every stage's image to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

fn run(args: &Cli) -> anyhow::Result<Outcome> {
    let engine = Tesseract::new(
        TesseractConfig::new(&args.tesseract).with_language(args.lang.clone()),
    );
    let mut pipeline = PlatePipeline::new(Box::new(engine));
    if let Some(debug_dir) = &args.debug_out {
        pipeline = pipeline.with_debug(debug_dir.clone())?;
    }

    tracing::info!(image = %args.image.display(), "running plate recognition");
    Ok(pipeline.run(&args.image)?)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{e}");
    }

    match run(&args) {
        Ok(outcome) => {
            print!("{}", present::report(&outcome));
            match outcome {
                Outcome::Recognized(reading) => {
                    if !args.no_gui {
                        present::display(&reading);
                    }
                    ExitCode::SUCCESS
                }
                Outcome::PlateNotDetected => ExitCode::FAILURE,
            }
        }
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            println!("{}", present::error_line(&e));
            ExitCode::FAILURE
        }
    }
}
