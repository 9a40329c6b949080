use std::env;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use veridict_core::ClassifierPipeline;

const USAGE: &str = "Usage: classify <vectorizer.json> <model.json> [--text <review>]";

fn main() -> Result<()> {
    init_logging();

    let (vectorizer_path, model_path, text) = parse_args()?;

    let review = match text {
        Some(text) => text,
        None => read_stdin()?,
    };

    if review.trim().is_empty() {
        bail!("no review text given; nothing to classify");
    }

    let pipeline = ClassifierPipeline::load(&vectorizer_path, &model_path)
        .context("failed to load classifier artifacts")?;

    let verdict = pipeline
        .classify(&review)
        .context("failed to classify review")?;

    println!("{verdict}");
    Ok(())
}

fn parse_args() -> Result<(PathBuf, PathBuf, Option<String>)> {
    let mut args = env::args().skip(1);
    let vectorizer_path = args.next().map(PathBuf::from).context(USAGE)?;
    let model_path = args.next().map(PathBuf::from).context(USAGE)?;

    let mut text = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text" => {
                text = Some(args.next().context("expected value after --text")?);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok((vectorizer_path, model_path, text))
}

fn read_stdin() -> Result<String> {
    let mut review = String::new();
    std::io::stdin()
        .read_to_string(&mut review)
        .context("failed to read review text from stdin")?;
    Ok(review)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
