use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use veridict_core::{CountVectorizer, LogisticModel, VERSION};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let vectorizer_path = args
        .next()
        .map(PathBuf::from)
        .context("Usage: artifact_info <vectorizer.json> <model.json>")?;
    let model_path = args
        .next()
        .map(PathBuf::from)
        .context("Usage: artifact_info <vectorizer.json> <model.json>")?;

    let vectorizer = CountVectorizer::from_json_file(&vectorizer_path)
        .with_context(|| format!("failed to load vectorizer from {}", vectorizer_path.display()))?;
    let model = LogisticModel::from_json_file(&model_path)
        .with_context(|| format!("failed to load model from {}", model_path.display()))?;

    println!("veridict-core {VERSION}");
    println!("vectorizer: {}", vectorizer_path.display());
    println!("  terms: {}", vectorizer.dimension());
    println!("  fingerprint: {}", vectorizer.fingerprint());
    println!("model: {}", model_path.display());
    println!("  dimension: {}", model.dimension());
    println!("  intercept: {}", model.intercept);
    println!("  fingerprint: {}", model.fingerprint());

    if vectorizer.dimension() != model.dimension() {
        println!(
            "warning: dimension mismatch ({} vs {}); this pair will not load as a pipeline",
            vectorizer.dimension(),
            model.dimension()
        );
    }

    Ok(())
}
