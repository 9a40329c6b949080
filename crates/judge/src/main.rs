use std::env;
use std::io::Read;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use veridict_judge::RemoteJudge;

const USAGE: &str = "Usage: judge [--text <review>]";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let text = parse_args()?;
    let review = match text {
        Some(text) => text,
        None => read_stdin()?,
    };

    if review.trim().is_empty() {
        bail!("no review text given; nothing to judge");
    }

    let judge = RemoteJudge::from_env().context("failed to configure remote judge")?;
    let response = judge
        .judge(&review)
        .await
        .context("remote judgement failed")?;

    println!("{response}");
    Ok(())
}

fn parse_args() -> Result<Option<String>> {
    let mut args = env::args().skip(1);
    let mut text = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text" => {
                text = Some(args.next().context("expected value after --text")?);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(text)
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
