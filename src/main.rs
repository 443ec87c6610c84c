use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use optman::input::load_description;
use optman::render::{render_to_string, RenderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "optman",
    version,
    about = "Generate groff man pages from command-line descriptions"
)]
struct Cli {
    /// Path to a JSON command-line description
    description: PathBuf,

    /// Output path for the generated man page (defaults to stdout)
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let parser = load_description(&cli.description)
        .with_context(|| format!("load description {}", cli.description.display()))?;
    let config = RenderConfig::from_env()?;
    let man_page = render_to_string(&parser, &config)?;

    match &cli.out {
        Some(path) => {
            fs::write(path, &man_page)
                .with_context(|| format!("write man page {}", path.display()))?;
            info!(path = %path.display(), bytes = man_page.len(), "wrote man page");
        }
        None => {
            io::stdout()
                .write_all(man_page.as_bytes())
                .context("write man page to stdout")?;
        }
    }
    Ok(())
}
