mod cli;

use dumpindex::{config, output};
use dumpindex_ffindex::Index;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::io::Write;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "dumpindex=debug,dumpindex_ffindex=trace".to_string()
        } else {
            "dumpindex=info,dumpindex_ffindex=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(file) = cli.file.as_deref() else {
        println!("{}", Cli::command().render_usage());
        return Ok(());
    };

    let mut config = config::load_config_or_default(cli.config.as_deref())?;

    // Command-line flags override the config file
    if cli.legacy {
        config.decode.legacy = true;
    }
    if cli.compact {
        config.output.compact = true;
    }
    if let Some(track) = cli.track {
        config.output.track = track;
    }

    tracing::debug!("Decoding {:?}", file);
    let index = Index::open(file, &config.decode)
        .with_context(|| format!("Failed to read index {:?}", file))?;
    tracing::info!(
        "Decoded {} tracks, {} frames",
        index.tracks.len(),
        index.total_frames()
    );

    let rendered = output::render(&index, cli.view, &config.output)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }

    Ok(())
}
