use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use rattler::game::GameConfig;
use rattler::modes::ArcadeMode;

#[derive(Parser)]
#[command(name = "rattler")]
#[command(version, about = "Terminal snake arcade game")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "30")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "30")]
    height: usize,

    /// Disable music and sound effects
    #[arg(long)]
    mute: bool,

    /// Append tracing output to this file (verbosity via RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The guard flushes buffered log lines on drop
    let _log_guard = cli.log_file.as_deref().map(init_tracing).transpose()?;

    let config = GameConfig::new(cli.width, cli.height);
    let mut arcade = ArcadeMode::new(config, cli.mute);
    arcade.run().await?;

    Ok(())
}

/// Log to a file so tracing output does not fight the alternate screen
fn init_tracing(path: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
