mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{tag, walk};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &cli.command {
        Commands::Tag(args) => tag::run(&cli, args),
        Commands::WalkBuffer(args) => walk::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
