use anyhow::Result;
use tracing::info;
use zonetag::{RunConfig, run_walk_buffer};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::WalkArgs) -> Result<()> {
    info!("[walk-buffer] loading config from {}", args.config.display());
    let mut config = RunConfig::from_path(&args.config)?;
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    let report = run_walk_buffer(&config)?;
    info!("[walk-buffer] {} TAZs measured", report.shares.len());
    for path in &report.outputs {
        info!("[walk-buffer] wrote {}", path.display());
    }

    Ok(())
}
