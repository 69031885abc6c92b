use anyhow::Result;
use tracing::{info, warn};
use zonetag::{RunConfig, run_tagging};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::TagArgs) -> Result<()> {
    info!("[tag] loading config from {}", args.config.display());
    let mut config = RunConfig::from_path(&args.config)?;
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    let report = run_tagging(&config)?;
    for (column, links, nodes) in &report.summaries {
        info!("[tag] {column} links: {links}");
        info!("[tag] {column} nodes: {nodes}");
    }
    if report.unresolved() > 0 {
        warn!("[tag] {} features left unresolved; review the warnings above", report.unresolved());
    }
    for path in &report.outputs {
        info!("[tag] wrote {}", path.display());
    }

    Ok(())
}
