use std::path::PathBuf;

/// Zone tagging for travel-model highway networks
#[derive(clap::Parser, Debug)]
#[command(name = "zonetag", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Tag links and nodes with TAZ and/or toll zone ids
    Tag(TagArgs),

    /// Compute the walkable share of each TAZ around local bus service
    WalkBuffer(WalkArgs),
}

/// Zone systems to tag, overriding the config file.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Taz,
    Toll,
    Both,
}

impl From<ModeArg> for zonetag::TagMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Taz => Self::Taz,
            ModeArg::Toll => Self::Toll,
            ModeArg::Both => Self::Both,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct TagArgs {
    /// Run configuration (TOML)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Zone systems to tag, defaults to the config's `mode`
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output directory, defaults to the config's `output_dir`
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct WalkArgs {
    /// Run configuration (TOML)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output directory, defaults to the config's `output_dir`
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}
