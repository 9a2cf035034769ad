use acqscore::types::scoring::WeightProfile;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "acqscore",
    version,
    about = "Score companies as acquisition targets from collected signals"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single company snapshot
    Score(ScoreCommand),
    /// Score every snapshot under a path and list those above a threshold
    Batch(BatchCommand),
    /// Print the resolved weight set
    Weights(WeightsCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Profile {
    Market,
    Reviews,
}

impl From<Profile> for WeightProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Market => WeightProfile::Market,
            Profile::Reviews => WeightProfile::Reviews,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Built-in weight profile; overrides configured weights
    #[arg(long, value_enum)]
    pub profile: Option<Profile>,
    /// Directory holding acqscore.toml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub input: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct BatchCommand {
    pub path: PathBuf,
    #[arg(long, default_value_t = 0.0)]
    pub min_score: f64,
    #[arg(long, default_value_t = 0)]
    pub skip: usize,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct WeightsCommand {
    #[command(flatten)]
    pub profile: ProfileArgs,
}
