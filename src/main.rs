mod cli;

use acqscore::analyze::{self, batch};
use acqscore::config;
use acqscore::error::ScoreError;
use acqscore::report;
use acqscore::types::config::ScoringProfile;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const DEGRADED: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn resolve_profile(args: &cli::ProfileArgs) -> Result<ScoringProfile, ScoreError> {
    if !args.config_dir.exists() {
        return Err(ScoreError::InputNotFound(
            args.config_dir.display().to_string(),
        ));
    }
    let loaded = config::load_config(&args.config_dir)?.unwrap_or_default();
    loaded.scoring_profile(args.profile.map(Into::into))
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, ScoreError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            if !cmd.input.is_file() {
                return Err(ScoreError::InputNotFound(cmd.input.display().to_string()));
            }
            let profile = resolve_profile(&cmd.profile)?;
            let snapshots = batch::read_snapshots(&cmd.input)?;
            let [signals] = snapshots.as_slice() else {
                return Err(ScoreError::InvalidInput(format!(
                    "{} holds {} snapshots; use `acqscore batch` for more than one",
                    cmd.input.display(),
                    snapshots.len()
                )));
            };

            let score_report = analyze::evaluate_company(signals, &profile)?;
            println!("{}", report::render(&score_report, output_format(cmd.format))?);

            if score_report.is_degraded() {
                Ok(exit_code::DEGRADED)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Batch(cmd) => {
            let profile = resolve_profile(&cmd.profile)?;
            let snapshots = batch::load_snapshots(&cmd.path)?;
            tracing::info!(count = snapshots.len(), profile = %profile.name, "scoring batch");

            let reports = batch::evaluate_snapshots(&snapshots, &profile)?;
            let any_degraded = reports.iter().any(|report| report.is_degraded());
            let ranked = batch::rank_companies(reports, cmd.min_score, cmd.skip, cmd.limit);
            println!(
                "{}",
                report::render_batch(&ranked, output_format(cmd.format))?
            );

            if any_degraded {
                Ok(exit_code::DEGRADED)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Weights(cmd) => {
            let profile = resolve_profile(&cmd.profile)?;
            println!("profile: {}", profile.name);
            for (category, weight) in profile.weights.iter() {
                println!("- {category}: {weight:.3}");
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
