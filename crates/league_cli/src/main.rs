//! League Report CLI
//!
//! Description file → ranked venue/team/player report on stdout

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use league_core::{
    AveragePolicy, LeagueError, MalformedLinePolicy, OutputFormat, ReportConfig, SortOrder,
};

/// Exit status when the description file itself is at fault
const EXIT_INPUT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "league_report", version)]
#[command(about = "Rank and summarise a sports association description file", long_about = None)]
struct Cli {
    /// Association description file (j/e/s declarations)
    input: PathBuf,

    /// YAML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Venue average formula: team_mean, sport_sum or sport_sum_per_team
    #[arg(long)]
    policy: Option<AveragePolicy>,

    /// Order of venues, teams and team members: ascending or descending
    #[arg(long)]
    order: Option<SortOrder>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Skip malformed declaration lines instead of failing
    #[arg(long)]
    lenient: bool,

    /// Print elapsed time to stderr
    #[arg(long)]
    timing: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(policy) = self.policy {
            config.average_policy = policy;
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.lenient {
            config.malformed_lines = MalformedLinePolicy::Skip;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let input_error = err
                .downcast_ref::<LeagueError>()
                .is_some_and(LeagueError::is_input_error);
            if input_error {
                ExitCode::from(EXIT_INPUT_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let started = Instant::now();
    let config = cli.resolve_config()?;
    tracing::debug!("Resolved configuration: {:?}", config);

    let report = league_core::run(&cli.input, &config)
        .with_context(|| format!("Failed to build report for {}", cli.input.display()))?;
    let rendered = report.render(config.format)?;

    print!("{}", rendered);
    if config.format == OutputFormat::Json {
        println!();
    }

    if cli.timing {
        eprintln!(
            "Completed in {:.6} seconds",
            started.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
