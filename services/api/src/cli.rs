use crate::commands::{run_assess, run_cohort, AssessArgs, CohortArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use placement_readiness::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Readiness",
    about = "Assess student placement readiness over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a single student profile stored as JSON
    Assess(AssessArgs),
    /// Assess every row of a cohort CSV export
    Cohort(CohortArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Cohort(args) => run_cohort(args),
    }
}
