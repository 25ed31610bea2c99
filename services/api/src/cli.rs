use std::path::PathBuf;

use appraisal_ai::error::AppError;
use clap::{Args, Parser, Subcommand};

use crate::demo::{run_assess, AssessArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Property Risk Assessor",
    about = "Score property appraisal documents and photos for risk and compliance findings",
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
    /// Assess a local appraisal document and photos, printing the report
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured risk rules file
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Optional detection manifest mapping image names to object labels
    #[arg(long)]
    pub(crate) detections: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
    }
}
