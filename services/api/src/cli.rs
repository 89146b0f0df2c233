use crate::demo::{
    run_demo, run_evaluate, run_sensitivity, DemoArgs, EvaluateArgs, SensitivityArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fuzzy Credit Scoring",
    about = "Score loan applicants with the fuzzy credit engine from the command line or over HTTP",
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
    /// Score a single applicant
    Evaluate(EvaluateArgs),
    /// Sample approval across one input while holding the others fixed
    Sensitivity(SensitivityArgs),
    /// Print the reference applicant scenarios
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Sensitivity(args) => run_sensitivity(args),
        Command::Demo(args) => run_demo(args),
    }
}
