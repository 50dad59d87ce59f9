use crate::demo::{
    run_demo, run_history, run_recommend, run_restore, run_share, DecisionInputArgs, RestoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use snapchoice::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SnapChoice",
    about = "Score, rank, and share quick decisions from the command line",
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
    /// Score the given options and print the recommendation
    Recommend(DecisionInputArgs),
    /// Print a share link for the given options
    Share(DecisionInputArgs),
    /// Decode a share token and print the decision it carries
    Restore(RestoreArgs),
    /// List the most recent recommendations
    History,
    /// Walk through the built-in example scenario
    Demo,
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
        Command::Recommend(args) => run_recommend(args),
        Command::Share(args) => run_share(args),
        Command::Restore(args) => run_restore(args),
        Command::History => run_history(),
        Command::Demo => run_demo(),
    }
}
