//! HFR CLI - dashboard server and data tools for HF radar wave observations.

use clap::Parser;
use hfr_cmd::{Command, ServeArgs};

#[derive(Parser)]
#[command(
    name = "hfr-cli",
    version,
    about = "Rutgers HF radar wave viewer",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Options for `serve`, which runs when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(cli.serve));
    log::debug!("running {:?}", command);
    hfr_cmd::run(command).await
}
