use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    convert::{self, ConvertArgs},
    panel::{self, PanelArgs},
    promote::{self, PromoteArgs},
    summary::{self, SummaryArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "pame", about = "Inspect and convert stored simulation results")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Inputs / Primary / About / Static summary.
    Summary(SummaryArgs),
    /// Print the primary panel header or one variable's table.
    Panel(PanelArgs),
    /// Copy a nested results attribute into primary and save.
    Promote(PromoteArgs),
    /// Re-encode a store as binary or JSON.
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let result = match &cli.command {
        Command::Summary(args) => summary::run(args),
        Command::Panel(args) => panel::run(args),
        Command::Promote(args) => promote::run(args),
        Command::Convert(args) => convert::run(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
