//! # Command Line Interface
//!
//! The argument parser is in `cli.rs`, which is shared with the build script.
//! Subcommands are run from the `commands` module.

mod cli;

use env_logger;
use log::error;
use dfskit::commands;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let matches = cli::build_cli().get_matches();

    let res = match matches.subcommand() {
        Some(("catalog",cmd)) => commands::catalog::catalog(cmd),
        Some(("extract",cmd)) => commands::extract::extract(cmd),
        Some(("split",cmd)) => commands::split::split(cmd),
        Some(("tree",cmd)) => commands::catalog::tree(cmd),
        _ => Err(Box::new(commands::CommandError::InvalidCommand) as Box<dyn std::error::Error>)
    };
    if let Err(e) = &res {
        error!("{}",e);
    }
    res
}
