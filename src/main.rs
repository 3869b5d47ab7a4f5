//! appbuild CLI - compile an application and bundle its assets
//!
//! Usage: appbuild [-n NAME[,NAME..]] -t <ID> [-e ENV] [-o DIR] [-a DIR] [-c] [-b]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use appbuild::presentation::Cli;

mod commands;
mod logging;
mod ui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    commands::build::cmd_build(&cli).await
}
