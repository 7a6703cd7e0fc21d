//! This crate contains the source code for the binary of the maze solver mazewalk.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::process::ExitCode;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazewalk::{App, Cli};

fn main() -> Result<ExitCode> {
    install()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };
    cli.init_logging()?;

    let _ = App::new(cli.into()).run()?;

    Ok(ExitCode::SUCCESS)
}
