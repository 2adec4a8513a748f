use std::io;
use std::process::ExitCode;

use abpl_cli::AbplCli;
use abpl_lang::Interpreter;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<ExitCode> {
    let cli = AbplCli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_env("ABPL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let interpreter = Interpreter::english()?;
    let passed = abpl_cli::run(&cli, &interpreter, io::stdin().lock(), &mut io::stdout().lock())?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
