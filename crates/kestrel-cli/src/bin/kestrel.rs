#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use kestrel_cli::args::CliArgs;
use kestrel_cli::driver::{self, EXIT_FAILURE};
use kestrel_cli::tracing_config;

fn main() {
    // Installed only when KESTREL_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    // Usage errors exit with status 2 from clap.
    let args = CliArgs::parse();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn run(args: &CliArgs) -> Result<i32> {
    let outcome = driver::run(args)?;
    let color = !args.no_color && std::io::stdout().is_terminal();

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(driver::render_emit(&outcome, args)?.as_bytes())?;
    stdout.write_all(driver::render_diagnostics(&outcome, args, color)?.as_bytes())?;
    stdout.flush()?;

    Ok(outcome.exit_code())
}
