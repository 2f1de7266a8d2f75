use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use zcalc::cli::Cli;
use zcalc::config::{Config, MAX_PRECISION};
use zcalc::logging::init_logging;
use zcalc::repl::{OutputStyle, Session};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("zcalc: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every expression given on the command line evaluated.
fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    let mut options = config.format_options();
    if let Some(precision) = cli.precision {
        options.precision = precision.min(MAX_PRECISION);
    }

    let style = if cli.json {
        OutputStyle::Json
    } else if cli.raw {
        OutputStyle::Raw
    } else {
        OutputStyle::Display
    };

    let mut session = Session::new(options, style, config.history_limit);

    if cli.expressions.is_empty() {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal().then_some(config.prompt.as_str());
        session.run(stdin.lock(), io::stdout().lock(), prompt)?;
        return Ok(true);
    }

    let mut stdout = io::stdout().lock();
    let mut all_ok = true;
    for expression in &cli.expressions {
        let result = session.evaluate(expression);
        all_ok &= result.is_success();
        writeln!(stdout, "{}", session.render(&result)?).context("Failed to write result")?;
    }
    Ok(all_ok)
}
