//! Noun CLI - evaluate native gates from the command line or a REPL
//!
//! This is a thin wrapper around noun-core that builds the executable.
//! Embedders can register their own native gates on an `Interpreter` and
//! drive it the same way.

use clap::Parser;
use noun_core::{Interpreter, RuntimeError, execute_string};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "repl")]
mod repl;

#[derive(Debug, Parser)]
#[command(name = "noun", version, about = "Evaluate native noun gates")]
struct Cli {
    /// Log filter, e.g. `noun_core=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long)]
    log: Option<String>,

    /// Expression to evaluate once, e.g. `sub 5 3`; starts the REPL when omitted
    expr: Vec<String>,
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Fatal exit bails get their own status so scripts can tell them from failures
fn exit_status(err: &RuntimeError) -> u8 {
    match err {
        RuntimeError::Bail(bail) if bail.is_fatal() => 2,
        _ => 1,
    }
}

fn report(err: &RuntimeError) {
    match err {
        RuntimeError::Bail(bail) => eprintln!("error: {}", bail.label()),
        other => eprintln!("error: {}", other),
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    let interp = Interpreter::new();

    if cli.expr.is_empty() {
        #[cfg(feature = "repl")]
        {
            repl::run_repl(&interp)?;
            return Ok(ExitCode::SUCCESS);
        }
        #[cfg(not(feature = "repl"))]
        {
            eprintln!("error: no expression given and the REPL is not built in");
            return Ok(ExitCode::from(1));
        }
    }

    let code = cli.expr.join(" ");
    tracing::debug!(code = %code, "evaluating expression");
    match execute_string(&code, &interp) {
        Ok(product) => {
            println!("{}", product);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report(&err);
            Ok(ExitCode::from(exit_status(&err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noun_core::Bail;

    #[test]
    fn test_cli_collects_expression() {
        let cli = Cli::try_parse_from(["noun", "--log", "debug", "sub", "5", "3"]).unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        assert_eq!(cli.expr.join(" "), "sub 5 3");

        let cli = Cli::try_parse_from(["noun"]).unwrap();
        assert!(cli.expr.is_empty());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&RuntimeError::Bail(Bail::Exit)), 2);
        assert_eq!(exit_status(&RuntimeError::Bail(Bail::Fail("subtract-underflow"))), 1);
        assert_eq!(exit_status(&RuntimeError::UndefinedWord("add".into())), 1);
    }
}
