//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "zcalc", version)]
#[command(about = "Evaluate arithmetic expressions")]
pub struct Cli {
    /// Expressions to evaluate. Starts an interactive session when omitted.
    /// Put `--` before expressions that start with `-`.
    pub expressions: Vec<String>,

    /// Print each result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Print results without thousand separators
    #[arg(long)]
    pub raw: bool,

    /// Maximum number of decimal places
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expressions_and_flags() {
        let cli = Cli::try_parse_from(["zcalc", "--json", "-vv", "1+1", "2*3"]).ok();
        let cli = cli.as_ref();
        assert_eq!(
            cli.map(|c| c.expressions.clone()),
            Some(vec!["1+1".to_string(), "2*3".to_string()])
        );
        assert_eq!(cli.map(|c| c.json), Some(true));
        assert_eq!(cli.map(|c| c.verbose), Some(2));
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["zcalc"]).ok();
        assert_eq!(cli.map(|c| c.expressions.is_empty()), Some(true));
    }

    #[test]
    fn test_leading_minus_after_separator() {
        let cli = Cli::try_parse_from(["zcalc", "--", "-2^2"]).ok();
        assert_eq!(cli.map(|c| c.expressions), Some(vec!["-2^2".to_string()]));
    }

    #[test]
    fn test_precision_must_be_a_number() {
        assert!(Cli::try_parse_from(["zcalc", "--precision", "many"]).is_err());
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
