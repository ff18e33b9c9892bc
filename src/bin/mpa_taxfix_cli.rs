use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use mpa_taxfix::{normalize_file, TableConfig};

const USAGE: &str = "Usage: mpa-taxfix combined_mpa.tsv > combined_mpa_fixed.tsv";

/// Fill missing ranks in a Kraken2 MPA table's #Classification column.
///
/// The fixed table is written to stdout; set RUST_LOG=info for a summary.
#[derive(Parser)]
#[command(name = "mpa-taxfix", version, about)]
struct Cli {
    /// Combined MPA table (tab-separated, optionally .gz)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Extra arguments are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

fn row_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&[
            "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
        ])
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Returns the input path, or writes the usage line to `out` when it is missing.
fn require_input<W: Write>(input: Option<PathBuf>, out: &mut W) -> Result<PathBuf, ExitCode> {
    match input {
        Some(path) => Ok(path),
        None => {
            // stdout may already be closed; the exit code still reports the failure
            let _ = writeln!(out, "{USAGE}");
            Err(ExitCode::FAILURE)
        }
    }
}

fn run(input: PathBuf) -> ExitCode {
    let spinner = row_spinner();
    spinner.set_message(format!("Normalizing {}...", input.display()));

    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    let result = normalize_file(&input, output, &TableConfig::default(), |rows| {
        if rows % 10_000 == 0 {
            spinner.set_message(format!("{rows} rows normalized"));
        }
    });

    match result {
        Ok(summary) => {
            spinner.finish_and_clear();
            log::debug!("done: {summary:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            spinner.abandon();
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if !cli.rest.is_empty() {
        log::debug!("ignoring extra arguments: {:?}", cli.rest);
    }
    match require_input(cli.input, &mut io::stdout()) {
        Ok(input) => run(input),
        Err(code) => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_prints_usage_and_fails() {
        let cli = Cli::try_parse_from(["mpa-taxfix"]).expect("no arguments must still parse");
        assert!(cli.input.is_none());

        let mut out = Vec::new();
        let code = require_input(cli.input, &mut out).expect_err("missing input must fail");
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(String::from_utf8(out).expect("utf8 usage"), format!("{USAGE}\n"));
    }

    #[test]
    fn test_input_given_writes_nothing() {
        let cli = Cli::try_parse_from(["mpa-taxfix", "combined_mpa.tsv"]).expect("parse failed");
        let mut out = Vec::new();
        let path = require_input(cli.input, &mut out).expect("input is present");
        assert_eq!(path, PathBuf::from("combined_mpa.tsv"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let cli = Cli::try_parse_from(["mpa-taxfix", "a.tsv", "b", "--extra"])
            .expect("extra arguments must not be rejected");
        assert_eq!(cli.input, Some(PathBuf::from("a.tsv")));
        assert_eq!(cli.rest, vec!["b".to_string(), "--extra".to_string()]);
    }
}
