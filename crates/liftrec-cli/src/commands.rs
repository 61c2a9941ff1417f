use anyhow::Context;
use colored::Colorize;
use tracing::info;

use liftrec_ledger::{RecordValidator, WrappedBuilder};
use liftrec_source::DirectoryFeed;
use liftrec_types::Keyspace;

use crate::cli::*;
use crate::config::LiftrecConfig;
use crate::render;

/// Findings never change the exit status; only I/O and config errors do.
pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = LiftrecConfig::resolve(cli.config.as_deref())?;
    match cli.command {
        Command::Check(args) => cmd_check(args, &cli.format),
        Command::Wrapped(args) => cmd_wrapped(args, &cli.format, &config),
    }
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let feed = DirectoryFeed::new(&args.root);
    let keyspace = Keyspace::generate();
    let report = RecordValidator::check(&feed, &keyspace)
        .with_context(|| format!("checking records in {}", args.root.display()))?;
    info!(
        files = report.files_checked,
        warnings = report.warnings.len(),
        "check finished"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for line in render::check_lines(&report) {
                if line.starts_with(render::SUCCESS_PREFIX) {
                    println!("{}", line.green());
                } else {
                    println!("{}", line.yellow());
                }
            }
        }
    }
    Ok(())
}

fn cmd_wrapped(args: WrappedArgs, format: &OutputFormat, config: &LiftrecConfig) -> anyhow::Result<()> {
    let feed = DirectoryFeed::new(&args.root);
    let report = WrappedBuilder::build(&feed, args.year)
        .with_context(|| format!("building {} report from {}", args.year, args.root.display()))?;

    match format {
        OutputFormat::Json => {
            let view = render::WrappedView::new(&report, &config.report);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text => print!("{}", render::wrapped_text(&report, &config.report)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        use clap::Parser;
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn check_succeeds_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        run_command(cli(&["liftrec", "check", "--root", root])).unwrap();
    }

    #[test]
    fn findings_do_not_fail_the_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("2024.csv"),
            "M|Open|SBD|Wraps|90|S,200,Alice\nM|Open|SBD|Wraps|90|S,190,Bob\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();
        run_command(cli(&["liftrec", "check", "--root", root])).unwrap();
        run_command(cli(&["liftrec", "--format", "json", "check", "--root", root])).unwrap();
        run_command(cli(&["liftrec", "wrapped", "2024", "--root", root])).unwrap();
        run_command(cli(&["liftrec", "wrapped", "2024", "--format", "json", "--root", root]))
            .unwrap();
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let root = missing.to_str().unwrap();
        let err = run_command(cli(&["liftrec", "check", "--root", root])).unwrap_err();
        assert!(err.to_string().contains("checking records in"));
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("missing.toml");
        let root = dir.path().to_str().unwrap();
        let result = run_command(cli(&[
            "liftrec",
            "--config",
            config.to_str().unwrap(),
            "wrapped",
            "2024",
            "--root",
            root,
        ]));
        assert!(result.is_err());
    }
}
