use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "liftrec",
    about = "liftrec — powerlifting record checks and year-end wrap-ups",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with report settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check record files for unknown keys or non-increasing records
    Check(CheckArgs),
    /// Year-end report of the records broken in one year
    Wrapped(WrappedArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Directory containing the CSV record files
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct WrappedArgs {
    /// Year to report on (e.g. 2024)
    pub year: i32,
    /// Directory containing the CSV event files
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_defaults_to_cwd() {
        let cli = Cli::try_parse_from(["liftrec", "check"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("."));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_check_root() {
        let cli = Cli::try_parse_from(["liftrec", "check", "--root", "/data/records"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.root, PathBuf::from("/data/records"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_wrapped() {
        let cli = Cli::try_parse_from(["liftrec", "wrapped", "2024", "--root", "records"]).unwrap();
        if let Command::Wrapped(args) = cli.command {
            assert_eq!(args.year, 2024);
            assert_eq!(args.root, PathBuf::from("records"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn wrapped_requires_year() {
        assert!(Cli::try_parse_from(["liftrec", "wrapped"]).is_err());
        assert!(Cli::try_parse_from(["liftrec", "wrapped", "last-year"]).is_err());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["liftrec", "--verbose", "check"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["liftrec", "wrapped", "2023", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::try_parse_from(["liftrec", "--config", "liftrec.toml", "check"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("liftrec.toml")));
    }
}
