use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::{Commands, MissingSignals, RunArgs};

/// Top-level CLI parser for the `reproai` binary.
#[derive(Debug, Parser)]
#[command(
    name = "reproai",
    version,
    about = "Reproducibility and real-world-evidence reports for ML papers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging, list unavailable sections)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, MissingSignals};

    fn run_args(cli: Cli) -> super::RunArgs {
        match cli.command {
            Commands::Run(args) => args,
        }
    }

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_underscore_flags() {
        let cli = Cli::try_parse_from([
            "reproai",
            "run",
            "--paper_id",
            "W4390875033",
            "--github_id",
            "M-3LAB/awesome-industrial-anomaly-detection",
            "--output_dir",
            "out",
            "--github_token",
            "ghp_x",
        ])
        .expect("cli should parse");

        let args = run_args(cli);
        assert_eq!(args.paper_id, "W4390875033");
        assert_eq!(args.github_id, "M-3LAB/awesome-industrial-anomaly-detection");
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.github_token.as_deref(), Some("ghp_x"));
        assert!(!args.no_classifier);
        assert_eq!(args.missing_signals, None);
    }

    #[test]
    fn run_accepts_hyphenated_aliases_and_overrides() {
        let cli = Cli::try_parse_from([
            "reproai",
            "run",
            "--paper-id",
            "10.1000/xyz",
            "--github-id",
            "a/b",
            "--json-out",
            "r.json",
            "--html-out",
            "r.html",
            "--missing-signals",
            "zero",
            "--no-classifier",
        ])
        .expect("cli should parse");

        let args = run_args(cli);
        assert_eq!(args.json_out, Some(PathBuf::from("r.json")));
        assert_eq!(args.html_out, Some(PathBuf::from("r.html")));
        assert_eq!(args.missing_signals, Some(MissingSignals::Zero));
        assert!(args.no_classifier);
    }

    #[test]
    fn identifiers_are_required() {
        assert!(Cli::try_parse_from(["reproai", "run", "--paper_id", "W1"]).is_err());
        assert!(Cli::try_parse_from(["reproai", "run", "--github_id", "a/b"]).is_err());
    }

    #[test]
    fn missing_signals_rejects_unknown_policy() {
        let parsed = Cli::try_parse_from([
            "reproai",
            "run",
            "--paper_id",
            "W1",
            "--github_id",
            "a/b",
            "--missing-signals",
            "ignore",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reproai", "-v", "run", "--paper_id", "W1", "--github_id", "a/b",
        ])
        .expect("cli should parse");
        assert!(cli.global_flags().verbose);

        let cli = Cli::try_parse_from([
            "reproai", "run", "--paper_id", "W1", "--github_id", "a/b", "--quiet",
        ])
        .expect("cli should parse");
        assert!(cli.global_flags().quiet);
    }
}
