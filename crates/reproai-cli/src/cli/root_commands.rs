use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use reproai_core::enums::MissingSignalPolicy;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build a reproducibility and real-world-evidence report for a paper and its repository.
    Run(RunArgs),
}

/// Arguments for `reproai run`.
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Paper identifier: OpenAlex work id, DOI, arXiv id, or one of their URLs
    #[arg(long = "paper_id", visible_alias = "paper-id", value_name = "ID")]
    pub paper_id: String,

    /// Repository identifier: owner/name or a github.com URL
    #[arg(long = "github_id", visible_alias = "github-id", value_name = "ID")]
    pub github_id: String,

    /// Directory for the JSON and HTML reports (default: reports)
    #[arg(long = "output_dir", visible_alias = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write the JSON report to this path instead
    #[arg(long = "json-out", value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    /// Write the HTML report to this path instead
    #[arg(long = "html-out", value_name = "PATH")]
    pub html_out: Option<PathBuf>,

    /// GitHub token (overrides GITHUB_TOKEN and config files)
    #[arg(long = "github_token", visible_alias = "github-token", value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// How the evidence score treats dimensions without signals
    #[arg(long = "missing-signals", value_enum)]
    pub missing_signals: Option<MissingSignals>,

    /// Skip the external classifier; class and rationale stay empty
    #[arg(long = "no-classifier")]
    pub no_classifier: bool,
}

/// CLI spelling of [`MissingSignalPolicy`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum MissingSignals {
    Renormalize,
    Zero,
}

impl From<MissingSignals> for MissingSignalPolicy {
    fn from(value: MissingSignals) -> Self {
        match value {
            MissingSignals::Renormalize => Self::Renormalize,
            MissingSignals::Zero => Self::Zero,
        }
    }
}
