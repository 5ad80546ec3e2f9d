use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-mirror",
    version,
    about = "Score a GitHub repository and suggest an improvement roadmap"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Extra config file, applied over the global and project files
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a repository and print the result
    Analyze(AnalyzeCommand),
    /// Download raw repository data as a replayable snapshot
    Fetch(FetchCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// `owner/name` or a GitHub URL
    pub identifier: String,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// Read raw data from a snapshot file instead of the GitHub API
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
    /// Rephrase roadmap steps with the configured refiner command
    #[arg(long)]
    pub refine: bool,
}

#[derive(Args)]
pub struct FetchCommand {
    /// `owner/name` or a GitHub URL
    pub identifier: String,
    /// Write the snapshot here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_accepts_snapshot_and_format() {
        let cli = Cli::try_parse_from([
            "repo-mirror",
            "-vv",
            "analyze",
            "octo/widget",
            "--format",
            "md",
            "--snapshot",
            "widget.json",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze(cmd) => {
                assert_eq!(cmd.identifier, "octo/widget");
                assert!(matches!(cmd.format, ReportFormat::Md));
                assert_eq!(cmd.snapshot, Some(PathBuf::from("widget.json")));
                assert!(!cmd.refine);
            }
            Commands::Fetch(_) => panic!("expected analyze"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["repo-mirror", "-q", "-v", "analyze", "a/b"]).is_err());
    }
}
