mod analyze;
mod cli;
mod config;
mod error;
mod extract;
mod identifier;
mod report;
mod source;
mod types;

use crate::analyze::refine::{CommandRefiner, Refiner};
use crate::error::MirrorError;
use crate::identifier::RepoId;
use crate::source::github::GithubSource;
use crate::source::snapshot::{write_snapshot, SnapshotSource};
use crate::source::RepoSource;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: cli::Cli) -> Result<i32, MirrorError> {
    let cwd = std::env::current_dir()?;
    let mut config = config::load_config(&cwd, cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            if cmd.refine {
                config.refine.enabled = true;
                config.validate()?;
            }
            let refiner = config
                .refine
                .enabled
                .then(|| CommandRefiner::new(&config.refine));
            let refiner = refiner.as_ref().map(|refiner| refiner as &dyn Refiner);

            let source: Box<dyn RepoSource> = match &cmd.snapshot {
                Some(path) => Box::new(SnapshotSource::new(path)),
                None => Box::new(GithubSource::new(&config.source)?),
            };
            let result = analyze::analyze(&cmd.identifier, source.as_ref(), &config, refiner)?;

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&result, output_format)?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Fetch(cmd) => {
            let id = RepoId::parse(&cmd.identifier)?;
            let raw = GithubSource::new(&config.source)?.fetch(&id)?;
            match &cmd.output {
                Some(path) => {
                    write_snapshot(path, &raw)?;
                    tracing::info!(repository = %id, path = %path.display(), "snapshot written");
                }
                None => println!("{}", serde_json::to_string_pretty(&raw)?),
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_caller_error() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
