//! Command-line front end: validates case files and prints what is wrong
//! with them.
//!
//! Exit status is 0 when every case passes (or failures are not fatal),
//! 1 when some case has errors, and 2 when a case or config can't be
//! loaded.

mod check;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tilecase_core::CaseRule;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tilecase", version, about = "Validate 2D grid cases")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate case files, or every case file in a directory.
    Check(CheckArgs),
    /// List the validation rules.
    Rules,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Case files (.ron, .json, .toml) or directories containing them.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Validator configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run only this rule; repeatable. Overrides the config file.
    #[arg(long = "rule", value_name = "NAME")]
    rules: Vec<CaseRule>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit 0 even when a case has errors.
    #[arg(long)]
    no_fail: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Rules => {
            for rule in CaseRule::all() {
                println!("{rule}");
            }
            ExitCode::SUCCESS
        }
        Command::Check(args) => match check::run(&args) {
            Ok(outcome) => {
                match args.format {
                    OutputFormat::Text => print!("{}", outcome.render_text()),
                    OutputFormat::Json => match outcome.render_json() {
                        Ok(json) => println!("{json}"),
                        Err(err) => {
                            tracing::error!("{err:#}");
                            return ExitCode::from(2);
                        }
                    },
                }
                if outcome.failed() {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(err) => {
                tracing::error!("{err:#}");
                ExitCode::from(2)
            }
        },
    }
}
