//! archcfg: resolve the ABI and backend feature toggles for a target.

mod commands;
mod config;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use config::{ArchcfgConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "archcfg", version, about = "Target ABI and feature resolution")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the ABI and feature list for a target and options
    Resolve {
        /// Target triple (e.g., loongarch64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Do not warn about options no resolver consumed
        #[arg(long)]
        no_unused_warnings: bool,
        /// Target-specific options, after `--` (e.g., -- -mabi=lp64s -mdouble-float)
        #[arg(last = true)]
        options: Vec<String>,
    },
    /// Inspect architecture profiles
    Arch {
        #[command(subcommand)]
        action: ArchAction,
    },
    /// Show how a target triple is parsed and its default ABI
    Triple {
        /// Target triple
        triple: String,
    },
}

#[derive(Subcommand)]
enum ArchAction {
    /// List architecture profiles
    List {
        /// Architecture family (default: loongarch)
        #[arg(long)]
        family: Option<String>,
    },
    /// Show the default features of a profile
    Describe {
        /// Profile name, as accepted by -march=
        name: String,
        /// Architecture family (default: loongarch)
        #[arg(long)]
        family: Option<String>,
    },
    /// Check a family's profile table
    Validate {
        /// Architecture family (default: loongarch)
        #[arg(long)]
        family: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8, configured: Option<LevelFilter>) {
    let level = match verbose {
        0 => configured.unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Fails only if a logger is already installed.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = match ArchcfgConfig::find_and_load(&cwd)? {
        Some((config, dir)) => {
            init_logging(cli.verbose, config.log_level()?);
            log::debug!("using {}", dir.join(config::CONFIG_FILE).display());
            config
        }
        None => {
            init_logging(cli.verbose, None);
            ArchcfgConfig::default()
        }
    };

    match cli.command {
        Commands::Resolve {
            target,
            format,
            no_unused_warnings,
            options,
        } => commands::resolve::run(
            &config,
            target.as_deref(),
            format,
            !no_unused_warnings,
            &options,
        ),

        Commands::Arch { action } => match action {
            ArchAction::List { family } => commands::arch::list(family.as_deref()),
            ArchAction::Describe { name, family } => {
                commands::arch::describe(&name, family.as_deref())
            }
            ArchAction::Validate { family } => commands::arch::validate(family.as_deref()),
        },

        Commands::Triple { triple } => commands::triple::describe(&triple),
    }
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
    fn parse_resolve_with_trailing_options() {
        let cli = Cli::try_parse_from([
            "archcfg",
            "resolve",
            "--target",
            "loongarch32-unknown-linux-gnu",
            "--format",
            "json",
            "--",
            "-mabi=ilp32s",
            "-mdouble-float",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve {
                target,
                format,
                options,
                no_unused_warnings,
            } => {
                assert_eq!(target.as_deref(), Some("loongarch32-unknown-linux-gnu"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(options, vec!["-mabi=ilp32s", "-mdouble-float"]);
                assert!(!no_unused_warnings);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["archcfg", "-vv", "arch", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
