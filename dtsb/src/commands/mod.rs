mod bundle;
mod check;
mod completions;

use std::path::PathBuf;

use bundle::BundleCommand;
use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use dtsbundle_manifest::{CleanPolicy, Overrides};
use eyre::Result;

use crate::ops::{self, LoadedConfig};

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dtsbundle_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dtsb")]
#[command(version)]
#[command(about = "Bundle TypeScript declaration files into a single .d.ts")]
pub(crate) struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bundle(cmd) => cmd.run().await,
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile declarations, merge them into one bundle and remove the rest
    Bundle(BundleCommand),

    /// Validate the configuration without touching the output directory
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where the configuration comes from, shared by `bundle` and `check`.
#[derive(Args, Debug, Default)]
pub(crate) struct ConfigArgs {
    /// Path to dtsb.toml (defaults to ./dtsb.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the TypeScript sources
    #[arg(long, value_name = "DIR")]
    pub in_dir: Option<PathBuf>,

    /// Directory the declarations and the bundle are written to
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Bundle base name (defaults to "types")
    #[arg(long, value_name = "NAME")]
    pub out_file_name: Option<String>,

    /// What to remove before compiling: out-dir, bundle or none
    #[arg(long, value_name = "POLICY")]
    pub clean: Option<CleanPolicy>,

    /// Compiler program to run instead of the configured one
    #[arg(long = "tsc", value_name = "PROGRAM")]
    pub program: Option<String>,
}

impl ConfigArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            in_dir: self.in_dir.clone(),
            out_dir: self.out_dir.clone(),
            out_file_name: self.out_file_name.clone(),
            clean: self.clean,
            program: self.program.clone(),
        }
    }

    /// Load dtsb.toml (if any) and apply the command-line overrides.
    pub fn load(&self) -> dtsbundle_manifest::Result<LoadedConfig> {
        ops::load_config(self.config.as_deref(), &self.overrides())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bundle_overrides() {
        let cli = Cli::try_parse_from([
            "dtsb",
            "bundle",
            "--in-dir",
            "src",
            "--out-dir",
            "dist",
            "--clean",
            "bundle",
            "--tsc",
            "tsc-next",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        let Commands::Bundle(cmd) = cli.command else {
            panic!("expected bundle command");
        };
        let overrides = cmd.config.overrides();
        assert_eq!(overrides.in_dir, Some(PathBuf::from("src")));
        assert_eq!(overrides.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(overrides.clean, Some(CleanPolicy::Bundle));
        assert_eq!(overrides.program.as_deref(), Some("tsc-next"));
    }

    #[test]
    fn test_rejects_unknown_clean_policy() {
        let result = Cli::try_parse_from(["dtsb", "check", "--clean", "everything"]);
        assert!(result.is_err());
    }
}
