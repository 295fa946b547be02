//! CLI definitions for typewrite
//!
//! Lives in the library so the xtask man page generator can reach it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Typewriter text animations for the terminal
#[derive(Debug, Parser)]
#[command(name = "typewrite")]
#[command(version, about, long_about = None)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m
  typewrite play hello.toml               Type a script once
  typewrite play hello.toml --continuous --backspace
                                          Type, erase and loop until Ctrl-C
  typewrite check hello.toml --trace      Print every surface operation of one pass
  typewrite config show                   Print the effective configuration")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a script on the terminal in real time
    #[command(long_about = "Play a script on the terminal in real time.

Flags override the script's [options] and [timing] sections, which in turn
override the user configuration. Ctrl-C stops a looping session and
restores the cursor.")]
    Play(PlayArgs),

    /// Validate a script and print what one pass would do
    Check(CheckArgs),

    /// Inspect the user configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Script file (TOML)
    pub script: PathBuf,

    /// Loop back to the first fragment after the last one
    #[arg(long)]
    pub continuous: bool,

    /// Erase each fragment after typing it
    #[arg(long)]
    pub backspace: bool,

    /// Type every fragment on one shared line
    #[arg(long)]
    pub inline: bool,

    /// Milliseconds between typed characters
    #[arg(long, value_name = "MS")]
    pub typing_speed: Option<u64>,

    /// Milliseconds between erased characters
    #[arg(long, value_name = "MS")]
    pub backspace_speed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Script file (TOML)
    pub script: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Simulate one pass and print each surface operation
    #[arg(long, conflicts_with = "json")]
    pub trace: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}
