//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use brgo::util::shell::ColorChoice;
use brgo::OutputLayout;

/// brgo - write Go with Portuguese keywords
#[derive(Parser)]
#[command(name = "brgo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a .brgo file or a directory of them into Go
    Translate(TranslateArgs),

    /// Translate and compile with the Go toolchain
    Build(BuildArgs),

    /// Translate, compile and run a program
    Run(RunArgs),

    /// Print the keyword table
    Keywords(KeywordsArgs),

    /// Show the Go toolchain brgo will use
    Toolchain,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct TranslateArgs {
    /// Source file or directory
    pub input: PathBuf,

    /// Output file (file input) or directory (directory input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory output layout: package, flat, mirror
    #[arg(long)]
    pub layout: Option<OutputLayout>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Source file or directory
    pub input: PathBuf,

    /// Path of the compiled executable
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for intermediate files
    #[arg(long, env = "BRGO_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Source file or directory
    pub input: PathBuf,

    /// Directory for intermediate files
    #[arg(long, env = "BRGO_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Arguments passed to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct KeywordsArgs {
    /// Print Go keywords with their Portuguese spelling
    #[arg(long)]
    pub reverse: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: CompletionShell,
}
