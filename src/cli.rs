use clap::{Args as ClapArgs, ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Merge text and code files, loose or from a ZIP archive, into a single
/// document with a header above each file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, color = ColorChoice::Always)]
pub struct Cli {
    /// The subcommand to execute (e.g., 'merge' or 'list').
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output. Use -v for basic info, -vv for detailed debugging.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Defines the available subcommands for the application.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Merge the selected files into one document.
    Merge(MergeArgs),
    /// Show the files that would be merged, with their sizes.
    List(InputArgs),
}

/// Where the files to merge come from. Shared by every subcommand.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct InputArgs {
    /// Files and folders to merge, in order. Folders are walked recursively.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Read the files from a ZIP archive instead of PATHs.
    #[arg(short = 'z', long, value_name = "ARCHIVE")]
    pub zip: Option<PathBuf>,

    /// Only pick up files with a known text or source-code extension.
    #[arg(short = 't', long)]
    pub text_only: bool,

    /// If set, hidden files and directories (those starting with a '.') will be included.
    #[arg(long)]
    pub hidden: bool,

    /// Glob patterns for files or folders to *exclude* while walking folders.
    /// Can be specified multiple times. Example: -x "*.log" -x "target/"
    #[arg(short = 'x', long, action = clap::ArgAction::Append, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Refuse inputs larger than this many bytes in total.
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<u64>,
}

/// Defines the arguments for the 'merge' subcommand.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// The path of the merged document. Defaults to `merged_files.txt`.
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Text inserted between files. Escapes such as \n and \t are expanded.
    #[arg(short, long)]
    pub separator: Option<String>,

    /// TOML file with default settings; command-line flags take precedence.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the beginning of the merged document.
    #[arg(short, long)]
    pub preview: bool,

    /// Merge and report, but do not write the output file.
    #[arg(long)]
    pub dry_run: bool,
}
