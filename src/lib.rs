use std::fs;
use std::path::{Path, PathBuf};

pub mod archive;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod extensions;
pub mod merge;
pub mod report;
pub mod walker;

use archive::ArchiveOptions;
use cli::{Commands, InputArgs, MergeArgs};
use config::{MergeConfig, unescape_separator};
use error::{MergeError, Result};
use merge::{InputFile, MergeResult};
use walker::CollectOptions;

pub use merge::merge;

/// The core logic of the application.
pub fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Merge(args) => run_merge(args),
        Commands::List(args) => run_list(args),
    }
}

/// The logic for the 'merge' command.
fn run_merge(args: MergeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let output_file = PathBuf::from(&config.output_filename);

    let files = load_inputs(&args.input, &config, Some(output_file.clone()))?;
    println!("{} files selected", files.len());

    let result = merge(&files, &config);
    for warning in &result.warnings {
        println!("Warning: {warning}");
    }

    if args.dry_run {
        println!("Dry run: {} was not written", output_file.display());
    } else {
        write_output(&result.text, &output_file)?;
        println!("Files have been merged and written to {}", output_file.display());
    }

    if args.preview {
        println!("--- Preview ---");
        println!("{}", report::preview(&result.text, config.preview_length));
        println!("---------------");
    }

    print!("{}", report::statistics(&result));
    Ok(())
}

/// The logic for the 'list' command.
fn run_list(args: InputArgs) -> anyhow::Result<()> {
    let files = load_inputs(&args, &MergeConfig::default(), None)?;
    println!("{} files selected", files.len());
    print!("{}", report::file_listing(&files));
    Ok(())
}

/// Layers the config file, then the command-line flags, over the defaults.
pub fn resolve_config(args: &MergeArgs) -> Result<MergeConfig> {
    let mut config = match &args.config {
        Some(path) => MergeConfig::load(path)?,
        None => MergeConfig::default(),
    };

    if let Some(separator) = &args.separator {
        config.separator = unescape_separator(separator);
    }
    if let Some(output_file) = &args.output_file {
        config.output_filename = output_file.display().to_string();
    }
    if let Some(max_bytes) = args.input.max_bytes {
        config.max_total_bytes = Some(max_bytes);
    }
    config.text_only |= args.input.text_only;

    config.validate()?;
    Ok(config)
}

/// Gathers the input files from exactly one source: paths or a ZIP archive.
pub fn load_inputs(
    input: &InputArgs,
    config: &MergeConfig,
    skip: Option<PathBuf>,
) -> Result<Vec<InputFile>> {
    let text_only = config.text_only || input.text_only;
    let max_total_bytes = input.max_bytes.or(config.max_total_bytes);

    match (&input.zip, input.paths.is_empty()) {
        (Some(_), false) => Err(MergeError::ConflictingInputSources),
        (None, true) => Err(MergeError::NoInputSource),
        (Some(zip_path), true) => {
            let options = ArchiveOptions {
                text_only,
                max_total_bytes,
            };
            Ok(archive::expand_zip_file(zip_path, &options)?)
        }
        (None, false) => {
            let options = CollectOptions {
                text_only,
                hidden: input.hidden,
                exclude: input.exclude.clone(),
                max_total_bytes,
                skip,
            };
            walker::collect_inputs(&input.paths, &options)
        }
    }
}

/// Expands a ZIP archive held in memory and merges its files.
pub fn merge_archive(bytes: &[u8], config: &MergeConfig) -> Result<MergeResult> {
    let options = ArchiveOptions {
        text_only: config.text_only,
        max_total_bytes: config.max_total_bytes,
    };
    let files = archive::expand_zip(bytes, &options)?;
    Ok(merge(&files, config))
}

/// Writes the merged text as UTF-8, replacing any existing file.
pub fn write_output(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text)?;
    Ok(())
}
