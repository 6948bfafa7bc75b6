use crate::error::{MergeError, Result};
use crate::extensions::is_text_file;
use crate::merge::InputFile;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Controls how command-line paths become [`InputFile`]s.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Only pick up files with a known text/code extension.
    pub text_only: bool,
    /// Include hidden files and directories when walking folders.
    pub hidden: bool,
    /// Glob patterns, relative to each walked folder, to leave out.
    pub exclude: Vec<String>,
    pub max_total_bytes: Option<u64>,
    /// Never collect this file, typically the merge output itself.
    pub skip: Option<PathBuf>,
}

/// Reads every path in order. Plain files are taken as given; folders are
/// walked (honouring `.gitignore`) and their files added sorted by relative
/// path.
///
/// Fails with [`MergeError::InputTooLarge`] as soon as the running total
/// exceeds `max_total_bytes`, before anything is merged.
pub fn collect_inputs(paths: &[PathBuf], options: &CollectOptions) -> Result<Vec<InputFile>> {
    let skip = options.skip.as_ref().and_then(|p| fs::canonicalize(p).ok());
    let mut files = Vec::new();
    let mut total: u64 = 0;

    for path in paths {
        let found = if path.is_dir() {
            walk_folder(path, options)?
        } else {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            vec![(name, path.clone())]
        };

        for (name, file_path) in found {
            if options.text_only && !is_text_file(&file_path) {
                debug!("skipping non-text file {}", file_path.display());
                continue;
            }
            if let Some(skip) = &skip
                && fs::canonicalize(&file_path).ok().as_ref() == Some(skip)
            {
                debug!("skipping output file {}", file_path.display());
                continue;
            }

            total += fs::metadata(&file_path)?.len();
            if let Some(max_size) = options.max_total_bytes
                && total > max_size
            {
                return Err(MergeError::InputTooLarge {
                    size: total,
                    max_size,
                });
            }

            let bytes = fs::read(&file_path)?;
            files.push(InputFile::new(name, bytes));
        }
    }

    info!("collected {} files ({} bytes)", files.len(), total);
    Ok(files)
}

/// Lists the files under `root` as `(relative name, path)`, sorted by name.
fn walk_folder(root: &Path, options: &CollectOptions) -> Result<Vec<(String, PathBuf)>> {
    let walk_error = |source| MergeError::Walk {
        path: root.display().to_string(),
        source,
    };

    let mut override_builder = OverrideBuilder::new(root);
    for pattern in &options.exclude {
        // The "!" prefix turns the override into an ignore rule.
        override_builder
            .add(&format!("!{pattern}"))
            .map_err(walk_error)?;
    }
    let overrides = override_builder.build().map_err(walk_error)?;

    let walker = WalkBuilder::new(root)
        .hidden(!options.hidden)
        .require_git(false)
        .overrides(overrides)
        .build();

    let mut found = Vec::new();
    for result in walker {
        let entry = result.map_err(walk_error)?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.into_path();
        let name = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        found.push((name, path));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
