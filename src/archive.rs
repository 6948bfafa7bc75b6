//! Expands a ZIP archive into [`InputFile`]s.
//!
//! The archive is read entirely in memory, in central-directory order. Any
//! entry that cannot be read fails the whole archive.

use crate::error::ArchiveError;
use crate::extensions::is_text_file;
use crate::merge::InputFile;
use log::{debug, info};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Keep only entries with a known text/code extension.
    pub text_only: bool,
    /// Upper bound on the summed uncompressed size of the kept entries,
    /// measured on the extracted data.
    pub max_total_bytes: Option<u64>,
}

/// Reads every file entry of the ZIP held in `bytes`, skipping directories.
pub fn expand_zip(bytes: &[u8], options: &ArchiveOptions) -> Result<Vec<InputFile>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::Open)?;
    let mut files = Vec::new();
    let mut total: u64 = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|source| ArchiveError::Index {
            name: format!("#{index}"),
            source,
        })?;

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if options.text_only && !is_text_file(&name) {
            debug!("skipping non-text archive entry {name}");
            continue;
        }

        // Headers can understate sizes, so the limit applies to bytes read.
        let mut contents = Vec::new();
        let read = match options.max_total_bytes {
            Some(max_bytes) => {
                let remaining = max_bytes.saturating_sub(total);
                entry
                    .by_ref()
                    .take(remaining.saturating_add(1))
                    .read_to_end(&mut contents)
            }
            None => entry.read_to_end(&mut contents),
        };
        read.map_err(|source| ArchiveError::Entry {
            name: name.clone(),
            source,
        })?;

        total = total.saturating_add(contents.len() as u64);
        check_limit(total, options.max_total_bytes)?;

        debug!("extracted {} ({} bytes)", name, contents.len());
        files.push(InputFile::new(name, contents));
    }

    info!("archive yielded {} files", files.len());
    Ok(files)
}

/// Reads a ZIP archive from disk and expands it.
pub fn expand_zip_file(path: &Path, options: &ArchiveOptions) -> Result<Vec<InputFile>, ArchiveError> {
    let bytes = fs::read(path)?;
    check_limit(bytes.len() as u64, options.max_total_bytes)?;
    expand_zip(&bytes, options)
}

fn check_limit(total: u64, max_total_bytes: Option<u64>) -> Result<(), ArchiveError> {
    match max_total_bytes {
        Some(max_bytes) if total > max_bytes => Err(ArchiveError::TooLarge { max_bytes }),
        _ => Ok(()),
    }
}
