use crate::error::{MergeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_OUTPUT_FILENAME: &str = "merged_files.txt";
pub const DEFAULT_PREVIEW_LENGTH: usize = 1000;
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 100 * 1024 * 1024;

/// `"\n" + 80 '=' + "\n"`.
pub fn default_separator() -> String {
    format!("\n{}\n", "=".repeat(80))
}

/// Settings for one merge run.
///
/// Every field is optional in a config file; missing ones take the defaults.
///
/// ```toml
/// separator = "\n---\n"
/// output_filename = "bundle.txt"
/// max_total_bytes = 1048576
/// text_only = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Inserted between consecutive files, never after the last one.
    pub separator: String,
    pub output_filename: String,
    /// Upper bound on the summed size of all inputs. `None` disables it.
    pub max_total_bytes: Option<u64>,
    /// Only pick up files with a known text/code extension.
    pub text_only: bool,
    pub preview_length: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            max_total_bytes: Some(DEFAULT_MAX_TOTAL_BYTES),
            text_only: false,
            preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

impl MergeConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| MergeError::Config {
            message: e.to_string(),
        })
    }

    /// Loads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = fs::read_to_string(path).map_err(|e| MergeError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&toml_str)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_filename.trim().is_empty() {
            return Err(MergeError::Config {
                message: "output filename must not be empty".to_string(),
            });
        }
        if self.max_total_bytes == Some(0) {
            return Err(MergeError::Config {
                message: "max_total_bytes must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Expands `\n`, `\t`, `\r` and `\\` in a separator typed on the command line.
///
/// Unknown escapes are kept verbatim.
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
