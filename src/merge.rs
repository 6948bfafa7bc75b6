use crate::config::MergeConfig;
use crate::decoder;
use crate::error::DecodeError;
use log::{debug, warn};

/// One file to merge: a display name and its undecoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A file left out of the merged text because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeWarning {
    pub name: String,
    /// 1-based position of the file in the input list.
    pub ordinal: usize,
    pub reason: DecodeError,
}

impl std::fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "skipped file #{} {}: {}",
            self.ordinal, self.name, self.reason
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    pub text: String,
    pub file_count: usize,
    pub total_chars: usize,
    pub total_lines: usize,
    pub warnings: Vec<MergeWarning>,
}

/// The header line written above each merged file.
///
/// `ordinal` counts merged files from 1, so skipped files leave no gap.
pub fn header(ordinal: usize, name: &str) -> String {
    let title = format!("{ordinal}. {name}:");
    let underline = "-".repeat(title.chars().count());
    format!("\n{title}\n{underline}\n")
}

/// Number of lines in `text`: one more than its line breaks, zero when empty.
pub fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

/// Decodes every file in order and joins them under headers, with
/// `config.separator` between consecutive files.
///
/// Files that fail to decode are left out and reported in
/// [`MergeResult::warnings`]; they never abort the batch.
pub fn merge(files: &[InputFile], config: &MergeConfig) -> MergeResult {
    let mut decoded = Vec::with_capacity(files.len());
    let mut warnings = Vec::new();

    for (index, file) in files.iter().enumerate() {
        match decoder::decode(&file.bytes) {
            Ok(content) => {
                debug!("{} read as {}", file.name, content.encoding);
                if content.lossy {
                    warn!(
                        "{} contains bytes invalid in {}, replaced",
                        file.name, content.encoding
                    );
                }
                decoded.push((file.name.as_str(), content.text));
            }
            Err(reason) => {
                warn!("skipping {}: {}", file.name, reason);
                warnings.push(MergeWarning {
                    name: file.name.clone(),
                    ordinal: index + 1,
                    reason,
                });
            }
        }
    }

    let mut text = String::new();
    for (index, (name, content)) in decoded.iter().enumerate() {
        if index > 0 {
            text.push_str(&config.separator);
        }
        text.push_str(&header(index + 1, name));
        text.push_str(content);
    }

    MergeResult {
        file_count: decoded.len(),
        total_chars: text.chars().count(),
        total_lines: count_lines(&text),
        text,
        warnings,
    }
}
