//! Human-readable views of inputs and merge results.

use crate::merge::{InputFile, MergeResult};

/// Groups digits in threes: `1234567` becomes `"1,234,567"`.
pub fn format_thousands(n: impl Into<u64>) -> String {
    let digits = n.into().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The first `limit` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Numbered list of the selected files with their sizes.
pub fn file_listing(files: &[InputFile]) -> String {
    files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            format!(
                "{}. {} ({} bytes)\n",
                i + 1,
                file.name,
                format_thousands(file.size())
            )
        })
        .collect()
}

pub fn statistics(result: &MergeResult) -> String {
    format!(
        "Files Merged: {}\nTotal Characters: {}\nTotal Lines: {}\n",
        result.file_count,
        format_thousands(result.total_chars as u64),
        format_thousands(result.total_lines as u64)
    )
}
