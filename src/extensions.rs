use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Extensions (lowercase, without the dot) treated as text or source code.
pub static TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "txt", "xml", "java", "py", "js", "html", "css", "json", "md", "yml", "yaml", "ini",
        "cfg", "conf", "log", "sql", "c", "cpp", "h", "hpp", "cs", "php", "rb", "go", "rs", "sh",
        "bat", "ps1", "r", "scala", "kt", "swift", "dart", "tsx", "jsx", "vue", "svelte", "ts",
        "coffee", "less", "scss", "sass", "styl", "pug", "ejs", "hbs", "mustache",
    ]
    .into_iter()
    .collect()
});

/// Whether `name` carries a known text extension. Case-insensitive.
pub fn is_text_file(name: impl AsRef<Path>) -> bool {
    name.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(ext.to_ascii_lowercase().as_str()))
}
