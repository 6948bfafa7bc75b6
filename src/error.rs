use std::io;
use thiserror::Error;

/// Why a single file could not be turned into text.
///
/// Never fatal to a merge: the engine skips the file and reports a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("content looks binary")]
    Binary,

    #[error("malformed {encoding} data")]
    Malformed { encoding: &'static str },
}

/// Failure to read an uploaded ZIP archive. Fatal for that input source.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("cannot open archive: {0}")]
    Open(#[source] zip::result::ZipError),

    #[error("cannot read archive entry {name}: {source}")]
    Entry {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("archive entry {name} is not accessible: {source}")]
    Index {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive contents exceed {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },

    #[error("I/O operation failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("inputs total {size} bytes (max: {max_size} bytes)")]
    InputTooLarge { size: u64, max_size: u64 },

    #[error("no input given: pass files, folders or --zip")]
    NoInputSource,

    #[error("pass either files and folders or --zip, not both")]
    ConflictingInputSources,

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("I/O operation failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot walk {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: ignore::Error,
    },
}

pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_messages_name_the_encoding() {
        let err = DecodeError::Malformed { encoding: "UTF-32LE" };
        assert_eq!(err.to_string(), "malformed UTF-32LE data");
        assert_eq!(DecodeError::Binary.to_string(), "content looks binary");
    }

    #[test]
    fn archive_errors_convert_into_merge_errors() {
        let err: MergeError = ArchiveError::TooLarge { max_bytes: 10 }.into();
        assert!(matches!(err, MergeError::Archive(ArchiveError::TooLarge { .. })));
        assert_eq!(err.to_string(), "archive contents exceed 10 bytes");
    }

    #[test]
    fn config_errors_read_like_the_others() {
        let err = MergeError::Config {
            message: "separator is empty".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: separator is empty");
    }
}
