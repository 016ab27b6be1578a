//! Error types for post-download processing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ProcessorError`.
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Errors that can occur while processing a fetched file.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive format handler does not define an output suffix.
    #[error("archive format does not define an output suffix")]
    UndefinedSuffix,

    /// Extension not recognized during compression auto-detection.
    #[error("unrecognized extension '{extension}' (recognized: .xz, .gz, .bz2)")]
    UnrecognizedExtension {
        /// The extension that could not be mapped to a method.
        extension: String,
    },

    /// Compression method name not in the supported set.
    #[error("unknown compression method '{method}' (supported: lzma, xz, gzip, bzip2)")]
    UnknownMethod {
        /// The method name that was requested.
        method: String,
    },

    /// Requested member is absent from the archive.
    #[error("member '{member}' not found in archive '{archive}'")]
    MemberNotFound {
        /// Name of the missing member.
        member: String,
        /// Path of the archive that was searched.
        archive: PathBuf,
    },

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl ProcessorError {
    /// Returns `true` if this error reflects processor misconfiguration
    /// rather than a problem with the input file.
    ///
    /// Configuration errors surface on the first call and are never worth
    /// retrying with the same processor.
    ///
    /// # Examples
    ///
    /// ```
    /// use unfurl_core::ProcessorError;
    ///
    /// let err = ProcessorError::UndefinedSuffix;
    /// assert!(err.is_configuration());
    ///
    /// let err = ProcessorError::InvalidArchive("bad header".to_string());
    /// assert!(!err.is_configuration());
    /// ```
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::UndefinedSuffix | Self::UnknownMethod { .. })
    }

    /// Returns the name of the missing archive member, if applicable.
    #[must_use]
    pub fn missing_member(&self) -> Option<&str> {
        match self {
            Self::MemberNotFound { member, .. } => Some(member),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_suffix_display() {
        let err = ProcessorError::UndefinedSuffix;
        assert_eq!(
            err.to_string(),
            "archive format does not define an output suffix"
        );
    }

    #[test]
    fn test_unrecognized_extension_names_valid_set() {
        let err = ProcessorError::UnrecognizedExtension {
            extension: ".zip".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains(".zip"));
        assert!(display.contains(".xz"));
        assert!(display.contains(".gz"));
        assert!(display.contains(".bz2"));
    }

    #[test]
    fn test_unknown_method_names_valid_set() {
        let err = ProcessorError::UnknownMethod {
            method: "brotli".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("brotli"));
        assert!(display.contains("lzma"));
        assert!(display.contains("xz"));
        assert!(display.contains("gzip"));
        assert!(display.contains("bzip2"));
    }

    #[test]
    fn test_member_not_found_display() {
        let err = ProcessorError::MemberNotFound {
            member: "missing.txt".to_string(),
            archive: PathBuf::from("data.zip"),
        };
        let display = err.to_string();
        assert!(display.contains("missing.txt"));
        assert!(display.contains("data.zip"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProcessorError = io_err.into();
        assert!(matches!(err, ProcessorError::Io(_)));
    }

    #[test]
    fn test_is_configuration() {
        assert!(ProcessorError::UndefinedSuffix.is_configuration());
        assert!(
            ProcessorError::UnknownMethod {
                method: "zstd".into(),
            }
            .is_configuration()
        );

        assert!(
            !ProcessorError::UnrecognizedExtension {
                extension: ".csv".into(),
            }
            .is_configuration()
        );
        assert!(!ProcessorError::InvalidArchive("bad".into()).is_configuration());
    }

    #[test]
    fn test_missing_member_accessor() {
        let err = ProcessorError::MemberNotFound {
            member: "a.txt".to_string(),
            archive: PathBuf::from("data.tar"),
        };
        assert_eq!(err.missing_member(), Some("a.txt"));

        let err = ProcessorError::UndefinedSuffix;
        assert_eq!(err.missing_member(), None);
    }
}
