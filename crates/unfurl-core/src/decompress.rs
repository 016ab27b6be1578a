//! Stream decompression processor.
//!
//! Decompresses a single-stream compressed file (`values.csv.gz`) into a
//! sibling file (`values.csv.gz.decomp`) so callers can open the data
//! directly, trading disk space for repeated decompression time.

use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use crate::Action;
use crate::FetchContext;
use crate::Notice;
use crate::Notifier;
use crate::Outcome;
use crate::Processor;
use crate::ProcessorError;
use crate::Result;
use crate::StderrNotifier;
use crate::compression::Codec;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::processor::derived_path;

/// Suffix appended to the input path to derive the decompressed output.
const DECOMP_SUFFIX: &str = ".decomp";

/// Suffix of the staging file an in-flight copy writes to.
const STAGING_SUFFIX: &str = ".part";

/// Compression method selection for [`Decompress`].
///
/// `Auto` resolves the codec from the input path's extension at call
/// time; the explicit variants pin it at construction. `Lzma` and `Xz`
/// name the same stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Resolve the codec from the file extension.
    Auto,
    /// LZMA2 stream (`.xz`).
    Lzma,
    /// Alias for [`Method::Lzma`] under its container name.
    Xz,
    /// Gzip stream (`.gz`).
    Gzip,
    /// Bzip2 stream (`.bz2`).
    Bzip2,
}

/// Read-only table mapping orchestrator-facing method names to methods.
const METHOD_TABLE: &[(&str, Method)] = &[
    ("lzma", Method::Lzma),
    ("xz", Method::Xz),
    ("gzip", Method::Gzip),
    ("bzip2", Method::Bzip2),
];

/// Read-only table mapping file extensions to codecs for auto-detection.
const EXTENSION_TABLE: &[(&str, Codec)] = &[
    ("xz", Codec::Xz),
    ("gz", Codec::Gzip),
    ("bz2", Codec::Bzip2),
];

impl Method {
    /// Returns the configured name of this method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Lzma => "lzma",
            Self::Xz => "xz",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
        }
    }

    /// Returns the codec this method pins, or `None` for `Auto`.
    #[must_use]
    pub const fn codec(self) -> Option<Codec> {
        match self {
            Self::Auto => None,
            Self::Lzma | Self::Xz => Some(Codec::Xz),
            Self::Gzip => Some(Codec::Gzip),
            Self::Bzip2 => Some(Codec::Bzip2),
        }
    }
}

impl FromStr for Method {
    type Err = ProcessorError;

    /// Parses a method name as supplied by fetch orchestrator
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::UnknownMethod`] for names outside the
    /// supported set.
    fn from_str(s: &str) -> Result<Self> {
        if s == "auto" {
            return Ok(Self::Auto);
        }
        METHOD_TABLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|&(_, method)| method)
            .ok_or_else(|| ProcessorError::UnknownMethod {
                method: s.to_string(),
            })
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Processor that decompresses a fetched single-stream compressed file.
///
/// The output is the input path plus `.decomp`, treated as a cache:
/// decompression reruns when the fetch orchestrator reports a fresh
/// download or the output file is missing, and is skipped otherwise.
///
/// The copy is staged through a sibling temporary file and renamed into
/// place on success, so a failure mid-copy never leaves a truncated
/// output behind to be mistaken for a cache hit.
///
/// # Examples
///
/// ```no_run
/// use unfurl_core::Action;
/// use unfurl_core::Decompress;
///
/// # fn main() -> unfurl_core::Result<()> {
/// let mut decompress = Decompress::auto();
/// let plain = decompress.decompress("values.csv.gz".as_ref(), Action::Download)?;
/// # Ok(())
/// # }
/// ```
pub struct Decompress {
    method: Method,
    notifier: Box<dyn Notifier>,
}

impl Decompress {
    /// Creates a decompressor pinned to the given method.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            notifier: Box::new(StderrNotifier),
        }
    }

    /// Creates a decompressor that resolves the codec from the file
    /// extension (`.xz`, `.gz`, or `.bz2`).
    #[must_use]
    pub fn auto() -> Self {
        Self::new(Method::Auto)
    }

    /// Replaces the advisory notice channel.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Returns the configured method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Decompresses the file at `path` and returns the output path.
    ///
    /// Decompression runs when `action` reports a fresh download or the
    /// output does not exist; otherwise the existing output path is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec cannot be resolved from the
    /// extension (under [`Method::Auto`]) or an underlying I/O operation
    /// fails.
    pub fn decompress(&mut self, path: &Path, action: Action) -> Result<PathBuf> {
        let output = derived_path(path, DECOMP_SUFFIX);

        if action.refreshes() || !output.exists() {
            let codec = self.resolve(path)?;
            self.notifier.notify(&Notice::Decompressing {
                source: path,
                output: &output,
                method: codec.name(),
            });

            let staging = derived_path(&output, STAGING_SUFFIX);
            if let Err(e) = copy_stream(codec, path, &staging) {
                let _ = fs::remove_file(&staging);
                return Err(e);
            }
            fs::rename(&staging, &output)?;
        }

        Ok(output)
    }

    /// Resolves the codec for `path` from the configured method.
    fn resolve(&self, path: &Path) -> Result<Codec> {
        if let Some(codec) = self.method.codec() {
            return Ok(codec);
        }

        let extension = path.extension().and_then(std::ffi::OsStr::to_str);
        extension
            .and_then(|ext| {
                EXTENSION_TABLE
                    .iter()
                    .find(|(known, _)| *known == ext)
                    .map(|&(_, codec)| codec)
            })
            .ok_or_else(|| ProcessorError::UnrecognizedExtension {
                extension: extension.map_or_else(String::new, |ext| format!(".{ext}")),
            })
    }
}

impl Processor for Decompress {
    fn process(
        &mut self,
        path: &Path,
        action: Action,
        _context: &FetchContext,
    ) -> Result<Outcome> {
        self.decompress(path, action).map(Outcome::File)
    }
}

/// Copies the decompressed byte stream of `source` into `staging`.
fn copy_stream(codec: Codec, source: &Path, staging: &Path) -> Result<u64> {
    let file = File::open(source)?;
    let mut reader = codec.reader(file);
    let mut writer = File::create(staging)?;
    let mut buffer = CopyBuffer::new();
    copy_with_buffer(&mut reader, &mut writer, &mut buffer)
}
