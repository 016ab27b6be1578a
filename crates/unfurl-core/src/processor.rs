//! The contract between the fetch orchestrator and post-processing hooks.
//!
//! After the orchestrator has produced a local file and classified how it
//! got there (freshly downloaded, re-downloaded, or already current), it
//! hands the path to a configured [`Processor`]. The processor decides
//! whether any work is needed and reports the resulting path(s).

use std::path::Path;
use std::path::PathBuf;

use crate::Result;

/// Classification of how the fetched file came to be on disk.
///
/// Supplied by the fetch orchestrator with every processor invocation.
/// `Download` and `Update` signal that the source file was just obtained
/// and any derived output is stale; `Fetch` means the file was already
/// present and current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// File didn't exist locally and was downloaded.
    Download,
    /// Local file was outdated and was re-downloaded.
    Update,
    /// File exists and is current, so it wasn't downloaded.
    Fetch,
}

impl Action {
    /// Returns `true` if the source file was just obtained and cached
    /// outputs must be rebuilt.
    #[must_use]
    pub const fn refreshes(self) -> bool {
        matches!(self, Self::Download | Self::Update)
    }

    /// Returns the wire name used by fetch orchestrators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Update => "update",
            Self::Fetch => "fetch",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle describing the fetch that produced the file.
///
/// Processors receive this for signature compatibility with the
/// orchestrator; the built-in processors do not read from it.
#[derive(Debug, Clone, Default)]
pub struct FetchContext {
    /// Local directory the fetched file lives in.
    pub cache_dir: Option<PathBuf>,
    /// Source URL the file was retrieved from.
    pub url: Option<String>,
}

/// Path(s) produced by a processor invocation.
///
/// Extractors report every file that came out of the archive; the stream
/// decompressor reports the single decompressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A single derived file (decompression).
    File(PathBuf),
    /// All files under the derived output directory (extraction).
    Files(Vec<PathBuf>),
}

impl Outcome {
    /// Consumes the outcome and returns the contained paths.
    #[must_use]
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            Self::File(path) => vec![path],
            Self::Files(paths) => paths,
        }
    }

    /// Returns the single derived file, if this outcome holds one.
    #[must_use]
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Files(_) => None,
        }
    }

    /// Returns the number of paths in the outcome.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::File(_) => 1,
            Self::Files(paths) => paths.len(),
        }
    }

    /// Returns `true` if the outcome contains no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A configured, callable post-processing hook.
///
/// Implementations are immutable after construction and stateless across
/// invocations except for what they read from the filesystem. The fetch
/// orchestrator invokes [`process`](Processor::process) after download and
/// verification have finished, and hands the returned path(s) to the
/// caller in place of the original file.
///
/// Concurrent invocations on the same input path are unsafe: output
/// directory creation and extraction are not atomic, so callers must
/// serialize fetches of the same path.
pub trait Processor {
    /// Processes the fetched file at `path` and returns the derived
    /// path(s).
    ///
    /// # Errors
    ///
    /// Returns an error if the processor is misconfigured, the file's
    /// format cannot be resolved, a requested archive member is absent,
    /// or an underlying I/O or archive operation fails.
    fn process(&mut self, path: &Path, action: Action, context: &FetchContext)
    -> Result<Outcome>;
}

/// Derives the on-disk output location for a processed file.
///
/// The derived path is the input path with `suffix` byte-appended to its
/// final component: `data.zip` with `.unzip` maps to `data.zip.unzip`.
/// This is a pure function of its inputs, so callers can predict cache
/// locations without invoking a processor.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unfurl_core::processor::derived_path;
///
/// let out = derived_path(Path::new("cache/data.zip"), ".unzip");
/// assert_eq!(out, Path::new("cache/data.zip.unzip"));
/// ```
#[must_use]
pub fn derived_path(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
