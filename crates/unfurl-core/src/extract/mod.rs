//! Archive extraction processors.
//!
//! An [`Extractor`] unpacks a fetched archive into a sibling directory and
//! reports every file that ends up inside it. The format-specific work
//! lives behind the [`ArchiveFormat`] seam; [`Zip`] and [`Tar`] are the
//! built-in handlers.

pub mod tar;
pub mod zip;

use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::Action;
use crate::FetchContext;
use crate::Notice;
use crate::Notifier;
use crate::Outcome;
use crate::Processor;
use crate::ProcessorError;
use crate::Result;
use crate::StderrNotifier;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::processor::derived_path;

pub use tar::Tar;
pub use zip::Zip;

/// A format-specific archive handler.
///
/// The built-in handlers form a closed set ([`Zip`], [`Tar`]); the trait
/// is the seam for callers that carry their own archive format. A handler
/// that does not override [`suffix`](ArchiveFormat::suffix) is unusable:
/// the extractor surfaces [`ProcessorError::UndefinedSuffix`] on the first
/// call.
pub trait ArchiveFormat: Send {
    /// Suffix appended to the archive path to derive the output
    /// directory.
    fn suffix(&self) -> Option<&'static str> {
        None
    }

    /// Unpacks the entire archive into `output_dir`, preserving the
    /// archive's internal directory structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read or a file cannot be
    /// written.
    fn unpack_all(&self, archive: &Path, output_dir: &Path) -> Result<()>;

    /// Streams the named member's bytes to `output_dir/<member>`.
    ///
    /// The member path is taken as given; the archive's internal
    /// directory structure is not reproduced around it.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::MemberNotFound`] if the archive has no
    /// such member, or an error if reading or writing fails.
    fn unpack_member(&self, archive: &Path, member: &str, output_dir: &Path) -> Result<()>;
}

/// Processor that unpacks a fetched archive and returns the extracted
/// file paths.
///
/// The output directory is the archive path plus the handler's suffix
/// (`data.zip` extracts into `data.zip.unzip`). It is treated as a cache:
/// extraction reruns when the fetch orchestrator reports a fresh download
/// or when the directory is missing, and is skipped otherwise.
///
/// The cache is keyed on the output directory's existence only. Calling
/// with one member subset and later with a different subset returns the
/// first subset's files unless the action forces a refresh; see
/// [`with_members`](Extractor::with_members).
///
/// # Examples
///
/// ```no_run
/// use unfurl_core::Action;
/// use unfurl_core::Extractor;
///
/// # fn main() -> unfurl_core::Result<()> {
/// let mut unzip = Extractor::zip();
/// let files = unzip.extract("data.zip".as_ref(), Action::Download)?;
/// println!("extracted {} files", files.len());
/// # Ok(())
/// # }
/// ```
pub struct Extractor {
    format: Box<dyn ArchiveFormat>,
    members: Option<Vec<String>>,
    notifier: Box<dyn Notifier>,
}

impl Extractor {
    /// Creates an extractor for the given archive format handler.
    #[must_use]
    pub fn new(format: impl ArchiveFormat + 'static) -> Self {
        Self {
            format: Box::new(format),
            members: None,
            notifier: Box::new(StderrNotifier),
        }
    }

    /// Creates an extractor for zip archives.
    #[must_use]
    pub fn zip() -> Self {
        Self::new(Zip)
    }

    /// Creates an extractor for tar archives, including gzip-, bzip2-,
    /// and xz-compressed tarballs.
    #[must_use]
    pub fn tar() -> Self {
        Self::new(Tar)
    }

    /// Restricts extraction to the named archive members.
    ///
    /// Each member is written to `<output_dir>/<member>`; the rest of the
    /// archive is left untouched. Note the on-disk cache does not record
    /// which members were extracted: a later call naming different
    /// members only takes effect when the action forces a refresh.
    #[must_use]
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the advisory notice channel.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Extracts the archive at `path` and returns the full paths of all
    /// regular files under the output directory.
    ///
    /// Extraction runs when `action` reports a fresh download or the
    /// output directory does not exist; otherwise the existing contents
    /// are re-enumerated without touching the archive. The returned order
    /// is filesystem-enumeration order and is not guaranteed to be sorted
    /// or stable across platforms.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler defines no suffix, a requested
    /// member is absent, or an underlying archive or filesystem operation
    /// fails.
    pub fn extract(&mut self, path: &Path, action: Action) -> Result<Vec<PathBuf>> {
        let suffix = self
            .format
            .suffix()
            .ok_or(ProcessorError::UndefinedSuffix)?;
        let output_dir = derived_path(path, suffix);

        if action.refreshes() || !output_dir.exists() {
            fs::create_dir_all(&output_dir)?;
            match &self.members {
                None => {
                    self.notifier.notify(&Notice::UnpackAll {
                        archive: path,
                        output_dir: &output_dir,
                    });
                    self.format.unpack_all(path, &output_dir)?;
                }
                Some(members) => {
                    for member in members {
                        self.notifier.notify(&Notice::UnpackMember {
                            member,
                            archive: path,
                            output_dir: &output_dir,
                        });
                        self.format.unpack_member(path, member, &output_dir)?;
                    }
                }
            }
        }

        collect_files(&output_dir)
    }
}

impl Processor for Extractor {
    fn process(
        &mut self,
        path: &Path,
        action: Action,
        _context: &FetchContext,
    ) -> Result<Outcome> {
        self.extract(path, action).map(Outcome::Files)
    }
}

/// Recursively enumerates every regular file under `dir`, depth-first.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Writes one member's byte stream to `output_dir/<member>`.
///
/// Parent directories are created when the member name contains path
/// separators. The reader is consumed to exhaustion; the output handle is
/// closed before returning on every path.
pub(crate) fn write_member<R: Read>(
    reader: &mut R,
    output_dir: &Path,
    member: &str,
) -> Result<()> {
    let dest = output_dir.join(member);
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut output = File::create(&dest)?;
    let mut buffer = CopyBuffer::new();
    copy_with_buffer(reader, &mut output, &mut buffer)?;
    Ok(())
}
