//! Advisory notices emitted while processing fetched files.
//!
//! Extraction and decompression announce what they are about to do and
//! where the output lands. The channel is injectable: processors default
//! to [`StderrNotifier`], callers that want the messages elsewhere (a
//! progress bar, a log collector, nothing at all) supply their own
//! [`Notifier`].

use std::path::Path;

/// A single advisory event describing a processing step.
///
/// Notices are informational and never fatal. `Notice` implements
/// [`Display`](std::fmt::Display) for the user-facing rendering.
#[derive(Debug, Clone, Copy)]
pub enum Notice<'a> {
    /// An entire archive is being unpacked into a directory.
    UnpackAll {
        /// Path of the archive being unpacked.
        archive: &'a Path,
        /// Directory receiving the extracted files.
        output_dir: &'a Path,
    },
    /// A single named member is being extracted from an archive.
    UnpackMember {
        /// Archive-internal name of the member.
        member: &'a str,
        /// Path of the archive being read.
        archive: &'a Path,
        /// Directory receiving the extracted member.
        output_dir: &'a Path,
    },
    /// A compressed file is being decompressed.
    Decompressing {
        /// Path of the compressed input.
        source: &'a Path,
        /// Path of the decompressed output.
        output: &'a Path,
        /// Name of the compression method in use.
        method: &'static str,
    },
}

impl std::fmt::Display for Notice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnpackAll {
                archive,
                output_dir,
            } => write!(
                f,
                "unpacking contents of '{}' to '{}'",
                archive.display(),
                output_dir.display()
            ),
            Self::UnpackMember {
                member,
                archive,
                output_dir,
            } => write!(
                f,
                "extracting '{}' from '{}' to '{}'",
                member,
                archive.display(),
                output_dir.display()
            ),
            Self::Decompressing {
                source,
                output,
                method,
            } => write!(
                f,
                "decompressing '{}' to '{}' using method '{}'",
                source.display(),
                output.display(),
                method
            ),
        }
    }
}

/// Callback trait for receiving advisory notices.
///
/// Exactly one notice is delivered per full extraction or decompression,
/// and one per member when extraction is member-restricted.
pub trait Notifier: Send {
    /// Called once for each advisory event.
    fn notify(&mut self, notice: &Notice<'_>);
}

/// Notifier that writes rendered notices to stderr.
///
/// This is the default channel, mirroring the warning stream fetch
/// orchestrators usually surface to end users.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notice: &Notice<'_>) {
        eprintln!("warning: {notice}");
    }
}

/// Notifier that discards all notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notice: &Notice<'_>) {}
}
