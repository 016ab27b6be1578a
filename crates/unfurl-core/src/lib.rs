//! Post-download processing hooks for fetched data files.
//!
//! `unfurl-core` sits behind a data-retrieval library: after the fetch
//! orchestrator has downloaded (or confirmed) a local file, a configured
//! [`Processor`] optionally transforms it into a more directly usable
//! form by unpacking a zip or tar archive into a sibling directory, or
//! decompressing a single gzip/bzip2/xz stream into a sibling file, and
//! returns the resulting path(s).
//!
//! Outputs are cached next to the input (`data.zip` extracts into
//! `data.zip.unzip`, `values.csv.gz` decompresses into
//! `values.csv.gz.decomp`) and rebuilt only after a fresh download or
//! when missing, so repeated fetches of current files are cheap.
//!
//! # Examples
//!
//! ```no_run
//! use unfurl_core::Action;
//! use unfurl_core::Extractor;
//!
//! # fn main() -> unfurl_core::Result<()> {
//! let mut unzip = Extractor::zip().with_members(["x.csv"]);
//! let files = unzip.extract("data.zip".as_ref(), Action::Download)?;
//! println!("ready: {}", files[0].display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod compression;
pub mod copy;
pub mod decompress;
pub mod error;
pub mod extract;
pub mod notify;
pub mod processor;
pub mod test_utils;

// Re-export main API types
pub use decompress::Decompress;
pub use decompress::Method;
pub use error::ProcessorError;
pub use error::Result;
pub use extract::ArchiveFormat;
pub use extract::Extractor;
pub use extract::Tar;
pub use extract::Zip;
pub use notify::Notice;
pub use notify::Notifier;
pub use notify::NullNotifier;
pub use notify::StderrNotifier;
pub use processor::Action;
pub use processor::FetchContext;
pub use processor::Outcome;
pub use processor::Processor;
