//! Compression codec support shared by the decompressor and the tar
//! reader.
//!
//! The same three codecs appear in two roles: as the target of explicit or
//! auto-detected single-stream decompression, and as the transparent
//! wrapper around compressed tarballs. Codec selection by file extension
//! lives with the decompressor; this module owns selection by leading
//! magic bytes and the construction of the buffered read streams.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

/// Gzip stream magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Bzip2 stream magic bytes ("BZh").
const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5a, 0x68];

/// XZ stream magic bytes.
const XZ_MAGIC: [u8; 6] = [0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

/// Number of leading bytes needed to identify any supported codec.
pub const MAGIC_LEN: usize = XZ_MAGIC.len();

/// A single-stream compression codec.
///
/// Covers the compression wrappers this subsystem understands: gzip,
/// bzip2, and xz (LZMA2). Each codec knows its conventional file
/// extension and how to open a buffered decompressing reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Gzip (deflate) stream.
    Gzip,
    /// Bzip2 (Burrows-Wheeler) stream.
    Bzip2,
    /// XZ (LZMA2) stream.
    Xz,
}

impl Codec {
    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "lzma",
        }
    }

    /// Returns the conventional file extension for this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use unfurl_core::compression::Codec;
    ///
    /// assert_eq!(Codec::Gzip.extension(), "gz");
    /// assert_eq!(Codec::Bzip2.extension(), "bz2");
    /// assert_eq!(Codec::Xz.extension(), "xz");
    /// ```
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
        }
    }

    /// Identifies a codec from the leading bytes of a stream.
    ///
    /// Returns `None` if the header matches no supported codec, which for
    /// tarball handling means the stream is treated as plain tar.
    ///
    /// # Examples
    ///
    /// ```
    /// use unfurl_core::compression::Codec;
    ///
    /// assert_eq!(Codec::sniff(&[0x1f, 0x8b, 0x08]), Some(Codec::Gzip));
    /// assert_eq!(Codec::sniff(b"ustar"), None);
    /// ```
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(&GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if header.starts_with(&BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else if header.starts_with(&XZ_MAGIC) {
            Some(Self::Xz)
        } else {
            None
        }
    }

    /// Opens a buffered decompressing reader over `file`.
    ///
    /// The returned stream yields the decompressed bytes; the file handle
    /// is owned by the stream and closed when it is dropped.
    #[must_use]
    pub fn reader(self, file: File) -> Box<dyn Read> {
        let buffered = BufReader::new(file);
        match self {
            Self::Gzip => Box::new(GzDecoder::new(buffered)),
            Self::Bzip2 => Box::new(BzDecoder::new(buffered)),
            Self::Xz => Box::new(XzDecoder::new(buffered)),
        }
    }
}
