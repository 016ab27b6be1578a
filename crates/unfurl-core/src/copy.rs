//! Buffered stream copy with a reusable fixed-size buffer.
//!
//! Decompression and member extraction move whole byte streams to disk.
//! The copy here never holds more than one buffer's worth of decompressed
//! data in memory, and the buffer is reusable across copies within one
//! processor invocation.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ProcessorError;
use crate::Result;

/// Buffer size for stream copies (64KB, matching typical filesystem block
/// sizes).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable fixed-size copy buffer.
///
/// # Examples
///
/// ```no_run
/// use unfurl_core::copy::CopyBuffer;
/// use unfurl_core::copy::copy_with_buffer;
///
/// # fn main() -> unfurl_core::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = std::fs::File::open("input.bin")?;
/// let mut output = std::fs::File::create("output.bin")?;
/// let bytes = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8; COPY_BUFFER_SIZE]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0u8; COPY_BUFFER_SIZE]),
        }
    }

    /// Returns the buffer size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        COPY_BUFFER_SIZE
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies all bytes from `reader` to `writer` through the given buffer.
///
/// Returns the total number of bytes copied. Interrupted reads are
/// retried; any other failure is surfaced immediately with whatever bytes
/// were already written left in place for the caller to dispose of.
///
/// # Errors
///
/// Returns an error if reading from the source or writing to the
/// destination fails.
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf[..]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ProcessorError::Io(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(ProcessorError::Io)?;
        total += bytes_read as u64;
    }

    Ok(total)
}
