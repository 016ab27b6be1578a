//! Tar archive format handler.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::{self};
use std::path::Path;

use crate::ProcessorError;
use crate::Result;
use crate::compression::Codec;
use crate::compression::MAGIC_LEN;

use super::ArchiveFormat;
use super::write_member;

/// Tar archive handler.
///
/// Extracts into `<archive>.untar`. The reader auto-detects gzip-,
/// bzip2-, and xz-compressed tarballs by their leading magic bytes, so
/// `data.tar`, `data.tar.gz`, `data.tar.bz2`, and `data.tar.xz` all work
/// without configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tar;

impl ArchiveFormat for Tar {
    fn suffix(&self) -> Option<&'static str> {
        Some(".untar")
    }

    fn unpack_all(&self, archive: &Path, output_dir: &Path) -> Result<()> {
        let mut tar = open_archive(archive)?;
        tar.unpack(output_dir)?;
        Ok(())
    }

    fn unpack_member(&self, archive: &Path, member: &str, output_dir: &Path) -> Result<()> {
        // Compressed tar streams cannot seek, so each member lookup scans
        // a fresh reader. The entry handle drops at scope end, releasing
        // the underlying stream even when the write fails.
        let mut tar = open_archive(archive)?;
        let entries = tar.entries().map_err(|e| {
            ProcessorError::InvalidArchive(format!("failed to read tar entries: {e}"))
        })?;

        for entry in entries {
            let mut entry = entry.map_err(|e| {
                ProcessorError::InvalidArchive(format!("failed to read tar entry: {e}"))
            })?;
            let path = entry
                .path()
                .map_err(|e| {
                    ProcessorError::InvalidArchive(format!("invalid tar entry path: {e}"))
                })?
                .into_owned();
            if path.as_path() == Path::new(member) {
                return write_member(&mut entry, output_dir, member);
            }
        }

        Err(ProcessorError::MemberNotFound {
            member: member.to_string(),
            archive: archive.to_path_buf(),
        })
    }
}

/// Opens a tar reader over `path`, transparently decompressing any
/// supported wrapper codec.
fn open_archive(path: &Path) -> Result<tar::Archive<Box<dyn Read>>> {
    let mut file = File::open(path)?;
    let header = read_magic(&mut file)?;
    file.seek(SeekFrom::Start(0))?;

    let reader: Box<dyn Read> = match Codec::sniff(&header) {
        Some(codec) => codec.reader(file),
        None => Box::new(BufReader::new(file)),
    };
    Ok(tar::Archive::new(reader))
}

/// Reads up to [`MAGIC_LEN`] leading bytes for codec sniffing.
fn read_magic(file: &mut File) -> io::Result<Vec<u8>> {
    let mut magic = [0u8; MAGIC_LEN];
    let mut filled = 0;
    while filled < magic.len() {
        match file.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(magic[..filled].to_vec())
}
