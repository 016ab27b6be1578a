//! Zip archive format handler.

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::ProcessorError;
use crate::Result;

use super::ArchiveFormat;
use super::write_member;

/// Zip archive handler.
///
/// Extracts into `<archive>.unzip`. Full extraction preserves the
/// archive's internal directory structure; member-restricted extraction
/// streams each named entry's bytes to `<output_dir>/<member>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Zip;

impl ArchiveFormat for Zip {
    fn suffix(&self) -> Option<&'static str> {
        Some(".unzip")
    }

    fn unpack_all(&self, archive: &Path, output_dir: &Path) -> Result<()> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(file)
            .map_err(|e| from_zip(e, "failed to open zip archive"))?;
        zip.extract(output_dir)
            .map_err(|e| from_zip(e, "failed to extract zip archive"))
    }

    fn unpack_member(&self, archive: &Path, member: &str, output_dir: &Path) -> Result<()> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(file)
            .map_err(|e| from_zip(e, "failed to open zip archive"))?;

        let mut entry = match zip.by_name(member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ProcessorError::MemberNotFound {
                    member: member.to_string(),
                    archive: archive.to_path_buf(),
                });
            }
            Err(e) => return Err(from_zip(e, "failed to read zip member")),
        };

        write_member(&mut entry, output_dir, member)
    }
}

/// Maps zip-layer failures into the processor taxonomy, keeping I/O
/// errors unwrapped.
fn from_zip(error: ZipError, what: &str) -> ProcessorError {
    match error {
        ZipError::Io(e) => ProcessorError::Io(e),
        other => ProcessorError::InvalidArchive(format!("{what}: {other}")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_zip;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unpack_all_preserves_structure() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_test_zip(
            &archive,
            &[("x.csv", b"1,2,3\n"), ("nested/y.csv", b"4,5,6\n")],
        );

        let output_dir = temp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        Zip.unpack_all(&archive, &output_dir).unwrap();

        assert_eq!(fs::read(output_dir.join("x.csv")).unwrap(), b"1,2,3\n");
        assert_eq!(
            fs::read(output_dir.join("nested/y.csv")).unwrap(),
            b"4,5,6\n"
        );
    }

    #[test]
    fn test_unpack_member_writes_only_that_member() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_test_zip(&archive, &[("a.txt", b"alpha"), ("b.txt", b"beta")]);

        let output_dir = temp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        Zip.unpack_member(&archive, "a.txt", &output_dir).unwrap();

        assert_eq!(fs::read(output_dir.join("a.txt")).unwrap(), b"alpha");
        assert!(!output_dir.join("b.txt").exists());
    }

    #[test]
    fn test_unpack_missing_member() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        write_test_zip(&archive, &[("a.txt", b"alpha")]);

        let output_dir = temp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        let result = Zip.unpack_member(&archive, "missing.txt", &output_dir);

        match result {
            Err(ProcessorError::MemberNotFound { member, .. }) => {
                assert_eq!(member, "missing.txt");
            }
            other => panic!("expected MemberNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_archive_is_invalid() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("data.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let output_dir = temp.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        let result = Zip.unpack_all(&archive, &output_dir);
        assert!(matches!(result, Err(ProcessorError::InvalidArchive(_))));
    }
}
