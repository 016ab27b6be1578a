//! Property-based tests for processor path derivation and format
//! resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use proptest::prelude::*;
use tempfile::TempDir;
use unfurl_core::Action;
use unfurl_core::Decompress;
use unfurl_core::Method;
use unfurl_core::NullNotifier;
use unfurl_core::ProcessorError;
use unfurl_core::processor::derived_path;
use unfurl_core::test_utils::gzip_bytes;

const SUPPORTED_METHODS: [&str; 5] = ["auto", "lzma", "xz", "gzip", "bzip2"];
const RECOGNIZED_EXTENSIONS: [&str; 3] = ["xz", "gz", "bz2"];

proptest! {
    /// The derived output location is always input + suffix, wherever the
    /// input lives.
    #[test]
    fn prop_derived_path_appends_suffix(
        components in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..5)
    ) {
        // A bare `.` component is normalized away by Path, which would make
        // the parent comparison below vacuous.
        prop_assume!(components.iter().all(|c| c != "."));
        let input = PathBuf::from(components.join("/"));
        let derived = derived_path(&input, ".unzip");
        let derived_str = derived.to_string_lossy();

        prop_assert!(derived_str.ends_with(".unzip"));
        prop_assert_eq!(
            derived_str.strip_suffix(".unzip").expect("suffix present"),
            input.to_string_lossy()
        );
        prop_assert_eq!(derived.parent(), input.parent());
    }

    /// Names outside the supported set always fail method parsing, and
    /// the error carries the offending name.
    #[test]
    fn prop_unknown_method_names_rejected(name in "[a-z0-9]{1,10}") {
        prop_assume!(!SUPPORTED_METHODS.contains(&name.as_str()));

        match Method::from_str(&name) {
            Err(ProcessorError::UnknownMethod { method }) => {
                prop_assert_eq!(method, name);
            }
            other => prop_assert!(false, "expected UnknownMethod, got {:?}", other),
        }
    }

    /// Auto-detection rejects every extension outside the recognized set
    /// before touching the filesystem.
    #[test]
    fn prop_unrecognized_extensions_rejected(ext in "[a-z0-9]{1,6}") {
        prop_assume!(!RECOGNIZED_EXTENSIONS.contains(&ext.as_str()));

        let mut decompress = Decompress::auto().with_notifier(NullNotifier);
        let path = PathBuf::from(format!("no-such-file.{ext}"));
        let result = decompress.decompress(&path, Action::Download);

        match result {
            Err(ProcessorError::UnrecognizedExtension { extension }) => {
                prop_assert_eq!(extension, format!(".{ext}"));
            }
            other => prop_assert!(false, "expected UnrecognizedExtension, got {:?}", other),
        }
    }

    /// Gzip decompression inverts compression for arbitrary payloads.
    #[test]
    fn prop_gzip_decompression_round_trips(payload in prop::collection::vec(any::<u8>(), 0..4096)) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let source = temp.path().join("payload.gz");
        fs::write(&source, gzip_bytes(&payload)).expect("failed to write fixture");

        let mut decompress = Decompress::auto().with_notifier(NullNotifier);
        let output = decompress
            .decompress(&source, Action::Download)
            .expect("decompression failed");

        let expected = temp.path().join("payload.gz.decomp");
        prop_assert_eq!(output.as_path(), expected.as_path());
        prop_assert_eq!(fs::read(&output).expect("failed to read output"), payload);
    }
}

/// Non-proptest companion: the recognized-extension table resolves every
/// entry (kept outside the proptest block to pin the exact set).
#[test]
fn test_every_recognized_extension_resolves() {
    for ext in RECOGNIZED_EXTENSIONS {
        let mut decompress = Decompress::auto().with_notifier(NullNotifier);
        let path = PathBuf::from(format!("missing.{ext}"));
        // Resolution succeeds; the failure is the missing file itself.
        let result = decompress.decompress(&path, Action::Download);
        assert!(
            matches!(result, Err(ProcessorError::Io(_))),
            "extension {ext} should resolve and fail on I/O, got {result:?}"
        );
    }
}

#[test]
fn test_derived_path_is_deterministic() {
    let input = Path::new("cache/data.tar");
    assert_eq!(derived_path(input, ".untar"), derived_path(input, ".untar"));
}
