//! Example: Post-processing fetched files with unfurl-core
//!
//! Run with: `cargo run --example process_fetch`

use unfurl_core::Action;
use unfurl_core::Decompress;
use unfurl_core::Extractor;
use unfurl_core::test_utils::gzip_bytes;
use unfurl_core::test_utils::write_test_zip;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: Unpack a freshly downloaded zip archive
    println!("Example 1: Archive extraction");

    // Stand-in for a file the fetch orchestrator just downloaded
    write_test_zip(
        "example_data.zip".as_ref(),
        &[("x.csv", b"city,pop\noslo,7\n"), ("docs/readme.txt", b"hi")],
    );

    let mut unzip = Extractor::zip();
    let files = unzip.extract("example_data.zip".as_ref(), Action::Download)?;
    println!("  Extracted {} files:", files.len());
    for file in &files {
        println!("    {}", file.display());
    }

    // A later fetch of the same current file reuses the cached output
    let again = unzip.extract("example_data.zip".as_ref(), Action::Fetch)?;
    println!("  Cache hit returned {} files", again.len());

    // Cleanup
    std::fs::remove_file("example_data.zip")?;
    std::fs::remove_dir_all("example_data.zip.unzip")?;

    // Example 2: Decompress a single gzip stream
    println!("\nExample 2: Stream decompression");
    std::fs::write("example_values.csv.gz", gzip_bytes(b"name,value\na,1\n"))?;

    let mut decompress = Decompress::auto();
    let plain = decompress.decompress("example_values.csv.gz".as_ref(), Action::Download)?;
    println!("  Decompressed to {}", plain.display());

    // Cleanup
    std::fs::remove_file("example_values.csv.gz")?;
    std::fs::remove_file(&plain)?;

    println!("\nExamples completed successfully!");
    Ok(())
}
