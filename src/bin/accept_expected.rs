//! Binary to generate/update .expected.py files from .block.json fixtures
//!
//! Usage:
//!   cargo run --bin accept_expected            # Update all
//!   cargo run --bin accept_expected -- zeros   # Update only fixtures matching "zeros"

use numpy_blockgen::{generate_block, BlockFile, Registry};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const BLOCK_SUFFIX: &str = ".block.json";

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
    let registry = Registry::default();

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(BLOCK_SUFFIX))
    {
        let path = entry.path();

        if let Some(ref f) = filter {
            if !path.to_string_lossy().contains(f) {
                skipped += 1;
                continue;
            }
        }

        if process_file(&registry, path) {
            updated += 1;
        }
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn process_file(registry: &Registry, path: &Path) -> bool {
    let block = match BlockFile::load(path) {
        Ok(block) => block,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return false;
        }
    };

    // Rejected states are recorded as an empty expectation
    let code = match generate_block(registry, &block) {
        Ok(code) => code.map(|c| c.into_string()).unwrap_or_default(),
        Err(e) => {
            eprintln!("ERROR: {:?}: {}", path, e);
            return false;
        }
    };

    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    let stem = name.strip_suffix(BLOCK_SUFFIX).unwrap_or(name);
    let expected_py = path.with_file_name(format!("{stem}.expected.py"));

    if let Err(e) = fs::write(&expected_py, &code) {
        eprintln!("Failed to write {:?}: {}", expected_py, e);
        return false;
    }
    println!("  wrote {}", expected_py.display());
    true
}
