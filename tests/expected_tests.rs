//! Compares generated code against the .expected.py next to each .block.json fixture
//!
//! Run with: cargo test --test expected_tests
//! Regenerate with: cargo run --bin accept_expected

use libtest_mimic::{Arguments, Failed, Trial};
use numpy_blockgen::{check_python, generate_block, BlockFile, Registry};
use std::fs;
use std::path::{Path, PathBuf};

const BLOCK_SUFFIX: &str = ".block.json";

fn collect_fixtures() -> Vec<PathBuf> {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("*{BLOCK_SUFFIX}"));
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map(|paths| paths.filter_map(Result::ok).collect())
        .unwrap_or_default();
    files.sort();
    files
}

fn fixture_name(path: &Path) -> String {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    name.strip_suffix(BLOCK_SUFFIX).unwrap_or(name).to_string()
}

fn run_fixture(path: &Path) -> Result<(), Failed> {
    let name = fixture_name(path);
    let expected_py = path.with_file_name(format!("{name}.expected.py"));
    let expected = fs::read_to_string(&expected_py)
        .map_err(|e| format!("missing expected file {}: {e}", expected_py.display()))?;

    let block = BlockFile::load(path).map_err(|e| e.to_string())?;
    let code = generate_block(&Registry::default(), &block)
        .map_err(|e| e.to_string())?
        .map(|code| code.into_string())
        .unwrap_or_default();

    if code != expected {
        return Err(format!(
            "output mismatch\n--- expected ---\n{expected}\n--- actual ---\n{code}"
        )
        .into());
    }

    // Indented blocks are checked as the body of a suite, and every line
    // has to sit at or below the block's indent
    let indent = block.state.indent();
    if let Some(line) = code.lines().find(|l| !l.trim().is_empty() && !l.starts_with(&indent)) {
        return Err(format!("line escapes the block indent: {line:?}").into());
    }
    let source = if indent.is_empty() {
        code
    } else {
        format!("if True:\n{code}")
    };
    if let Err(e) = check_python(&source) {
        return Err(format!("generated code does not parse: {e}").into());
    }

    Ok(())
}

fn main() {
    let args = Arguments::from_args();

    let trials = collect_fixtures()
        .into_iter()
        .map(|path| Trial::test(fixture_name(&path), move || run_fixture(&path)))
        .collect();

    libtest_mimic::run(&args, trials).exit();
}
