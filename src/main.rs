use clap::{Parser, Subcommand};
use numpy_blockgen::{
    check_python, BlockFile, Error, GeneratedCode, Options, ParameterState, Registry, SyntaxChecker,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const BLOCK_SUFFIX: &str = ".block.json";

#[derive(Parser)]
#[command(name = "npgen")]
#[command(about = "npgen - Python code from numpy block states")]
struct Cli {
    /// Name numpy is imported as
    #[arg(long, global = true, default_value = "np")]
    alias: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Python from .block.json files
    Generate {
        /// Path to a .block.json file or a directory of them
        #[arg(required_unless_present = "stdin")]
        path: Option<PathBuf>,

        /// Read a parameter state from stdin
        #[arg(long, requires = "op")]
        stdin: bool,

        /// Operation name, used with --stdin
        #[arg(long)]
        op: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Parse the generated code and fail on syntax errors
        #[arg(long)]
        check: bool,
    },
    /// Print the option page of an operation as JSON
    Render {
        /// Operation name
        #[arg(long)]
        op: String,

        /// Parameter state file (defaults to an empty state)
        #[arg(conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Read the parameter state from stdin
        #[arg(long)]
        stdin: bool,

        /// Page root to render under
        #[arg(long)]
        selector: Option<String>,

        /// Block id used for element ids
        #[arg(long, default_value = "0")]
        id: String,
    },
    /// List available operations
    List,
}

#[derive(Serialize)]
struct StdinOutput<'a> {
    operation: &'a str,
    valid: bool,
    code: Option<GeneratedCode>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Registry::standard(Options {
        numpy_alias: cli.alias,
        ..Options::default()
    });

    let result = match cli.command {
        Commands::Generate { path, stdin, op, json, check } => {
            if stdin {
                generate_stdin(&registry, op.as_deref().unwrap_or_default(), json, check)
            } else if let Some(path) = path {
                generate_path(&registry, &path, check)
            } else {
                eprintln!("Error: provide a file/directory or use --stdin");
                return ExitCode::FAILURE;
            }
        }
        Commands::Render { op, file, stdin, selector, id } => {
            render(&registry, &op, file.as_deref(), stdin, selector.as_deref(), &id)
        }
        Commands::List => {
            list(&registry);
            Ok(true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_stdin() -> Result<String, Error> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

fn generate_stdin(registry: &Registry, op: &str, json_output: bool, check: bool) -> Result<bool, Error> {
    let state: ParameterState = serde_json::from_str(&read_stdin()?)?;
    let code = registry.generate(op, &state)?;

    if let (true, Some(code)) = (check, &code) {
        check_python(code.as_str())?;
    }

    if json_output {
        let output = StdinOutput {
            operation: op,
            valid: code.is_some(),
            code,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(true);
    }

    match code {
        Some(code) => {
            print!("{code}");
            Ok(true)
        }
        None => {
            eprintln!("Error: state rejected by `{op}`");
            Ok(false)
        }
    }
}

fn generate_path(registry: &Registry, path: &Path, check: bool) -> Result<bool, Error> {
    let start = Instant::now();
    let mut checker = if check { Some(SyntaxChecker::new()?) } else { None };

    let files: Vec<PathBuf> = if path.is_file() {
        if !is_block_file(path) {
            eprintln!("Error: {} is not a {BLOCK_SUFFIX} file", path.display());
            return Ok(false);
        }
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| is_block_file(e.path()))
            .map(|e| e.into_path())
            .collect()
    } else {
        eprintln!("Error: {} does not exist", path.display());
        return Ok(false);
    };

    if files.is_empty() {
        eprintln!("No {BLOCK_SUFFIX} files found in {}", path.display());
        return Ok(false);
    }

    let mut generated = 0;
    let mut failed = 0;
    for file in &files {
        match generate_file(registry, file, checker.as_mut()) {
            Ok(true) => generated += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                print_failed(&file.display().to_string(), &e.to_string());
                failed += 1;
            }
        }
    }

    print_summary(generated, start.elapsed());
    Ok(failed == 0)
}

fn generate_file(registry: &Registry, path: &Path, checker: Option<&mut SyntaxChecker>) -> Result<bool, Error> {
    let block = BlockFile::load(path)?;
    let Some(code) = registry.generate(&block.operation, &block.state)? else {
        warn!(path = %path.display(), operation = %block.operation, "state rejected");
        print_failed(&path.display().to_string(), "state rejected");
        return Ok(false);
    };

    let output = output_path(path);
    if let Some(checker) = checker {
        match checker.check(code.as_str()) {
            Ok(()) => {}
            Err(Error::Syntax(e)) => {
                let name = output.display().to_string();
                if io::stderr().is_terminal() {
                    eprint!("{}", e.render_color(code.as_str(), &name));
                } else {
                    eprint!("{}", e.render(code.as_str(), &name));
                }
                return Ok(false);
            }
            Err(e) => return Err(e),
        }
    }

    fs::write(&output, code.as_str())?;
    debug!(path = %output.display(), "wrote generated code");
    print_generated(&output.display().to_string());
    Ok(true)
}

fn render(
    registry: &Registry,
    op: &str,
    file: Option<&Path>,
    stdin: bool,
    selector: Option<&str>,
    id: &str,
) -> Result<bool, Error> {
    let state: ParameterState = if stdin {
        serde_json::from_str(&read_stdin()?)?
    } else if let Some(file) = file {
        serde_json::from_str(&fs::read_to_string(file)?)?
    } else {
        ParameterState::default()
    };

    let fragment = registry.render(op, &state, selector, id)?;
    println!("{}", serde_json::to_string_pretty(&fragment)?);
    Ok(true)
}

fn list(registry: &Registry) {
    let mut by_category: BTreeMap<_, Vec<&str>> = BTreeMap::new();
    for operation in registry.operations() {
        by_category
            .entry(operation.category)
            .or_default()
            .push(operation.name.as_str());
    }

    for (category, names) in by_category {
        println!("{}:", category.as_str());
        for name in names {
            println!("  {name}");
        }
    }
}

fn is_block_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.ends_with(BLOCK_SUFFIX))
}

/// `cells/zeros.block.json` -> `cells/zeros.py`
fn output_path(path: &Path) -> PathBuf {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    let stem = name.strip_suffix(BLOCK_SUFFIX).unwrap_or(name);
    path.with_file_name(format!("{stem}.py"))
}

fn print_generated(path: &str) {
    if io::stderr().is_terminal() {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path);
    } else {
        eprintln!("  ✓ {}", path);
    }
}

fn print_failed(path: &str, reason: &str) {
    if io::stderr().is_terminal() {
        eprintln!("  \x1b[31m✗\x1b[0m {} ({})", path, reason);
    } else {
        eprintln!("  ✗ {} ({})", path, reason);
    }
}

fn print_summary(count: usize, elapsed: std::time::Duration) {
    let time_str = format_duration(elapsed);
    let files_word = if count == 1 { "file" } else { "files" };

    if io::stderr().is_terminal() {
        eprintln!("\n\x1b[1m✨ Generated {} {} in {}\x1b[0m", count, files_word, time_str);
    } else {
        eprintln!("\n✨ Generated {} {} in {}", count, files_word, time_str);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("cells/zeros.block.json")),
            PathBuf::from("cells/zeros.py")
        );
    }

    #[test]
    fn test_is_block_file() {
        assert!(is_block_file(Path::new("a/b.block.json")));
        assert!(!is_block_file(Path::new("a/b.json")));
        assert!(!is_block_file(Path::new("a/b.py")));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(std::time::Duration::from_micros(250)), "250μs");
        assert_eq!(format_duration(std::time::Duration::from_micros(2500)), "2.5ms");
    }
}
