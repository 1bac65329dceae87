use std::fmt;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures at the edges of the crate. Generation itself never fails; a
/// rejected block is `Ok(None)`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("operation `{0}` is already registered")]
    DuplicateOperation(String),

    #[error("invalid block file {}: {source}", path.display())]
    InvalidBlock {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid block state: {0}")]
    InvalidState(#[from] serde_json::Error),

    #[error("failed to load the Python grammar: {0}")]
    Grammar(String),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Generated code that does not parse as Python
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Zero-based line in the generated code
    pub line: usize,
    /// Zero-based byte column
    pub col: usize,
    pub end_col: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, col: usize, end_col: usize) -> Self {
        Self {
            line,
            col,
            end_col,
            message: message.into(),
        }
    }

    /// Render the error with the offending line of `code`
    pub fn render(&self, code: &str, name: &str) -> String {
        self.render_inner(code, name, false)
    }

    /// Render the error with ANSI color codes
    pub fn render_color(&self, code: &str, name: &str) -> String {
        self.render_inner(code, name, true)
    }

    fn render_inner(&self, code: &str, name: &str, color: bool) -> String {
        let red = if color { "\x1b[1;31m" } else { "" };
        let dim = if color { "\x1b[2m" } else { "" };
        let reset = if color { "\x1b[0m" } else { "" };

        let mut output = String::new();
        output.push_str(&format!(" file: {}:{}:{}\n", name, self.line + 1, self.col + 1));
        output.push_str(&format!("{}error:{} {}\n", red, reset, self.message));

        if let Some(source_line) = code.lines().nth(self.line) {
            let line_num = self.line + 1;
            let width = format!("{}", line_num).len().max(2);
            output.push_str(&format!("{}{:>width$} |{}\n", dim, "", reset, width = width));
            output.push_str(&format!(
                "{}{:>width$} |{} {}\n",
                dim, line_num, reset, source_line,
                width = width
            ));

            let start = self.col.min(source_line.len());
            let len = self.end_col.saturating_sub(self.col).max(1);
            output.push_str(&format!(
                "{}{:>width$} |{} {}{}{}{}\n",
                dim, "", reset,
                " ".repeat(start), red, "^".repeat(len), reset,
                width = width
            ));
        }

        output
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line + 1, self.col + 1)
    }
}

impl std::error::Error for SyntaxError {}
