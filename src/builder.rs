use std::fmt::{self, Display, Write};

/// Line buffer used to assemble generated code and page markup.
///
/// Lines are only ever appended; nothing already written is touched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add text without a trailing newline
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Add text as its own line
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self.buf.push('\n');
        self
    }

    /// Replace `{0}`, `{1}`, ... in `template` with `args` and add the result as a line
    pub fn append_format_line(&mut self, template: &str, args: &[&dyn Display]) -> &mut Self {
        format_placeholders(&mut self.buf, template, args);
        self.buf.push('\n');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Display for StringBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

/// Positional placeholder substitution written straight into `out`.
///
/// A placeholder is `{` digits `}`. An index with no matching argument, or a
/// brace sequence that is not a placeholder, is copied through unchanged.
pub fn format_placeholders(out: &mut String, template: &str, args: &[&dyn Display]) {
    let bytes = template.as_bytes();
    let mut copied_to = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }

        let digits_start = i + 1;
        let mut j = digits_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }

        let is_placeholder = j > digits_start && j < bytes.len() && bytes[j] == b'}';
        let arg = if is_placeholder {
            template[digits_start..j]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
        } else {
            None
        };

        match arg {
            Some(arg) => {
                out.push_str(&template[copied_to..i]);
                // Writing into a String cannot fail
                let _ = write!(out, "{}", arg);
                i = j + 1;
                copied_to = i;
            }
            None => i += 1,
        }
    }

    out.push_str(&template[copied_to..]);
}
