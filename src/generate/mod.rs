mod calls;

pub use calls::{ArrayLiteral, MethodCall, ModuleCall};

use crate::state::ParameterState;
use crate::template::GeneratedCode;

/// Generator trait - turns a block's state into Python source
pub trait Generator {
    fn make_code(&self, state: &ParameterState) -> GeneratedCode;
}

/// One slot in a generated call's argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    /// Positional parameter. Once an earlier positional is missing this is
    /// written as `name=value` instead.
    Positional(&'static str),
    /// Positional parameter whose list value is written as a tuple
    Shape(&'static str),
    /// Always written as `name=value`
    Keyword(&'static str),
    /// The block's call variable, positionally
    CallVariable,
    /// `dtype=<selected dtype>`
    Dtype,
}

/// Build the argument list for `args`, followed by the user's own keyword options.
///
/// `numpy` is the name numpy is imported as; dtypes are looked up on it.
pub fn build_args(args: &[Arg], state: &ParameterState, numpy: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(args.len() + state.user_option_list.len());
    let mut gap = false;

    for arg in args {
        match *arg {
            Arg::Positional(name) | Arg::Shape(name) => {
                let value = state.param(name).map(|value| match arg {
                    Arg::Shape(_) => value.to_shape_code(),
                    _ => value.to_code(),
                });
                match value {
                    Some(value) if gap => parts.push(format!("{}={}", name, value)),
                    Some(value) => parts.push(value),
                    None => gap = true,
                }
            }
            Arg::Keyword(name) => {
                if let Some(value) = state.param(name) {
                    parts.push(format!("{}={}", name, value.to_code()));
                }
            }
            Arg::CallVariable => match state.call_var() {
                Some(name) => parts.push(name.to_string()),
                None => gap = true,
            },
            Arg::Dtype => {
                if let Some(dtype) = state.dtype() {
                    parts.push(format!("dtype={}", qualify_dtype(dtype, numpy)));
                }
            }
        }
    }

    parts.extend(state.user_keywords());
    parts.join(", ")
}

/// Dtype name without its numpy module: `np.float32` -> `float32`
pub fn bare_dtype<'a>(dtype: &'a str, numpy: &str) -> &'a str {
    let dtype = dtype.trim();
    [numpy, "np", "numpy"]
        .iter()
        .copied()
        .find_map(|module| {
            dtype
                .strip_prefix(module)
                .and_then(|rest| rest.strip_prefix('.'))
        })
        .unwrap_or(dtype)
}

/// Dtype expression for generated code. Bare names are looked up on `numpy`;
/// string dtypes (`'f4'`) and names from other modules are kept as written.
pub fn qualify_dtype(dtype: &str, numpy: &str) -> String {
    let name = bare_dtype(dtype, numpy);
    if name.starts_with(['\'', '"']) || name.contains('.') {
        name.to_string()
    } else {
        format!("{}.{}", numpy, name)
    }
}

/// Wrap a statement with the block's prefix and postfix code. Both are
/// indented like the statement so the block stays one suite.
pub fn surround(state: &ParameterState, statement: String) -> GeneratedCode {
    let prefix = state.prefix_code.trim_end();
    let postfix = state.postfix_code.trim_end();
    if prefix.trim().is_empty() && postfix.trim().is_empty() {
        return GeneratedCode::new(statement);
    }

    let indent = state.indent();
    let mut code = String::with_capacity(prefix.len() + statement.len() + postfix.len() + 2);
    push_indented(&mut code, prefix, &indent);
    code.push_str(&statement);
    push_indented(&mut code, postfix, &indent);
    GeneratedCode::new(code)
}

/// Append each line of `text` under `indent`. Blank lines stay empty.
fn push_indented(out: &mut String, text: &str, indent: &str) {
    if text.trim().is_empty() {
        return;
    }
    for line in text.lines() {
        let line = line.trim_end();
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
}
