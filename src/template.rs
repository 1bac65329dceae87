use serde::Serialize;
use std::fmt;

/// Output of one generator call. Never modified after it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GeneratedCode(String);

impl GeneratedCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GeneratedCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Call shape a generator fills in before the statement is assembled.
///
/// `param_str` is the argument list for module calls and the receiver
/// expression for instance method calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTemplate {
    pub indent_space_num: usize,
    pub return_var: Option<String>,
    /// Module or object the function is looked up on
    pub call_var: Option<String>,
    pub function_name: String,
    pub param_str: String,
    /// Arguments of an instance method call
    pub method_args: String,
    pub is_print_return_var: bool,
}

impl CodeTemplate {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            ..Self::default()
        }
    }

    /// `{indent}[{ret} = ]{call_var}.{function}({params})`
    pub fn make_function_call(&self) -> String {
        let mut expr = String::new();
        if let Some(target) = non_blank(self.call_var.as_deref()) {
            expr.push_str(target);
            expr.push('.');
        }
        expr.push_str(&self.function_name);
        expr.push('(');
        expr.push_str(&self.param_str);
        expr.push(')');
        self.assemble(&expr)
    }

    /// `{indent}[{ret} = ]{receiver}.{method}({args})`
    pub fn make_instance_method_call(&self) -> String {
        let expr = format!(
            "{}.{}({})",
            self.param_str, self.function_name, self.method_args
        );
        self.assemble(&expr)
    }

    fn assemble(&self, expr: &str) -> String {
        let indent = " ".repeat(self.indent_space_num);
        match non_blank(self.return_var.as_deref()) {
            Some(ret) => {
                let mut code = format!("{indent}{ret} = {expr}\n");
                if self.is_print_return_var {
                    code.push_str(&format!("{indent}print({ret})\n"));
                }
                code
            }
            None => format!("{indent}{expr}\n"),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_method_call_with_assignment() {
        let template = CodeTemplate {
            indent_space_num: 4,
            return_var: Some("y".to_string()),
            function_name: "copy".to_string(),
            param_str: "x".to_string(),
            is_print_return_var: false,
            ..CodeTemplate::default()
        };
        assert_eq!(template.make_instance_method_call(), "    y = x.copy()\n");
    }

    #[test]
    fn test_function_call_without_return() {
        let template = CodeTemplate {
            call_var: Some("np".to_string()),
            param_str: "(2, 3)".to_string(),
            ..CodeTemplate::new("zeros")
        };
        assert_eq!(template.make_function_call(), "np.zeros((2, 3))\n");
    }

    #[test]
    fn test_function_call_without_target() {
        let template = CodeTemplate {
            param_str: "a".to_string(),
            ..CodeTemplate::new("len")
        };
        assert_eq!(template.make_function_call(), "len(a)\n");
    }

    #[test]
    fn test_print_return_var() {
        let template = CodeTemplate {
            indent_space_num: 2,
            return_var: Some("arr".to_string()),
            call_var: Some("np".to_string()),
            param_str: "3".to_string(),
            is_print_return_var: true,
            ..CodeTemplate::new("arange")
        };
        assert_eq!(
            template.make_function_call(),
            "  arr = np.arange(3)\n  print(arr)\n"
        );
    }

    #[test]
    fn test_print_ignored_without_return_var() {
        let template = CodeTemplate {
            return_var: Some(" ".to_string()),
            param_str: "x".to_string(),
            is_print_return_var: true,
            ..CodeTemplate::new("ravel")
        };
        assert_eq!(template.make_instance_method_call(), "x.ravel()\n");
    }
}
