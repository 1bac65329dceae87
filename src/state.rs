use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single captured parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Null and blank text count as "not filled in"
    pub fn is_absent(&self) -> bool {
        match self {
            ParamValue::Null => true,
            ParamValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the value as a Python expression
    pub fn to_code(&self) -> String {
        let mut out = String::new();
        self.write_code(&mut out);
        out
    }

    /// Render the value as a shape argument: lists become tuples
    pub fn to_shape_code(&self) -> String {
        match self {
            ParamValue::List(items) if items.len() == 1 => {
                format!("({},)", items[0].to_code())
            }
            ParamValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ParamValue::to_code).collect();
                format!("({})", parts.join(", "))
            }
            other => other.to_code(),
        }
    }

    fn write_code(&self, out: &mut String) {
        match self {
            ParamValue::Null => out.push_str("None"),
            ParamValue::Bool(true) => out.push_str("True"),
            ParamValue::Bool(false) => out.push_str("False"),
            ParamValue::Number(number) => out.push_str(&number.to_string()),
            ParamValue::Text(text) => out.push_str(text.trim()),
            ParamValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_code(out);
                }
                out.push(']');
            }
            ParamValue::Map(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    push_python_str(out, key);
                    out.push_str(": ");
                    value.write_code(out);
                }
                out.push('}');
            }
        }
    }
}

/// Single-quoted Python string literal
fn push_python_str(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
}

impl From<&str> for ParamValue {
    fn from(text: &str) -> Self {
        ParamValue::Text(text.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(text: String) -> Self {
        ParamValue::Text(text)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Number(n.into())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Free-form `key=value` keyword argument added by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserOption {
    pub option_key: String,
    pub option_value: String,
}

impl UserOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            option_key: key.into(),
            option_value: value.into(),
        }
    }

    /// `key=value` when both halves are filled in
    pub fn to_keyword(&self) -> Option<String> {
        let key = self.option_key.trim();
        let value = self.option_value.trim();
        if key.is_empty() || value.is_empty() {
            None
        } else {
            Some(format!("{}={}", key, value))
        }
    }
}

/// Parameters captured by the UI for one code block.
///
/// Generators and validators only ever see a `&ParameterState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterState {
    pub params: BTreeMap<String, ParamValue>,
    pub return_variable: Option<String>,
    pub call_variable: Option<String>,
    pub is_return_variable: bool,
    pub indent_space_num: usize,
    pub dtype: Option<String>,
    pub prefix_code: String,
    pub postfix_code: String,
    pub user_option_list: Vec<UserOption>,
}

impl ParameterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_return_variable(mut self, name: impl Into<String>) -> Self {
        self.return_variable = Some(name.into());
        self
    }

    pub fn with_call_variable(mut self, name: impl Into<String>) -> Self {
        self.call_variable = Some(name.into());
        self
    }

    pub fn with_print_return(mut self, print: bool) -> Self {
        self.is_return_variable = print;
        self
    }

    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent_space_num = spaces;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = Some(dtype.into());
        self
    }

    pub fn with_user_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_option_list.push(UserOption::new(key, value));
        self
    }

    pub fn with_prefix_code(mut self, code: impl Into<String>) -> Self {
        self.prefix_code = code.into();
        self
    }

    pub fn with_postfix_code(mut self, code: impl Into<String>) -> Self {
        self.postfix_code = code.into();
        self
    }

    /// Trimmed return variable, `None` when blank
    pub fn return_var(&self) -> Option<&str> {
        non_blank(self.return_variable.as_deref())
    }

    /// Trimmed call variable, `None` when blank
    pub fn call_var(&self) -> Option<&str> {
        non_blank(self.call_variable.as_deref())
    }

    pub fn dtype(&self) -> Option<&str> {
        non_blank(self.dtype.as_deref())
    }

    /// A parameter that has actually been filled in
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name).filter(|value| !value.is_absent())
    }

    /// Raw text of a parameter, for echoing back into inputs
    pub fn param_text(&self, name: &str) -> String {
        self.param(name).map(ParamValue::to_code).unwrap_or_default()
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.indent_space_num)
    }

    /// `key=value` strings for every complete user option, in order
    pub fn user_keywords(&self) -> impl Iterator<Item = String> + '_ {
        self.user_option_list.iter().filter_map(UserOption::to_keyword)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "returnVariable": "y",
            "callVariable": " x ",
            "isReturnVariable": true,
            "indentSpaceNum": 4,
            "params": {"shape": [2, 3], "axis": null, "q": "50"},
            "userOptionList": [{"optionKey": "order", "optionValue": "'C'"}]
        }"#;
        let state: ParameterState = serde_json::from_str(json).unwrap();

        assert_eq!(state.return_var(), Some("y"));
        assert_eq!(state.call_var(), Some("x"));
        assert!(state.is_return_variable);
        assert_eq!(state.indent_space_num, 4);
        assert!(state.param("axis").is_none());
        assert_eq!(state.param_text("q"), "50");
        assert_eq!(state.user_keywords().collect::<Vec<_>>(), vec!["order='C'"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let state: ParameterState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ParameterState::default());
        assert_eq!(state.return_var(), None);
        assert_eq!(state.indent(), "");
    }

    #[test]
    fn test_blank_values_are_absent() {
        let state = ParameterState::new()
            .with_return_variable("   ")
            .with_param("start", "  ");
        assert_eq!(state.return_var(), None);
        assert!(state.param("start").is_none());
    }

    #[test]
    fn test_value_to_code() {
        let nested = ParamValue::from(vec![vec![1i64, 2], vec![3, 4]]);
        assert_eq!(nested.to_code(), "[[1, 2], [3, 4]]");
        assert_eq!(ParamValue::from(true).to_code(), "True");
        assert_eq!(ParamValue::from(" a + 1 ").to_code(), "a + 1");

        let mut map = BTreeMap::new();
        map.insert("it's".to_string(), ParamValue::from(1i64));
        assert_eq!(ParamValue::Map(map).to_code(), "{'it\\'s': 1}");
    }

    #[test]
    fn test_shape_code() {
        assert_eq!(ParamValue::from(vec![2i64, 3]).to_shape_code(), "(2, 3)");
        assert_eq!(ParamValue::from(vec![5i64]).to_shape_code(), "(5,)");
        assert_eq!(ParamValue::from("(4, 4)").to_shape_code(), "(4, 4)");
    }

    #[test]
    fn test_incomplete_user_option_skipped() {
        let state = ParameterState::new()
            .with_user_option("order", "")
            .with_user_option("", "1")
            .with_user_option("copy", "False");
        assert_eq!(state.user_keywords().collect::<Vec<_>>(), vec!["copy=False"]);
    }
}
