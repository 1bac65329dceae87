//! Validators gate code emission: a block whose names would produce broken
//! Python is rejected before any code is generated.

use crate::state::ParameterState;
use lazy_static::lazy_static;
use regex::Regex;

/// Python keywords. None of these can be assigned to.
const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await",
    "break", "class", "continue", "def", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is",
    "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

lazy_static! {
    static ref DECIMAL_LITERAL: Regex = Regex::new(
        r"^[+-]?(\d(_?\d)*(\.(\d(_?\d)*)?)?|\.\d(_?\d)*)([eE][+-]?\d(_?\d)*)?[jJ]?$"
    ).unwrap();
    static ref PREFIXED_LITERAL: Regex = Regex::new(
        r"^[+-]?0([xX](_?[0-9a-fA-F])+|[oO](_?[0-7])+|[bB](_?[01])+)$"
    ).unwrap();
}

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name.trim())
}

/// True when the text reads as a number rather than a name (`3`, `-1.5e3`, `0x1F`, `2j`)
pub fn is_numeric_literal_string(name: &str) -> bool {
    let name = name.trim();
    DECIMAL_LITERAL.is_match(name) || PREFIXED_LITERAL.is_match(name)
}

/// A name that can be assigned to or called on
pub fn is_valid_name(name: &str) -> bool {
    !is_reserved_word(name) && !is_numeric_literal_string(name)
}

/// Decides whether a block's state may be turned into code
pub trait Validator {
    fn validate(&self, state: &ParameterState) -> bool;
}

/// Identifier field checked by a [`FieldValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ReturnVariable,
    CallVariable,
    Param(&'static str),
}

/// Rejects the state when any listed field holds a reserved word or a number.
/// Fields that are not filled in pass.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator {
    pub fields: &'static [Field],
}

pub const RETURN_VARIABLE: FieldValidator = FieldValidator {
    fields: &[Field::ReturnVariable],
};

pub const CALL_AND_RETURN_VARIABLE: FieldValidator = FieldValidator {
    fields: &[Field::CallVariable, Field::ReturnVariable],
};

impl Validator for FieldValidator {
    fn validate(&self, state: &ParameterState) -> bool {
        self.fields.iter().all(|field| {
            let value = match field {
                Field::ReturnVariable => state.return_var().map(str::to_string),
                Field::CallVariable => state.call_var().map(str::to_string),
                Field::Param(name) => state.param(name).map(|v| v.to_code()),
            };
            value.map_or(true, |name| is_valid_name(&name))
        })
    }
}

/// Accepts every state
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl Validator for AlwaysValid {
    fn validate(&self, _state: &ParameterState) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word("class"));
        assert!(is_reserved_word(" None "));
        assert!(!is_reserved_word("klass"));
        assert!(!is_reserved_word("none"));
    }

    #[test]
    fn test_numeric_literals() {
        for text in ["0", "42", "-7", "+3.5", "1.", ".5", "1e10", "2.5E-3", "1_000", "0x1F", "0o17", "0b1010", "3j", "1.5J"] {
            assert!(is_numeric_literal_string(text), "{text} should be numeric");
        }
        for text in ["x", "x1", "_1", "1x", "1__0", "e10", "0x", "", "-", "1.2.3", "0b12"] {
            assert!(!is_numeric_literal_string(text), "{text} should not be numeric");
        }
    }

    #[test]
    fn test_return_variable_checked() {
        let state = ParameterState::new().with_return_variable("lambda");
        assert!(!RETURN_VARIABLE.validate(&state));

        let state = ParameterState::new().with_return_variable("123");
        assert!(!RETURN_VARIABLE.validate(&state));

        let state = ParameterState::new().with_return_variable("result");
        assert!(RETURN_VARIABLE.validate(&state));
    }

    #[test]
    fn test_absent_fields_pass() {
        let state = ParameterState::new();
        assert!(CALL_AND_RETURN_VARIABLE.validate(&state));
    }

    #[test]
    fn test_call_variable_checked() {
        let state = ParameterState::new()
            .with_call_variable("for")
            .with_return_variable("ok");
        assert!(!CALL_AND_RETURN_VARIABLE.validate(&state));
        assert!(RETURN_VARIABLE.validate(&state));
    }

    #[test]
    fn test_param_field_checked() {
        let validator = FieldValidator {
            fields: &[Field::Param("target")],
        };
        assert!(!validator.validate(&ParameterState::new().with_param("target", "0.5")));
        assert!(validator.validate(&ParameterState::new().with_param("target", "arr")));
    }

    #[test]
    fn test_always_valid() {
        let state = ParameterState::new().with_return_variable("if");
        assert!(AlwaysValid.validate(&state));
    }
}
