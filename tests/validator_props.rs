//! Property tests for identifier validation.
//!
//! Run with: cargo test --test validator_props

use numpy_blockgen::validate::{
    is_numeric_literal_string, is_reserved_word, is_valid_name, CALL_AND_RETURN_VARIABLE,
};
use numpy_blockgen::{ParameterState, Validator};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}".prop_filter("keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

proptest! {
    #[test]
    fn identifiers_are_valid(name in identifier()) {
        prop_assert!(is_valid_name(&name));
    }

    #[test]
    fn keywords_are_reserved(index in 0..KEYWORDS.len()) {
        prop_assert!(is_reserved_word(KEYWORDS[index]));
        prop_assert!(!is_valid_name(KEYWORDS[index]));
    }

    #[test]
    fn integers_are_numeric(n in any::<i64>()) {
        prop_assert!(is_numeric_literal_string(&n.to_string()));
    }

    #[test]
    fn floats_are_numeric(int in 0u32..100_000, frac in 0u32..100_000, exp in -30i32..30) {
        let text = format!("{int}.{frac}e{exp}");
        prop_assert!(is_numeric_literal_string(&text));
    }

    #[test]
    fn hex_literals_are_numeric(n in any::<u32>()) {
        let text = format!("0x{n:x}");
        prop_assert!(is_numeric_literal_string(&text));
    }

    #[test]
    fn validator_agrees_with_names(ret in identifier(), call in identifier()) {
        let state = ParameterState::new()
            .with_return_variable(ret.clone())
            .with_call_variable(call);
        prop_assert!(CALL_AND_RETURN_VARIABLE.validate(&state));

        let state = state.with_return_variable(format!(" {} ", KEYWORDS[ret.len() % KEYWORDS.len()]));
        prop_assert!(!CALL_AND_RETURN_VARIABLE.validate(&state));
    }
}
