use crate::error::{Error, Result, SyntaxError};
use tree_sitter::{Node, Parser};

/// Parses generated code with tree-sitter to catch blocks that would not run.
pub struct SyntaxChecker {
    parser: Parser,
}

impl SyntaxChecker {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| Error::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// `Ok(())` when tree-sitter finds no error node, otherwise the first one.
    ///
    /// The grammar recovers from bad indentation, so a block indented
    /// inconsistently with its neighbours can still pass. This is a syntax
    /// screen, not a full Python parse.
    pub fn check(&mut self, code: &str) -> Result<()> {
        let tree = self
            .parser
            .parse(code, None)
            .ok_or_else(|| Error::Grammar("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if !root.has_error() {
            return Ok(());
        }

        let node = first_error(root).unwrap_or(root);
        let start = node.start_position();
        let end = node.end_position();
        let end_col = if end.row == start.row {
            end.column
        } else {
            start.column + 1
        };

        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            "invalid syntax".to_string()
        };

        Err(SyntaxError::new(message, start.row, start.column, end_col).into())
    }
}

/// Check one piece of code with a fresh parser
pub fn check_python(code: &str) -> Result<()> {
    SyntaxChecker::new()?.check(code)
}

/// Depth-first search for the first ERROR or MISSING node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_code() {
        assert!(check_python("y = np.zeros((2, 3))\nprint(y)\n").is_ok());
        assert!(check_python("").is_ok());
    }

    #[test]
    fn test_reserved_assignment_rejected() {
        let err = check_python("class = np.ones(3)\n").unwrap_err();
        assert!(matches!(err, Error::Syntax(SyntaxError { line: 0, .. })));
    }

    #[test]
    fn test_error_line_reported() {
        let err = check_python("a = 1\nb = np.ones((2, 3)\n").unwrap_err();
        match err {
            Error::Syntax(syntax) => assert!(syntax.line <= 2),
            other => panic!("expected syntax error, got {other}"),
        }
    }

    #[test]
    fn test_checker_reused() {
        let mut checker = SyntaxChecker::new().unwrap();
        assert!(checker.check("x.copy()\n").is_ok());
        assert!(checker.check("x.copy(\n").is_err());
        assert!(checker.check("x.ravel()\n").is_ok());
    }
}
