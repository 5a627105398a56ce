use thiserror::Error;

use crate::span::Span;
use crate::token::TokenKind;

/// Error recorded while parsing an expression.
///
/// The parser keeps only the first error it records; later failures during
/// recovery never overwrite it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, got {found}")]
    Syntax {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("expected an expression, got {found}")]
    ExpectedExpression { found: TokenKind, span: Span },

    #[error("not fully parsed: unexpected {found}")]
    NotFullyParsed { found: TokenKind, span: Span },

    #[error("lvalue required as operand of '{op}'")]
    LValueRequired { op: &'static str, span: Span },

    #[error("missing argument after ',' in call to '{callee}'")]
    MissingArgument { callee: String, span: Span },

    #[error("{node} is missing its {slot}")]
    MissingChild {
        node: &'static str,
        slot: &'static str,
        span: Span,
    },

    #[error("expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Where in the source the error was detected.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::NotFullyParsed { span, .. }
            | ParseError::LValueRequired { span, .. }
            | ParseError::MissingArgument { span, .. }
            | ParseError::MissingChild { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Whether this is an lvalue violation (`5++`, `foo()++`, `++(a + b)`).
    pub fn is_lvalue_error(&self) -> bool {
        matches!(self, ParseError::LValueRequired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParseError::Syntax {
            expected: TokenKind::RParen,
            found: TokenKind::Eof,
            span: Span::empty(3),
        };
        assert_eq!(err.to_string(), "expected ')', got end of input");
        assert_eq!(err.span(), Span::empty(3));

        let err = ParseError::LValueRequired {
            op: "++",
            span: Span::new(0, 3),
        };
        assert_eq!(err.to_string(), "lvalue required as operand of '++'");
        assert!(err.is_lvalue_error());

        let err = ParseError::MissingChild {
            node: "binary expression",
            slot: "right operand",
            span: Span::new(0, 3),
        };
        assert_eq!(err.to_string(), "binary expression is missing its right operand");
    }
}
