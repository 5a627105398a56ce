//! Token types for the shader expression language.

use crate::span::Span;
use crate::types::ValueType;
use std::fmt;

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===
    /// Float literal: `1.5`, `.5`, `2.`, `1e3`, `1.0f`
    FloatLiteral(f32),
    /// Integer literal: `42`, `0xff`
    IntegerLiteral(i32),
    /// `true` / `false`
    BooleanLiteral(bool),
    /// Any other run of non-space, non-symbol bytes.
    Identifier(String),
    /// Type keyword: `float3`, `vec3`, `mat4`, ...
    Type(ValueType),

    // === Two-character operators ===
    EqEq,       // ==
    BangEq,     // !=
    LtEq,       // <=
    GtEq,       // >=
    LtLt,       // <<
    GtGt,       // >>
    PlusPlus,   // ++
    MinusMinus, // --
    AmpAmp,     // &&
    PipePipe,   // ||

    // === Single-character symbols ===
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %
    Lt,        // <
    Gt,        // >
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Bang,      // !
    Comma,     // ,
    Dot,       // .
    Question,  // ?
    Colon,     // :
    Pipe,      // |
    Amp,       // &
    Caret,     // ^
    Tilde,     // ~

    /// End of input (buffer exhausted or a `0` byte reached).
    Eof,
}

impl TokenKind {
    /// Token kind for a single-character symbol byte.
    pub fn from_symbol(byte: u8) -> Option<TokenKind> {
        let kind = match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b';' => TokenKind::Semicolon,
            b'!' => TokenKind::Bang,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            b'|' => TokenKind::Pipe,
            b'&' => TokenKind::Amp,
            b'^' => TokenKind::Caret,
            b'~' => TokenKind::Tilde,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether `byte` is one of the single-character symbols.
    #[inline]
    pub fn is_symbol(byte: u8) -> bool {
        Self::from_symbol(byte).is_some()
    }

    /// Source spelling of an operator or punctuation token.
    pub fn symbol(&self) -> Option<&'static str> {
        let s = match self {
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::LtLt => "<<",
            TokenKind::GtGt => ">>",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Bang => "!",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            _ => return None,
        };
        Some(s)
    }
}

/// Used in syntax-error messages: `expected ')', got end of input`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::FloatLiteral(v) => write!(f, "float literal `{v}`"),
            TokenKind::IntegerLiteral(v) => write!(f, "integer literal `{v}`"),
            TokenKind::BooleanLiteral(v) => write!(f, "boolean literal `{v}`"),
            TokenKind::Identifier(name) if name.is_empty() => f.write_str("identifier"),
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::Type(ty) => write!(f, "type `{ty}`"),
            TokenKind::Eof => f.write_str("end of input"),
            other => write!(f, "'{}'", other.symbol().unwrap_or("?")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_matches_spelling() {
        for byte in b"+-*/%<>()[]{};!,.?:|&^~" {
            let kind = TokenKind::from_symbol(*byte).unwrap();
            assert_eq!(kind.symbol().unwrap().as_bytes(), &[*byte]);
        }
        assert!(!TokenKind::is_symbol(b'='));
        assert!(!TokenKind::is_symbol(b'a'));
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::RParen.to_string(), "')'");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
        assert_eq!(TokenKind::Identifier(String::new()).to_string(), "identifier");
        assert_eq!(TokenKind::Identifier("uv".into()).to_string(), "identifier `uv`");
        assert_eq!(TokenKind::Type(ValueType::Float3).to_string(), "type `float3`");
    }
}
