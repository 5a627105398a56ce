//! Lexer (tokenizer) for shader expressions.
//!
//! The lexer is pulled on demand by the parser, one token at a time. It keeps
//! the current token plus enough state to step back exactly one token, and can
//! peek one token ahead without moving.
//!
//! Input is a byte buffer. A `0` byte ends the input just like the end of the
//! buffer does, so C-style null-terminated text can be passed unchanged.

use std::borrow::Cow;

use crate::span::Span;
use crate::token::{Token, TokenKind};
use crate::types::ValueType;

/// Byte cursor that produces one token per `scan` call.
#[derive(Debug, Clone, Copy)]
struct Scanner<'a> {
    source: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Start position of the token being scanned.
    token_start: usize,
}

impl<'a> Scanner<'a> {
    fn scan(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof);
        }

        let kind = if let Some(kind) = self.scan_two_char_operator() {
            kind
        } else if let Some(kind) = self.scan_number() {
            kind
        } else if let Some(kind) = TokenKind::from_symbol(self.current()) {
            self.advance();
            kind
        } else {
            self.scan_word()
        };

        self.make_token(kind)
    }

    // === Helper methods ===

    fn byte_at(&self, pos: usize) -> u8 {
        self.source.get(pos).copied().unwrap_or(0)
    }

    fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    fn peek_char(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    fn is_eof(&self) -> bool {
        self.current() == 0
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start as u32, self.pos as u32))
    }

    /// First position at or after `pos` whose byte fails `pred`.
    fn skip_while(&self, mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
        while pos < self.source.len() && pred(self.source[pos]) {
            pos += 1;
        }
        pos
    }

    /// A number must be followed by end of input, whitespace or a symbol.
    fn is_number_end(&self, pos: usize) -> bool {
        let byte = self.byte_at(pos);
        byte == 0 || is_space(byte) || TokenKind::is_symbol(byte)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && is_space(self.current()) {
            self.advance();
        }
    }

    // === Token scanning ===

    fn scan_two_char_operator(&mut self) -> Option<TokenKind> {
        let kind = match (self.current(), self.peek_char()) {
            (b'=', b'=') => TokenKind::EqEq,
            (b'!', b'=') => TokenKind::BangEq,
            (b'<', b'=') => TokenKind::LtEq,
            (b'<', b'<') => TokenKind::LtLt,
            (b'>', b'=') => TokenKind::GtEq,
            (b'>', b'>') => TokenKind::GtGt,
            (b'+', b'+') => TokenKind::PlusPlus,
            (b'-', b'-') => TokenKind::MinusMinus,
            (b'&', b'&') => TokenKind::AmpAmp,
            (b'|', b'|') => TokenKind::PipePipe,
            _ => return None,
        };
        self.advance_n(2);
        Some(kind)
    }

    /// Scan a numeric literal, or leave the cursor untouched and return `None`
    /// so the bytes are lexed as a word instead.
    fn scan_number(&mut self) -> Option<TokenKind> {
        let start = self.pos;

        if self.current() == b'0' && self.peek_char() == b'x' {
            let digits_end = self.skip_while(start + 2, |b| b.is_ascii_hexdigit());
            if digits_end > start + 2 && self.is_number_end(digits_end) {
                self.pos = digits_end;
                let value = parse_integer(&self.source[start + 2..digits_end], 16);
                return Some(TokenKind::IntegerLiteral(value));
            }
        }

        let int_end = self.skip_while(start, |b| b.is_ascii_digit());
        let digits_end = self.float_end(start, int_end)?;
        let mut float_end = digits_end;
        if self.byte_at(float_end) == b'f' {
            float_end += 1;
        }

        if float_end > int_end && self.is_number_end(float_end) {
            self.pos = float_end;
            let value = parse_float(&self.source[start..digits_end]);
            return Some(TokenKind::FloatLiteral(value));
        }

        if int_end > start && self.is_number_end(int_end) {
            self.pos = int_end;
            let value = parse_integer(&self.source[start..int_end], 10);
            return Some(TokenKind::IntegerLiteral(value));
        }

        None
    }

    /// End of the longest decimal float starting at `start`
    /// (`digits [. digits] [e [+-] digits]`, at least one mantissa digit).
    fn float_end(&self, start: usize, int_end: usize) -> Option<usize> {
        let mut end = int_end;
        let mut has_digits = int_end > start;

        if self.byte_at(end) == b'.' {
            let frac_end = self.skip_while(end + 1, |b| b.is_ascii_digit());
            if has_digits || frac_end > end + 1 {
                has_digits = true;
                end = frac_end;
            }
        }
        if !has_digits {
            return None;
        }

        if matches!(self.byte_at(end), b'e' | b'E') {
            let mut exp = end + 1;
            if matches!(self.byte_at(exp), b'+' | b'-') {
                exp += 1;
            }
            let exp_end = self.skip_while(exp, |b| b.is_ascii_digit());
            if exp_end > exp {
                end = exp_end;
            }
        }

        Some(end)
    }

    fn scan_word(&mut self) -> TokenKind {
        while !self.is_eof() && !is_space(self.current()) && !TokenKind::is_symbol(self.current()) {
            self.advance();
        }

        let word = &self.source[self.token_start..self.pos];
        match word {
            b"true" => TokenKind::BooleanLiteral(true),
            b"false" => TokenKind::BooleanLiteral(false),
            _ => {
                let text = String::from_utf8_lossy(word);
                match ValueType::from_keyword(&text) {
                    Some(ty) => TokenKind::Type(ty),
                    None => TokenKind::Identifier(text.into_owned()),
                }
            }
        }
    }
}

/// C `isspace`: space, tab, newline, vertical tab, form feed, carriage return.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Digits are pre-validated; out-of-range values saturate then wrap to `i32`.
fn parse_integer(digits: &[u8], radix: u32) -> i32 {
    let value = digits.iter().fold(0i64, |acc, &b| {
        let digit = (b as char).to_digit(radix).unwrap_or(0);
        acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(digit))
    });
    value as i32
}

fn parse_float(digits: &[u8]) -> f32 {
    // Rust's float grammar wants a digit on both sides of the point.
    let mut text = String::with_capacity(digits.len() + 2);
    for (i, &b) in digits.iter().enumerate() {
        let prev_is_digit = i > 0 && digits[i - 1].is_ascii_digit();
        if b == b'.' && !prev_is_digit {
            text.push('0');
        }
        text.push(b as char);
        let next_is_digit = digits.get(i + 1).is_some_and(u8::is_ascii_digit);
        if b == b'.' && !next_is_digit {
            text.push('0');
        }
    }
    text.parse().unwrap_or(0.0)
}

/// On-demand tokenizer with one token of undo and one token of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    /// The current token.
    current: Token,
    /// The token and cursor replaced by the last `next_token` call.
    previous: Option<(Token, Scanner<'a>)>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned on the first token of `source`.
    pub fn new(source: &'a [u8]) -> Self {
        let mut scanner = Scanner {
            source,
            pos: 0,
            token_start: 0,
        };
        let current = scanner.scan();
        Self {
            scanner,
            current,
            previous: None,
        }
    }

    /// Move to the next token and return it.
    ///
    /// Once the input is exhausted every further call yields `TokenKind::Eof`.
    pub fn next_token(&mut self) -> &Token {
        let saved = self.scanner;
        let token = self.scanner.scan();
        let replaced = std::mem::replace(&mut self.current, token);
        self.previous = Some((replaced, saved));
        &self.current
    }

    /// The current token.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.current
    }

    /// The current token kind.
    #[inline]
    pub fn kind(&self) -> &TokenKind {
        &self.current.kind
    }

    /// Whether the current token is the end-of-input sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    /// Scan the token after the current one without consuming anything.
    pub fn peek(&self) -> Token {
        let mut probe = self.scanner;
        probe.scan()
    }

    /// Step back to the token that was current before the last `next_token`.
    ///
    /// Only one level is kept: a second `undo` without an intervening
    /// `next_token` returns `false` and leaves the lexer unchanged, as does an
    /// `undo` on a freshly created lexer.
    pub fn undo(&mut self) -> bool {
        match self.previous.take() {
            Some((token, scanner)) => {
                self.current = token;
                self.scanner = scanner;
                true
            }
            None => false,
        }
    }

    /// The whole input buffer.
    pub fn source(&self) -> &'a [u8] {
        self.scanner.source
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> Cow<'a, str> {
        let source = self.scanner.source;
        let end = (span.end as usize).min(source.len());
        let start = (span.start as usize).min(end);
        String::from_utf8_lossy(&source[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source.as_bytes());
        let mut tokens = Vec::new();
        while !lexer.is_eof() {
            tokens.push(lexer.kind().clone());
            lexer.next_token();
        }
        tokens
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            tokenize("uv time vec3 float4x4 ivec2 true false"),
            vec![
                ident("uv"),
                ident("time"),
                TokenKind::Type(ValueType::Float3),
                TokenKind::Type(ValueType::Float4x4),
                TokenKind::Type(ValueType::Int2),
                TokenKind::BooleanLiteral(true),
                TokenKind::BooleanLiteral(false),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokenize("42 3.14 .5 2. 1e3 1.5f 0xff 7f"),
            vec![
                TokenKind::IntegerLiteral(42),
                TokenKind::FloatLiteral(3.14),
                TokenKind::FloatLiteral(0.5),
                TokenKind::FloatLiteral(2.0),
                TokenKind::FloatLiteral(1000.0),
                TokenKind::FloatLiteral(1.5),
                TokenKind::IntegerLiteral(255),
                TokenKind::FloatLiteral(7.0),
            ]
        );
    }

    #[test]
    fn test_number_needs_terminator() {
        // `1.x` is an integer followed by a member access, not a float.
        assert_eq!(
            tokenize("1.x"),
            vec![TokenKind::IntegerLiteral(1), TokenKind::Dot, ident("x")]
        );
        assert_eq!(tokenize("2abc"), vec![ident("2abc")]);
        assert_eq!(tokenize("1e"), vec![ident("1e")]);
        assert_eq!(tokenize("0xg"), vec![ident("0xg")]);
        assert_eq!(
            tokenize("3)"),
            vec![TokenKind::IntegerLiteral(3), TokenKind::RParen]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokenize("== != <= >= << >> ++ -- && ||"),
            vec![
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::LtLt,
                TokenKind::GtGt,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
            ]
        );
        assert_eq!(
            tokenize("a+-b"),
            vec![ident("a"), TokenKind::Plus, TokenKind::Minus, ident("b")]
        );
        assert_eq!(
            tokenize("a+++b"),
            vec![ident("a"), TokenKind::PlusPlus, TokenKind::Plus, ident("b")]
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            tokenize("a?b:c"),
            vec![ident("a"), TokenKind::Question, ident("b"), TokenKind::Colon, ident("c")]
        );
        assert_eq!(
            tokenize("m[0].xy"),
            vec![
                ident("m"),
                TokenKind::LBracket,
                TokenKind::IntegerLiteral(0),
                TokenKind::RBracket,
                TokenKind::Dot,
                ident("xy"),
            ]
        );
    }

    #[test]
    fn test_unknown_bytes_form_words() {
        // `=` is not a symbol, so it is swallowed into the surrounding word.
        assert_eq!(tokenize("a=b"), vec![ident("a=b")]);
        assert_eq!(tokenize("= 1"), vec![ident("="), TokenKind::IntegerLiteral(1)]);
    }

    #[test]
    fn test_nul_byte_ends_input() {
        let mut lexer = Lexer::new(b"a\0b");
        assert_eq!(lexer.kind(), &ident("a"));
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_trailing_whitespace() {
        assert_eq!(tokenize("1 \t\n"), vec![TokenKind::IntegerLiteral(1)]);
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_spans() {
        let mut lexer = Lexer::new(b"  foo + 12");
        assert_eq!(lexer.token().span, Span::new(2, 5));
        assert_eq!(lexer.next_token().span, Span::new(6, 7));
        assert_eq!(lexer.next_token().span, Span::new(8, 10));
        assert_eq!(lexer.text(Span::new(2, 5)), "foo");
    }

    #[test]
    fn test_peek_does_not_advance() {
        let lexer = Lexer::new(b"(float)x");
        assert_eq!(lexer.kind(), &TokenKind::LParen);
        assert_eq!(lexer.peek().kind, TokenKind::Type(ValueType::Float));
        assert_eq!(lexer.kind(), &TokenKind::LParen);
    }

    #[test]
    fn test_undo_is_single_level() {
        let mut lexer = Lexer::new(b"a + b");
        assert!(!lexer.undo());

        lexer.next_token();
        lexer.next_token();
        assert_eq!(lexer.kind(), &ident("b"));

        assert!(lexer.undo());
        assert_eq!(lexer.kind(), &TokenKind::Plus);
        assert!(!lexer.undo());
        assert_eq!(lexer.kind(), &TokenKind::Plus);

        // Scanning resumes from the restored cursor.
        assert_eq!(lexer.next_token().kind, ident("b"));
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
