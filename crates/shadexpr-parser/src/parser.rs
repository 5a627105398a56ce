//! Shader expression parser.
//!
//! Recursive descent with precedence climbing by level: `parse_expression(L)`
//! parses operands at `L - 1` and folds every operator of level `L`
//! left-associatively. Unary operators, casts, calls and member/array access
//! have dedicated rules below level 0 (`parse_value`).
//!
//! Errors are recorded rather than returned: the parser keeps building a
//! best-effort tree after a failure and only the first error is retained.

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::ast::{CallSource, Node, NodeId, UnaryOp};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::precedence::PrecedenceTable;
use crate::span::Span;
use crate::token::TokenKind;
use crate::validate;

/// Parser configuration options.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum nesting of recursive grammar rules. Deeper input records
    /// [`ParseError::NestingTooDeep`] instead of growing the call stack.
    pub max_depth: usize,
    /// Run the post-parse empty-slot check.
    pub validate: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            validate: true,
        }
    }
}

/// A successfully parsed expression together with the arena that owns it.
#[derive(Debug, Clone)]
pub struct Ast {
    pub root: NodeId,
    pub arena: Arena,
}

impl Ast {
    /// The root node.
    pub fn root_node(&self) -> &Node {
        &self.arena[self.root]
    }
}

/// The parser.
///
/// One parser handles one buffer: build it, call [`parse`](Parser::parse),
/// check [`has_error`](Parser::has_error), then read the tree through
/// [`arena`](Parser::arena). Dropping the parser (or calling
/// [`clear`](Parser::clear)) releases every node.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: Arena,
    precedence: PrecedenceTable,
    options: ParserOptions,
    /// First error recorded; never overwritten.
    error: Option<ParseError>,
    /// Current nesting of guarded rules.
    depth: usize,
    /// End offset of the last consumed token.
    last_end: u32,
    parsed: bool,
    root: Option<NodeId>,
}

impl<'a> Parser<'a> {
    /// Create a parser with default options.
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'a [u8], options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            // Roughly one node per token.
            arena: Arena::with_capacity(source.len() / 2),
            precedence: PrecedenceTable::new(),
            options,
            error: None,
            depth: 0,
            last_end: 0,
            parsed: false,
            root: None,
        }
    }

    /// Parse the whole buffer as one expression and return the root.
    ///
    /// The returned tree may be partial when an error was recorded; check
    /// [`has_error`](Parser::has_error) before handing it on. Calling this
    /// again returns the same root without re-parsing.
    pub fn parse(&mut self) -> Option<NodeId> {
        if self.parsed {
            return self.root;
        }
        self.parsed = true;
        debug!(bytes = self.lexer.source().len(), "parsing expression");

        let root = self.parse_ternary();
        if root.is_none() {
            self.record(ParseError::ExpectedExpression {
                found: self.peek().clone(),
                span: self.current_span(),
            });
        }
        if !self.lexer.is_eof() {
            self.record(ParseError::NotFullyParsed {
                found: self.peek().clone(),
                span: self.current_span(),
            });
        }
        if self.options.validate {
            if let Some(error) = validate::find_missing_child(&self.arena) {
                self.record(error);
            }
        }

        debug!(
            nodes = self.arena.len(),
            failed = self.error.is_some(),
            "parsed expression"
        );
        self.root = root;
        root
    }

    /// Parse and hand over the tree, or the first error.
    pub fn into_ast(mut self) -> Result<Ast, ParseError> {
        let root = self.parse();
        if let Some(error) = self.error {
            return Err(error);
        }
        match root {
            Some(root) => Ok(Ast {
                root,
                arena: self.arena,
            }),
            None => Err(ParseError::ExpectedExpression {
                found: TokenKind::Eof,
                span: Span::empty(self.last_end),
            }),
        }
    }

    /// Root of the last parse, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Message of the first error, or an empty string.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Every node allocated by the parse.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Every node allocated by the parse, in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.arena.iter()
    }

    /// Release every node. The root is forgotten along with them.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    fn peek(&self) -> &TokenKind {
        self.lexer.kind()
    }

    fn current_span(&self) -> Span {
        self.lexer.token().span
    }

    fn current_start(&self) -> u32 {
        self.lexer.token().span.start
    }

    fn advance(&mut self) {
        self.last_end = self.lexer.token().span.end;
        self.lexer.next_token();
    }

    /// Check if the current token has the same kind as `kind`, ignoring payload.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record a syntax error naming expected and actual kinds.
    fn expect(&mut self, kind: &TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.record(ParseError::Syntax {
            expected: kind.clone(),
            found: self.peek().clone(),
            span: self.current_span(),
        });
        false
    }

    fn record(&mut self, error: ParseError) {
        if self.error.is_none() {
            debug!(%error, span = ?error.span(), "parse error");
            self.error = Some(error);
        }
    }

    fn alloc(&mut self, node: Node, start: u32) -> NodeId {
        let span = Span::new(start, self.last_end.max(start));
        self.arena.alloc(node, span)
    }

    fn enter(&mut self) -> bool {
        if self.depth >= self.options.max_depth {
            self.record(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                span: self.current_span(),
            });
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Expression Parsing
    // =========================================================================

    /// `cond ? a : b`, right-nested. The top-level entry point.
    fn parse_ternary(&mut self) -> Option<NodeId> {
        if !self.enter() {
            return None;
        }
        let start = self.current_start();
        let condition = self.parse_expression(self.precedence.max_level());

        let node = if self.eat(&TokenKind::Question) {
            let on_true = self.parse_ternary();
            self.expect(&TokenKind::Colon);
            let on_false = self.parse_ternary();
            Some(self.alloc(
                Node::Ternary {
                    condition,
                    on_true,
                    on_false,
                },
                start,
            ))
        } else {
            condition
        };

        self.leave();
        node
    }

    /// Binary operators binding at `level` or tighter.
    fn parse_expression(&mut self, level: u8) -> Option<NodeId> {
        if level == 0 {
            return self.parse_value();
        }

        let start = self.current_start();
        let mut left = self.parse_expression(level - 1);

        while let Some(op) = self.precedence.operator_at(self.peek(), level) {
            self.advance();
            let right = self.parse_expression(level - 1);
            left = Some(self.alloc(Node::Binary { op, left, right }, start));
        }

        left
    }

    /// Elementary value, followed by an optional postfix `++` / `--`.
    ///
    /// Returns `None` without consuming anything when no value starts here.
    fn parse_value(&mut self) -> Option<NodeId> {
        if !self.enter() {
            return None;
        }
        let value = self.parse_primary();
        let value = value.map(|node| self.parse_update_suffix(node));
        self.leave();
        value
    }

    fn parse_primary(&mut self) -> Option<NodeId> {
        let start = self.current_start();

        if let Some(op) = UnaryOp::prefix_from_token(self.peek()) {
            self.advance();
            let child = self.parse_value();
            return Some(self.alloc(
                Node::Unary {
                    op,
                    child,
                    postfix: false,
                },
                start,
            ));
        }

        match self.peek() {
            &TokenKind::IntegerLiteral(value) => {
                self.advance();
                Some(self.alloc(Node::IntegerLiteral(value), start))
            }
            &TokenKind::FloatLiteral(value) => {
                self.advance();
                Some(self.alloc(Node::FloatLiteral(value), start))
            }
            &TokenKind::BooleanLiteral(value) => {
                self.advance();
                Some(self.alloc(Node::BooleanLiteral(value), start))
            }
            TokenKind::Identifier(_) | TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.parse_identifier()
            }
            TokenKind::LParen => self.parse_parenthesized(),
            &TokenKind::Type(ty) => {
                // Constructor-style call: `float3(a, b, c)`.
                let name = self.lexer.text(self.current_span()).into_owned();
                self.advance();
                Some(self.parse_call(name, CallSource::Type(ty), start))
            }
            _ => None,
        }
    }

    /// `(type) value` cast, or `(expr)` with optional trailing member access.
    ///
    /// A postfix `++` / `--` after the closing paren is applied by
    /// [`parse_value`](Parser::parse_value), so `(a)++` is accepted while
    /// `(a + b)++` is an lvalue error.
    fn parse_parenthesized(&mut self) -> Option<NodeId> {
        let start = self.current_start();
        self.advance(); // (

        // `(float)` is only a cast when the keyword is directly followed by `)`;
        // `(float2(a, b)).x` starts a parenthesized constructor call instead.
        if let &TokenKind::Type(target) = self.peek() {
            if matches!(self.lexer.peek().kind, TokenKind::RParen) {
                trace!(%target, "cast");
                self.advance(); // type
                self.advance(); // )
                let object = self.parse_value();
                return Some(self.alloc(Node::Cast { target, object }, start));
            }
            trace!(%target, "type keyword opens a parenthesized expression");
        }

        let inner = self.parse_ternary();
        self.expect(&TokenKind::RParen);

        match inner {
            Some(inner) if self.check(&TokenKind::Dot) => {
                Some(self.parse_member(inner).unwrap_or(inner))
            }
            other => other,
        }
    }

    /// `name`, `name(args)`, either with postfix access, optionally prefixed
    /// by `++` / `--`.
    fn parse_identifier(&mut self) -> Option<NodeId> {
        let start = self.current_start();
        let prefix_span = self.current_span();
        let prefix = UnaryOp::update_from_token(self.peek());
        if prefix.is_some() {
            self.advance();
        }

        let name_start = self.current_start();
        let name = match self.peek() {
            TokenKind::Identifier(name) => name.clone(),
            _ => {
                self.expect(&TokenKind::Identifier(String::new()));
                return None;
            }
        };
        self.advance();

        if self.check(&TokenKind::LParen) {
            // A call result is never an lvalue.
            if let Some(op) = prefix {
                self.record(ParseError::LValueRequired {
                    op: op.as_str(),
                    span: prefix_span,
                });
            }
            return Some(self.parse_call(name, CallSource::Identifier, name_start));
        }

        let ident = self.alloc(Node::Identifier(name), name_start);
        let node = self.parse_extended(ident).unwrap_or(ident);

        let Some(op) = prefix else {
            return Some(node);
        };
        if self.arena[node].is_lvalue() {
            Some(self.alloc(
                Node::Unary {
                    op,
                    child: Some(node),
                    postfix: false,
                },
                start,
            ))
        } else {
            self.record(ParseError::LValueRequired {
                op: op.as_str(),
                span: prefix_span,
            });
            Some(node)
        }
    }

    /// Postfix access chained onto `parent`: `.field`, `.method(args)`,
    /// `[i][j]`, `++`, `--`. Returns `None` when nothing follows.
    fn parse_extended(&mut self, parent: NodeId) -> Option<NodeId> {
        if !self.enter() {
            return None;
        }
        let extended = match self.peek() {
            TokenKind::Dot => self.parse_member(parent),
            TokenKind::LBracket => Some(self.parse_index(parent)),
            TokenKind::PlusPlus | TokenKind::MinusMinus => Some(self.parse_update_suffix(parent)),
            _ => None,
        };
        self.leave();
        extended
    }

    /// `.field` or `.method(args)`, then further postfix access.
    fn parse_member(&mut self, parent: NodeId) -> Option<NodeId> {
        self.advance(); // .

        let field = match self.peek() {
            TokenKind::Identifier(field) => field.clone(),
            _ => {
                self.expect(&TokenKind::Identifier(String::new()));
                return None;
            }
        };
        self.advance();

        let start = self.arena.span(parent).start;
        let node = if self.check(&TokenKind::LParen) {
            let arguments = self.parse_arguments(&field);
            self.alloc(
                Node::MethodCall {
                    name: field,
                    source: CallSource::Identifier,
                    object: Some(parent),
                    arguments,
                },
                start,
            )
        } else {
            self.alloc(
                Node::MemberAccess {
                    object: Some(parent),
                    field,
                },
                start,
            )
        };

        Some(self.parse_extended(node).unwrap_or(node))
    }

    /// One or more `[index]` folded into a single array access.
    fn parse_index(&mut self, parent: NodeId) -> NodeId {
        let start = self.arena.span(parent).start;

        let mut indices = Vec::new();
        while self.eat(&TokenKind::LBracket) {
            indices.push(self.parse_ternary());
            self.expect(&TokenKind::RBracket);
        }

        let node = self.alloc(
            Node::ArrayAccess {
                object: Some(parent),
                indices,
            },
            start,
        );
        self.parse_extended(node).unwrap_or(node)
    }

    /// Wrap `operand` in a postfix `++` / `--` if one follows.
    fn parse_update_suffix(&mut self, operand: NodeId) -> NodeId {
        let Some(op) = UnaryOp::update_from_token(self.peek()) else {
            return operand;
        };
        let op_span = self.current_span();
        self.advance();

        if self.arena[operand].is_lvalue() {
            let span = self.arena.span(operand).merge(op_span);
            self.arena.alloc(
                Node::Unary {
                    op,
                    child: Some(operand),
                    postfix: true,
                },
                span,
            )
        } else {
            self.record(ParseError::LValueRequired {
                op: op.as_str(),
                span: op_span,
            });
            operand
        }
    }

    /// `name(args)` after the name has been consumed.
    fn parse_call(&mut self, name: String, source: CallSource, start: u32) -> NodeId {
        let arguments = self.parse_arguments(&name);
        let call = self.alloc(
            Node::FunctionCall {
                name,
                source,
                arguments,
            },
            start,
        );
        self.parse_extended(call).unwrap_or(call)
    }

    /// `( [expr (, expr)*] )`
    fn parse_arguments(&mut self, callee: &str) -> Vec<NodeId> {
        let mut arguments = Vec::new();
        if !self.expect(&TokenKind::LParen) {
            return arguments;
        }

        if let Some(first) = self.parse_ternary() {
            arguments.push(first);
            while self.eat(&TokenKind::Comma) {
                match self.parse_ternary() {
                    Some(argument) => arguments.push(argument),
                    None => {
                        self.record(ParseError::MissingArgument {
                            callee: callee.to_string(),
                            span: self.current_span(),
                        });
                        break;
                    }
                }
            }
        }

        self.expect(&TokenKind::RParen);
        arguments
    }
}
