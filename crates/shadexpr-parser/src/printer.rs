//! Text rendering of a parsed expression.
//!
//! Two styles:
//! - [`Style::SExpr`]: fully parenthesized prefix form, `(+ 1 (* 2 3))`.
//!   Stable, used by tests and the CLI.
//! - [`Style::Source`]: infix form with every operation parenthesized,
//!   `(1 + (2 * 3))`, for eyeballing what the parser grouped. Re-parsing
//!   it yields the same tree.
//!
//! Empty child slots print as `<missing>`.

use crate::arena::Arena;
use crate::ast::{BinaryOp, CallSource, Node, NodeId, UnaryOp};
use crate::types::ValueType;
use crate::visit::Visitor;

const MISSING: &str = "<missing>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    SExpr,
    Source,
}

/// Renders a tree into a string.
pub struct Printer {
    style: Style,
    out: String,
}

impl Printer {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            out: String::new(),
        }
    }

    /// Render the tree rooted at `root`.
    pub fn print(mut self, arena: &Arena, root: NodeId) -> String {
        self.visit_node(arena, root);
        self.out
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// `head child child ...` inside parentheses, children space-separated.
    fn list(&mut self, arena: &Arena, head: &str, children: impl IntoIterator<Item = Option<NodeId>>) {
        self.push("(");
        self.push(head);
        for child in children {
            self.push(" ");
            self.visit_child(arena, child);
        }
        self.push(")");
    }

    /// Receiver of `.field`, `.method()`, `[i]` or a postfix update.
    fn receiver(&mut self, arena: &Arena, object: Option<NodeId>) {
        if needs_parens(arena, object) {
            self.push("(");
            self.visit_child(arena, object);
            self.push(")");
        } else {
            self.visit_child(arena, object);
        }
    }

    fn arguments(&mut self, arena: &Arena, arguments: &[NodeId]) {
        self.push("(");
        for (i, &argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.visit_node(arena, argument);
        }
        self.push(")");
    }
}

/// Nodes that regroup when followed by postfix access: `(float)v.x` casts
/// `v.x`, and `1.x` lexes as `1` `.` `x`. Binary and ternary forms carry
/// their own parentheses.
fn needs_parens(arena: &Arena, id: Option<NodeId>) -> bool {
    matches!(
        id.and_then(|id| arena.get(id)),
        Some(
            Node::FloatLiteral(_)
                | Node::IntegerLiteral(_)
                | Node::BooleanLiteral(_)
                | Node::Unary { .. }
                | Node::Cast { .. }
        )
    )
}

/// Prefix operand that is itself a prefix operator: `- -a` must not fuse
/// into `--a`.
fn is_prefix_unary(arena: &Arena, id: Option<NodeId>) -> bool {
    matches!(
        id.and_then(|id| arena.get(id)),
        Some(Node::Unary { postfix: false, .. })
    )
}

impl Visitor for Printer {
    fn visit_missing(&mut self) {
        self.push(MISSING);
    }

    fn visit_float_literal(&mut self, value: f32) {
        // Debug keeps the decimal point: `1.0`, not `1`.
        self.push(&format!("{value:?}"));
    }

    fn visit_integer_literal(&mut self, value: i32) {
        self.push(&value.to_string());
    }

    fn visit_boolean_literal(&mut self, value: bool) {
        self.push(if value { "true" } else { "false" });
    }

    fn visit_identifier(&mut self, name: &str) {
        self.push(name);
    }

    fn visit_binary(
        &mut self,
        arena: &Arena,
        op: BinaryOp,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) {
        match self.style {
            Style::SExpr => self.list(arena, op.as_str(), [left, right]),
            Style::Source => {
                self.push("(");
                self.visit_child(arena, left);
                self.push(&format!(" {op} "));
                self.visit_child(arena, right);
                self.push(")");
            }
        }
    }

    fn visit_ternary(
        &mut self,
        arena: &Arena,
        condition: Option<NodeId>,
        on_true: Option<NodeId>,
        on_false: Option<NodeId>,
    ) {
        match self.style {
            Style::SExpr => self.list(arena, "?", [condition, on_true, on_false]),
            Style::Source => {
                self.push("(");
                self.visit_child(arena, condition);
                self.push(" ? ");
                self.visit_child(arena, on_true);
                self.push(" : ");
                self.visit_child(arena, on_false);
                self.push(")");
            }
        }
    }

    fn visit_unary(&mut self, arena: &Arena, op: UnaryOp, child: Option<NodeId>, postfix: bool) {
        match (self.style, postfix) {
            (Style::SExpr, false) => self.list(arena, op.as_str(), [child]),
            (Style::SExpr, true) => {
                let head = format!("post{op}");
                self.list(arena, &head, [child]);
            }
            (Style::Source, false) => {
                self.push(op.as_str());
                if is_prefix_unary(arena, child) {
                    self.push(" ");
                }
                self.visit_child(arena, child);
            }
            (Style::Source, true) => {
                self.receiver(arena, child);
                self.push(op.as_str());
            }
        }
    }

    fn visit_cast(&mut self, arena: &Arena, target: ValueType, object: Option<NodeId>) {
        match self.style {
            Style::SExpr => {
                let head = format!("cast {target}");
                self.list(arena, &head, [object]);
            }
            Style::Source => {
                self.push(&format!("({target})"));
                self.visit_child(arena, object);
            }
        }
    }

    fn visit_function_call(
        &mut self,
        arena: &Arena,
        name: &str,
        source: CallSource,
        arguments: &[NodeId],
    ) {
        match self.style {
            Style::SExpr => {
                let head = match source {
                    CallSource::Identifier => format!("call {name}"),
                    CallSource::Type(ty) => format!("construct {ty}"),
                };
                self.list(arena, &head, arguments.iter().copied().map(Some));
            }
            Style::Source => {
                self.push(name);
                self.arguments(arena, arguments);
            }
        }
    }

    fn visit_method_call(
        &mut self,
        arena: &Arena,
        name: &str,
        object: Option<NodeId>,
        arguments: &[NodeId],
    ) {
        match self.style {
            Style::SExpr => {
                let head = format!("method {name}");
                let children = std::iter::once(object).chain(arguments.iter().copied().map(Some));
                self.list(arena, &head, children);
            }
            Style::Source => {
                self.receiver(arena, object);
                self.push(".");
                self.push(name);
                self.arguments(arena, arguments);
            }
        }
    }

    fn visit_member_access(&mut self, arena: &Arena, object: Option<NodeId>, field: &str) {
        match self.style {
            Style::SExpr => {
                self.push("(. ");
                self.visit_child(arena, object);
                self.push(" ");
                self.push(field);
                self.push(")");
            }
            Style::Source => {
                self.receiver(arena, object);
                self.push(".");
                self.push(field);
            }
        }
    }

    fn visit_array_access(&mut self, arena: &Arena, object: Option<NodeId>, indices: &[Option<NodeId>]) {
        match self.style {
            Style::SExpr => {
                let children = std::iter::once(object).chain(indices.iter().copied());
                self.list(arena, "[]", children);
            }
            Style::Source => {
                self.receiver(arena, object);
                for &index in indices {
                    self.push("[");
                    self.visit_child(arena, index);
                    self.push("]");
                }
            }
        }
    }
}

/// Render in [`Style::SExpr`].
pub fn to_sexpr(arena: &Arena, root: NodeId) -> String {
    Printer::new(Style::SExpr).print(arena, root)
}

/// Render in [`Style::Source`].
pub fn to_source(arena: &Arena, root: NodeId) -> String {
    Printer::new(Style::Source).print(arena, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Parser, ParserOptions};

    fn render(source: &str, style: Style) -> String {
        let options = ParserOptions {
            validate: false,
            ..ParserOptions::default()
        };
        let mut parser = Parser::with_options(source.as_bytes(), options);
        let root = parser.parse().unwrap();
        Printer::new(style).print(parser.arena(), root)
    }

    fn parse_clean(source: &str) -> Parser<'_> {
        let mut parser = Parser::new(source.as_bytes());
        parser.parse();
        assert!(!parser.has_error(), "{source:?}: {}", parser.error_message());
        parser
    }

    #[test]
    fn test_sexpr() {
        assert_eq!(render("1.0 + 2 * x", Style::SExpr), "(+ 1.0 (* 2 x))");
        assert_eq!(render("!true", Style::SExpr), "(! true)");
        assert_eq!(render("a--", Style::SExpr), "(post-- a)");
        assert_eq!(render("float4(v, 1).xyz", Style::SExpr), "(. (construct float4 v 1) xyz)");
    }

    #[test]
    fn test_source() {
        assert_eq!(render("1+2*3", Style::Source), "(1 + (2 * 3))");
        assert_eq!(render("a ? -b : c++", Style::Source), "(a ? -b : c++)");
        assert_eq!(render("(int)x", Style::Source), "(int)x");
        assert_eq!(render("m[i][j].n(1, 2)", Style::Source), "m[i][j].n(1, 2)");
        assert_eq!(render("vec2(a, b)", Style::Source), "vec2(a, b)");
    }

    #[test]
    fn test_source_keeps_grouping() {
        assert_eq!(render("((float)v).x", Style::Source), "((float)v).x");
        assert_eq!(render("(-a).x", Style::Source), "(-a).x");
        assert_eq!(render("- -a", Style::Source), "- -a");
        assert_eq!(render("+ +a", Style::Source), "+ +a");
        assert_eq!(render("(a + b).x", Style::Source), "(a + b).x");
        assert_eq!(render("(1).x", Style::Source), "(1).x");
    }

    #[test]
    fn test_source_reparses_to_same_tree() {
        for source in [
            "((float)v).x",
            "(-a).x",
            "- -a",
            "+ +a",
            "!!b",
            "- --a",
            "-a--",
            "~-x.y",
            "(a + b).x",
            "(true).x",
            "((int)m).x[i]",
            "(-v).dot(n)",
            "(float)-x.y",
            "(float)(a ? b : c).x",
            "a ? -b : (int)c",
            "vec3(1, 2, 3).xy",
            "m[i][j].n(1, 2)[k]++",
            "1.5 * 2e-3 - a << 2",
        ] {
            let parser = parse_clean(source);
            let root = parser.root().unwrap();
            let printed = to_source(parser.arena(), root);
            let reparsed = parse_clean(&printed);
            assert_eq!(
                to_sexpr(reparsed.arena(), reparsed.root().unwrap()),
                to_sexpr(parser.arena(), root),
                "{source:?} printed as {printed:?}"
            );
        }
    }

    #[test]
    fn test_missing_slots() {
        assert_eq!(render("1 +", Style::SExpr), "(+ 1 <missing>)");
        assert_eq!(render("a ? : b", Style::Source), "(a ? <missing> : b)");
    }
}
