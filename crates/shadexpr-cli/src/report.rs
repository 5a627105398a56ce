//! Output rendering: indented tree and JSON report.

use serde::Serialize;
use shadexpr_parser::{Arena, CallSource, Node, NodeId, Parser, Span};

/// One-line description of a node, without its children.
pub fn label(node: &Node) -> String {
    match node {
        Node::FloatLiteral(value) => format!("float {value:?}"),
        Node::IntegerLiteral(value) => format!("int {value}"),
        Node::BooleanLiteral(value) => format!("bool {value}"),
        Node::Identifier(name) => format!("identifier {name}"),
        Node::Binary { op, .. } => format!("binary {op}"),
        Node::Ternary { .. } => "ternary".to_string(),
        Node::Unary { op, postfix, .. } => {
            if *postfix {
                format!("postfix {op}")
            } else {
                format!("prefix {op}")
            }
        }
        Node::Cast { target, .. } => format!("cast {target}"),
        Node::FunctionCall { name, source, .. } => match source {
            CallSource::Identifier => format!("call {name}"),
            CallSource::Type(ty) => format!("construct {ty} ({name})"),
        },
        Node::MethodCall { name, .. } => format!("method {name}"),
        Node::MemberAccess { field, .. } => format!("member .{field}"),
        Node::ArrayAccess { indices, .. } => format!("index [{}]", indices.len()),
    }
}

/// Indented tree, one node per line with its source range.
pub fn tree(arena: &Arena, root: NodeId) -> String {
    let mut out = String::new();
    write_tree(arena, Some(root), 0, &mut out);
    out
}

fn write_tree(arena: &Arena, id: Option<NodeId>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(node) = id.and_then(|id| arena.get(id)) else {
        out.push_str(&indent);
        out.push_str("<missing>\n");
        return;
    };
    let span = id.map(|id| arena.span(id)).unwrap_or_default();
    out.push_str(&format!(
        "{indent}{} @{}..{}\n",
        label(node),
        span.start,
        span.end
    ));
    for child in node.child_slots() {
        write_tree(arena, child, depth + 1, out);
    }
}

/// Machine-readable result of parsing one expression.
#[derive(Debug, Serialize)]
pub struct ParseReport<'a> {
    pub source: &'a str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexpr: Option<String>,
    pub nodes: Vec<NodeReport>,
    pub identifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub id: usize,
    pub kind: &'static str,
    pub label: String,
    pub span: [u32; 2],
    /// Child ids in slot order; `null` for an empty slot.
    pub children: Vec<Option<usize>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub span: [u32; 2],
}

fn span_pair(span: Span) -> [u32; 2] {
    [span.start, span.end]
}

impl<'a> ParseReport<'a> {
    /// Summarize a parser after `parse()` has run.
    pub fn new(source: &'a str, parser: &Parser<'_>) -> Self {
        let arena = parser.arena();
        let root = parser.root();
        let nodes = arena
            .iter()
            .map(|(id, node)| NodeReport {
                id: id.index(),
                kind: node.kind_name(),
                label: label(node),
                span: span_pair(arena.span(id)),
                children: node
                    .child_slots()
                    .into_iter()
                    .map(|slot| slot.map(NodeId::index))
                    .collect(),
            })
            .collect();

        Self {
            source,
            ok: !parser.has_error(),
            root: root.map(NodeId::index),
            sexpr: root.map(|root| shadexpr_parser::to_sexpr(arena, root)),
            nodes,
            identifiers: arena.identifiers().into_iter().map(String::from).collect(),
            error: parser.error().map(|error| ErrorReport {
                message: error.to_string(),
                span: span_pair(error.span()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(source: &str) -> Parser<'_> {
        let mut parser = Parser::new(source.as_bytes());
        parser.parse();
        parser
    }

    #[test]
    fn test_tree() {
        let parser = parsed("-a.x + f(1)");
        let rendered = tree(parser.arena(), parser.root().unwrap());
        assert_eq!(
            rendered,
            "binary + @0..11\n\
             \x20 prefix - @0..4\n\
             \x20   member .x @1..4\n\
             \x20     identifier a @1..2\n\
             \x20 call f @7..11\n\
             \x20   int 1 @9..10\n"
        );
    }

    #[test]
    fn test_tree_shows_missing_slots() {
        let mut parser = Parser::with_options(
            b"a ?",
            shadexpr_parser::ParserOptions {
                validate: false,
                ..Default::default()
            },
        );
        let root = parser.parse().unwrap();
        let rendered = tree(parser.arena(), root);
        assert_eq!(rendered.matches("<missing>").count(), 2);
    }

    #[test]
    fn test_report_success() {
        let parser = parsed("vec2(u, v)");
        let report = ParseReport::new("vec2(u, v)", &parser);
        assert!(report.ok);
        assert_eq!(report.root, Some(2));
        assert_eq!(report.sexpr.as_deref(), Some("(construct float2 u v)"));
        assert_eq!(report.identifiers, ["u", "v"]);
        assert_eq!(report.nodes[2].label, "construct float2 (vec2)");
        assert_eq!(report.nodes[2].children, [Some(0), Some(1)]);
        assert!(report.error.is_none());
    }

    #[test]
    fn test_report_failure() {
        let parser = parsed("5++");
        let report = ParseReport::new("5++", &parser);
        assert!(!report.ok);
        let error = report.error.unwrap();
        assert_eq!(error.message, "lvalue required as operand of '++'");
        assert_eq!(error.span, [1, 3]);

        let json = serde_json::to_value(ParseReport::new("5++", &parser)).unwrap();
        assert_eq!(json["ok"], false);
        assert!(json.get("error").is_some());
    }
}
