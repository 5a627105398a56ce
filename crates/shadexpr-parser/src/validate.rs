//! Post-parse structural check.
//!
//! The parser recovers from local failures by leaving a child slot empty and
//! carrying on. This pass scans the whole arena, not just the nodes reachable
//! from the root, so a broken node is reported even if recovery left it
//! detached from the returned tree.

use crate::arena::Arena;
use crate::ast::Node;
use crate::error::ParseError;

/// First node (in allocation order) with an empty required slot.
pub fn find_missing_child(arena: &Arena) -> Option<ParseError> {
    arena.iter().find_map(|(id, node)| {
        missing_slot(node).map(|slot| ParseError::MissingChild {
            node: node.kind_name(),
            slot,
            span: arena.span(id),
        })
    })
}

fn missing_slot(node: &Node) -> Option<&'static str> {
    match node {
        Node::FloatLiteral(_)
        | Node::IntegerLiteral(_)
        | Node::BooleanLiteral(_)
        | Node::Identifier(_)
        | Node::FunctionCall { .. } => None,
        Node::Binary { left, right, .. } => {
            if left.is_none() {
                Some("left operand")
            } else if right.is_none() {
                Some("right operand")
            } else {
                None
            }
        }
        Node::Ternary {
            condition,
            on_true,
            on_false,
        } => {
            if condition.is_none() {
                Some("condition")
            } else if on_true.is_none() {
                Some("true branch")
            } else if on_false.is_none() {
                Some("false branch")
            } else {
                None
            }
        }
        Node::Unary { child, .. } => child.is_none().then_some("operand"),
        Node::Cast { object, .. } => object.is_none().then_some("operand"),
        Node::MethodCall { object, .. } | Node::MemberAccess { object, .. } => {
            object.is_none().then_some("object")
        }
        Node::ArrayAccess { object, indices } => {
            if object.is_none() {
                Some("object")
            } else if indices.is_empty() || indices.iter().any(Option::is_none) {
                Some("index")
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};
    use crate::span::Span;

    #[test]
    fn test_complete_tree_passes() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Identifier("a".into()), Span::new(0, 1));
        let i = arena.alloc(Node::IntegerLiteral(0), Span::new(2, 3));
        arena.alloc(
            Node::ArrayAccess {
                object: Some(a),
                indices: vec![Some(i)],
            },
            Span::new(0, 4),
        );
        assert_eq!(find_missing_child(&arena), None);
    }

    #[test]
    fn test_reports_first_empty_slot() {
        let mut arena = Arena::new();
        let one = arena.alloc(Node::IntegerLiteral(1), Span::new(0, 1));
        arena.alloc(
            Node::Binary {
                op: BinaryOp::Add,
                left: Some(one),
                right: None,
            },
            Span::new(0, 3),
        );
        arena.alloc(
            Node::Unary {
                op: UnaryOp::Minus,
                child: None,
                postfix: false,
            },
            Span::new(4, 5),
        );

        let err = find_missing_child(&arena).unwrap();
        assert_eq!(
            err,
            ParseError::MissingChild {
                node: "binary expression",
                slot: "right operand",
                span: Span::new(0, 3),
            }
        );
    }

    #[test]
    fn test_detached_node_is_still_reported() {
        let mut arena = Arena::new();
        // Not referenced by anything else in the arena.
        arena.alloc(
            Node::MemberAccess {
                object: None,
                field: "x".into(),
            },
            Span::new(0, 2),
        );
        arena.alloc(Node::Identifier("root".into()), Span::new(3, 7));
        assert!(matches!(
            find_missing_child(&arena),
            Some(ParseError::MissingChild { slot: "object", .. })
        ));
    }

    #[test]
    fn test_empty_index_is_reported() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Identifier("a".into()), Span::new(0, 1));
        arena.alloc(
            Node::ArrayAccess {
                object: Some(a),
                indices: vec![None],
            },
            Span::new(0, 3),
        );
        assert!(matches!(
            find_missing_child(&arena),
            Some(ParseError::MissingChild { slot: "index", .. })
        ));
    }
}
