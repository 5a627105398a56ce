//! Arena holding every node of a parse.
//!
//! Nodes are stored in one contiguous vector and referenced by [`NodeId`]:
//! - releasing a parse is a single `clear`, with no recursive drop however
//!   deep the tree is
//! - the flat node list is the public "every node allocated" view that the
//!   validation pass and downstream consumers scan without walking the tree

use std::ops::Index;

use rustc_hash::FxHashSet;

use crate::ast::{Node, NodeId};
use crate::span::Span;

/// Owning store for the nodes of one parse.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    /// Source span of each node, parallel to `nodes`.
    spans: Vec<Span>,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            spans: Vec::with_capacity(capacity),
        }
    }

    /// Add a node and return its id.
    #[inline]
    pub fn alloc(&mut self, node: Node, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.spans.push(span);
        id
    }

    /// The node for `id`, or `None` if it belongs to another (or cleared) arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Source span of the node. Empty for ids outside the arena.
    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans.get(id.index()).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in allocation order (children before their parents).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }

    /// Release every node at once.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.spans.clear();
    }

    /// Direct children of a node, in source order. Empty slots are skipped.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|node| node.child_slots().into_iter().flatten().collect())
            .unwrap_or_default()
    }

    /// Nodes reachable from `root`, in pre-order. Iterative, so arbitrarily
    /// deep trees do not grow the call stack.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// Distinct identifier names, in order of first appearance.
    ///
    /// Member fields and call names are not included: only `Identifier` nodes,
    /// which is what a generator needs to bind input variables.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Identifier(name) => Some(name.as_str()),
                _ => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    fn sample() -> (Arena, NodeId) {
        // a + b * a
        let mut arena = Arena::new();
        let a = arena.alloc(Node::Identifier("a".into()), Span::new(0, 1));
        let b = arena.alloc(Node::Identifier("b".into()), Span::new(4, 5));
        let a2 = arena.alloc(Node::Identifier("a".into()), Span::new(8, 9));
        let mul = arena.alloc(
            Node::Binary {
                op: BinaryOp::Mul,
                left: Some(b),
                right: Some(a2),
            },
            Span::new(4, 9),
        );
        let add = arena.alloc(
            Node::Binary {
                op: BinaryOp::Add,
                left: Some(a),
                right: Some(mul),
            },
            Span::new(0, 9),
        );
        (arena, add)
    }

    #[test]
    fn test_alloc_and_index() {
        let (arena, root) = sample();
        assert_eq!(arena.len(), 5);
        assert_eq!(root.index(), 4);
        assert!(matches!(arena[root], Node::Binary { op: BinaryOp::Add, .. }));
        assert_eq!(arena.span(root), Span::new(0, 9));
    }

    #[test]
    fn test_descendants_cover_tree() {
        let (arena, root) = sample();
        let order: Vec<usize> = arena.descendants(root).iter().map(|id| id.index()).collect();
        assert_eq!(order, vec![4, 0, 3, 1, 2]);
    }

    #[test]
    fn test_identifiers_are_distinct() {
        let (arena, _) = sample();
        assert_eq!(arena.identifiers(), vec!["a", "b"]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let (mut arena, root) = sample();
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(root).is_none());
        assert!(arena.children(root).is_empty());
    }

    #[test]
    fn test_children_skip_empty_slots() {
        let mut arena = Arena::new();
        let one = arena.alloc(Node::IntegerLiteral(1), Span::new(0, 1));
        let add = arena.alloc(
            Node::Binary {
                op: BinaryOp::Add,
                left: Some(one),
                right: None,
            },
            Span::new(0, 3),
        );
        assert_eq!(arena.children(add), vec![one]);
    }
}
