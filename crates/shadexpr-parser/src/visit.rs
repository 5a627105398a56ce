//! Visitor for traversing a parsed expression.
//!
//! Override the `visit_*` methods for the node kinds you care about; the
//! defaults walk into children in source order. Empty child slots (only
//! possible in a tree from a failed parse) are reported through
//! [`Visitor::visit_missing`].

use crate::arena::Arena;
use crate::ast::{BinaryOp, CallSource, Node, NodeId, UnaryOp};
use crate::types::ValueType;

pub trait Visitor {
    fn visit_node(&mut self, arena: &Arena, id: NodeId) {
        walk_node(self, arena, id);
    }

    fn visit_child(&mut self, arena: &Arena, child: Option<NodeId>) {
        match child {
            Some(id) => self.visit_node(arena, id),
            None => self.visit_missing(),
        }
    }

    /// An empty child slot.
    fn visit_missing(&mut self) {}

    // -- Leaves --

    fn visit_float_literal(&mut self, _value: f32) {}

    fn visit_integer_literal(&mut self, _value: i32) {}

    fn visit_boolean_literal(&mut self, _value: bool) {}

    fn visit_identifier(&mut self, _name: &str) {}

    // -- Operations --

    fn visit_binary(
        &mut self,
        arena: &Arena,
        _op: BinaryOp,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) {
        self.visit_child(arena, left);
        self.visit_child(arena, right);
    }

    fn visit_ternary(
        &mut self,
        arena: &Arena,
        condition: Option<NodeId>,
        on_true: Option<NodeId>,
        on_false: Option<NodeId>,
    ) {
        self.visit_child(arena, condition);
        self.visit_child(arena, on_true);
        self.visit_child(arena, on_false);
    }

    fn visit_unary(&mut self, arena: &Arena, _op: UnaryOp, child: Option<NodeId>, _postfix: bool) {
        self.visit_child(arena, child);
    }

    fn visit_cast(&mut self, arena: &Arena, _target: ValueType, object: Option<NodeId>) {
        self.visit_child(arena, object);
    }

    // -- Calls and access --

    fn visit_function_call(
        &mut self,
        arena: &Arena,
        _name: &str,
        _source: CallSource,
        arguments: &[NodeId],
    ) {
        for &argument in arguments {
            self.visit_node(arena, argument);
        }
    }

    fn visit_method_call(
        &mut self,
        arena: &Arena,
        _name: &str,
        object: Option<NodeId>,
        arguments: &[NodeId],
    ) {
        self.visit_child(arena, object);
        for &argument in arguments {
            self.visit_node(arena, argument);
        }
    }

    fn visit_member_access(&mut self, arena: &Arena, object: Option<NodeId>, _field: &str) {
        self.visit_child(arena, object);
    }

    fn visit_array_access(&mut self, arena: &Arena, object: Option<NodeId>, indices: &[Option<NodeId>]) {
        self.visit_child(arena, object);
        for &index in indices {
            self.visit_child(arena, index);
        }
    }
}

/// Dispatch `id` to the matching `visit_*` method.
///
/// Ids outside the arena are treated as empty slots.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, arena: &Arena, id: NodeId) {
    let Some(node) = arena.get(id) else {
        visitor.visit_missing();
        return;
    };
    match node {
        Node::FloatLiteral(value) => visitor.visit_float_literal(*value),
        Node::IntegerLiteral(value) => visitor.visit_integer_literal(*value),
        Node::BooleanLiteral(value) => visitor.visit_boolean_literal(*value),
        Node::Identifier(name) => visitor.visit_identifier(name),
        Node::Binary { op, left, right } => visitor.visit_binary(arena, *op, *left, *right),
        Node::Ternary {
            condition,
            on_true,
            on_false,
        } => visitor.visit_ternary(arena, *condition, *on_true, *on_false),
        Node::Unary { op, child, postfix } => visitor.visit_unary(arena, *op, *child, *postfix),
        Node::Cast { target, object } => visitor.visit_cast(arena, *target, *object),
        Node::FunctionCall {
            name,
            source,
            arguments,
        } => visitor.visit_function_call(arena, name, *source, arguments),
        Node::MethodCall {
            name,
            object,
            arguments,
            ..
        } => visitor.visit_method_call(arena, name, *object, arguments),
        Node::MemberAccess { object, field } => visitor.visit_member_access(arena, *object, field),
        Node::ArrayAccess { object, indices } => visitor.visit_array_access(arena, *object, indices),
    }
}
