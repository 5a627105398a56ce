//! AST node types for shader expressions.
//!
//! Nodes live in an [`Arena`](crate::arena::Arena) and refer to their
//! children by [`NodeId`]. Child slots are `Option` because the parser keeps
//! going after an error and may leave a slot empty; the validation pass in
//! [`validate`](crate::validate) reports any empty slot, so a tree from a
//! successful parse never has one.

use crate::token::TokenKind;
use crate::types::ValueType;
use std::fmt;

/// Index of a node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the node in allocation order.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // === Literals ===
    FloatLiteral(f32),
    IntegerLiteral(i32),
    BooleanLiteral(bool),

    /// Variable reference: `uv`
    Identifier(String),

    // === Operations ===
    /// `a + b`, `a && b`
    Binary {
        op: BinaryOp,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    /// `a ? b : c`
    Ternary {
        condition: Option<NodeId>,
        on_true: Option<NodeId>,
        on_false: Option<NodeId>,
    },
    /// `-a`, `!a`, `++a`, `a--`
    Unary {
        op: UnaryOp,
        child: Option<NodeId>,
        postfix: bool,
    },
    /// `(float)x`
    Cast {
        target: ValueType,
        object: Option<NodeId>,
    },

    // === Calls ===
    /// `sin(x)` or constructor-style `vec3(1, 2, 3)`
    FunctionCall {
        name: String,
        source: CallSource,
        arguments: Vec<NodeId>,
    },
    /// `v.normalize()`: a call bound to a receiver.
    MethodCall {
        name: String,
        source: CallSource,
        object: Option<NodeId>,
        arguments: Vec<NodeId>,
    },

    // === Access ===
    /// `v.xyz`
    MemberAccess { object: Option<NodeId>, field: String },
    /// `m[i][j]`: every consecutive bracket pair folds into one node.
    ArrayAccess {
        object: Option<NodeId>,
        indices: Vec<Option<NodeId>>,
    },
}

impl Node {
    /// Whether this node may be the operand of `++` / `--`.
    #[inline]
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            Node::Identifier(_) | Node::MemberAccess { .. } | Node::ArrayAccess { .. }
        )
    }

    /// Child slots in source order, empty ones included.
    pub fn child_slots(&self) -> Vec<Option<NodeId>> {
        match self {
            Node::FloatLiteral(_)
            | Node::IntegerLiteral(_)
            | Node::BooleanLiteral(_)
            | Node::Identifier(_) => Vec::new(),
            Node::Binary { left, right, .. } => vec![*left, *right],
            Node::Ternary {
                condition,
                on_true,
                on_false,
            } => vec![*condition, *on_true, *on_false],
            Node::Unary { child, .. } => vec![*child],
            Node::Cast { object, .. } | Node::MemberAccess { object, .. } => vec![*object],
            Node::FunctionCall { arguments, .. } => arguments.iter().copied().map(Some).collect(),
            Node::MethodCall {
                object, arguments, ..
            } => std::iter::once(*object)
                .chain(arguments.iter().copied().map(Some))
                .collect(),
            Node::ArrayAccess { object, indices } => std::iter::once(*object)
                .chain(indices.iter().copied())
                .collect(),
        }
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::FloatLiteral(_) => "float literal",
            Node::IntegerLiteral(_) => "integer literal",
            Node::BooleanLiteral(_) => "boolean literal",
            Node::Identifier(_) => "identifier",
            Node::Binary { .. } => "binary expression",
            Node::Ternary { .. } => "ternary expression",
            Node::Unary { .. } => "unary expression",
            Node::Cast { .. } => "cast",
            Node::FunctionCall { .. } => "function call",
            Node::MethodCall { .. } => "method call",
            Node::MemberAccess { .. } => "member access",
            Node::ArrayAccess { .. } => "array access",
        }
    }
}

/// What a call was spelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSource {
    /// A plain identifier: `max(a, b)`
    Identifier,
    /// A type keyword used as a constructor: `float3(a, b, c)`
    Type(ValueType),
}

impl CallSource {
    /// The constructed type, for constructor-style calls.
    pub fn constructed_type(self) -> Option<ValueType> {
        match self {
            CallSource::Identifier => None,
            CallSource::Type(ty) => Some(ty),
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Multiplicative
    Mul, // *
    Div, // /
    Mod, // %

    // Additive
    Add, // +
    Sub, // -

    // Shift
    Shl, // <<
    Shr, // >>

    // Relational
    Lt,   // <
    Gt,   // >
    LtEq, // <=
    GtEq, // >=

    // Equality
    Eq,    // ==
    NotEq, // !=

    // Bitwise
    BitAnd, // &
    BitXor, // ^
    BitOr,  // |

    // Logical
    And, // &&
    Or,  // ||
}

impl BinaryOp {
    /// Number of binary operators.
    pub const COUNT: usize = 18;

    /// Every operator, in declaration order.
    pub const ALL: [BinaryOp; Self::COUNT] = [
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::LtEq,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::BitAnd,
        BinaryOp::BitXor,
        BinaryOp::BitOr,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    /// The operator a token spells, if it is a binary operator.
    pub fn from_token(kind: &TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::LtLt => Some(BinaryOp::Shl),
            TokenKind::GtGt => Some(BinaryOp::Shr),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::BangEq => Some(BinaryOp::NotEq),
            TokenKind::Amp => Some(BinaryOp::BitAnd),
            TokenKind::Caret => Some(BinaryOp::BitXor),
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }

    /// Dense index, for tables keyed by operator.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Comparison and logical operators produce a boolean.
    pub const fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
                | BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::And
                | BinaryOp::Or
        )
    }
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,      // +
    Minus,     // -
    Not,       // !
    BitNot,    // ~
    Increment, // ++
    Decrement, // --
}

impl UnaryOp {
    /// Prefix operators that apply to any value.
    pub fn prefix_from_token(kind: &TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        }
    }

    /// `++` / `--`, which need an lvalue operand.
    pub fn update_from_token(kind: &TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::PlusPlus => Some(UnaryOp::Increment),
            TokenKind::MinusMinus => Some(UnaryOp::Decrement),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }

    pub const fn is_update(self) -> bool {
        matches!(self, UnaryOp::Increment | UnaryOp::Decrement)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
