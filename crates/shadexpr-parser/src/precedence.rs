//! Binary operator precedence levels.
//!
//! Lower levels bind tighter. The parser climbs from [`MAX_LEVEL`] down to
//! level 0 (elementary values), folding every operator of a level
//! left-associatively before descending.

use crate::ast::BinaryOp;
use crate::token::TokenKind;

/// The loosest binding level (`||`), where binary parsing starts.
pub const MAX_LEVEL: u8 = 10;

/// Level for every binary operator, indexed by [`BinaryOp::index`].
#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    levels: [u8; BinaryOp::COUNT],
    max_level: u8,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        let mut levels = [0u8; BinaryOp::COUNT];
        for op in BinaryOp::ALL {
            levels[op.index()] = match op {
                BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 1,
                BinaryOp::Add | BinaryOp::Sub => 2,
                BinaryOp::Shl | BinaryOp::Shr => 3,
                BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => 4,
                BinaryOp::Eq | BinaryOp::NotEq => 5,
                BinaryOp::BitAnd => 6,
                BinaryOp::BitXor => 7,
                BinaryOp::BitOr => 8,
                BinaryOp::And => 9,
                BinaryOp::Or => 10,
            };
        }
        let max_level = levels.iter().copied().max().unwrap_or(0);
        Self { levels, max_level }
    }

    /// Level of `op`.
    #[inline]
    pub fn level(&self, op: BinaryOp) -> u8 {
        self.levels[op.index()]
    }

    /// Level to start binary parsing from.
    #[inline]
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// The operator `kind` spells, if it binds at exactly `level`.
    pub fn operator_at(&self, kind: &TokenKind, level: u8) -> Option<BinaryOp> {
        BinaryOp::from_token(kind).filter(|&op| self.level(op) == level)
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self::new()
    }
}
