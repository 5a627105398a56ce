//! Built-in value types named by type keywords.
//!
//! The same enum tags type-keyword tokens, cast targets and constructor-style
//! calls, so a downstream generator never has to re-read a type name string.

use std::fmt;

/// A scalar, vector or matrix type spelled by a type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Float,
    Float2,
    Float3,
    Float4,
    Float2x2,
    Float3x3,
    Float4x4,
    Float4x3,
    Float4x2,
    Int,
    Int2,
    Int3,
    Int4,
    Uint,
    Uint2,
    Uint3,
    Uint4,
    Bool,
    Bool2,
    Bool3,
    Bool4,
}

impl ValueType {
    /// Look up a type keyword, accepting both HLSL and GLSL spellings.
    pub fn from_keyword(s: &str) -> Option<ValueType> {
        match s {
            "float" => Some(ValueType::Float),
            "float2" | "vec2" => Some(ValueType::Float2),
            "float3" | "vec3" => Some(ValueType::Float3),
            "float4" | "vec4" => Some(ValueType::Float4),
            "float2x2" | "mat2" | "mat2x2" => Some(ValueType::Float2x2),
            "float3x3" | "mat3" | "mat3x3" => Some(ValueType::Float3x3),
            "float4x4" | "mat4" | "mat4x4" => Some(ValueType::Float4x4),
            "float4x3" | "mat4x3" => Some(ValueType::Float4x3),
            "float4x2" | "mat4x2" => Some(ValueType::Float4x2),

            "int" => Some(ValueType::Int),
            "int2" | "ivec2" => Some(ValueType::Int2),
            "int3" | "ivec3" => Some(ValueType::Int3),
            "int4" | "ivec4" => Some(ValueType::Int4),

            "uint" => Some(ValueType::Uint),
            "uint2" | "uvec2" => Some(ValueType::Uint2),
            "uint3" | "uvec3" => Some(ValueType::Uint3),
            "uint4" | "uvec4" => Some(ValueType::Uint4),

            "bool" => Some(ValueType::Bool),
            "bool2" | "bvec2" => Some(ValueType::Bool2),
            "bool3" | "bvec3" => Some(ValueType::Bool3),
            "bool4" | "bvec4" => Some(ValueType::Bool4),

            _ => None,
        }
    }

    /// Canonical (HLSL-style) spelling.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Float2 => "float2",
            ValueType::Float3 => "float3",
            ValueType::Float4 => "float4",
            ValueType::Float2x2 => "float2x2",
            ValueType::Float3x3 => "float3x3",
            ValueType::Float4x4 => "float4x4",
            ValueType::Float4x3 => "float4x3",
            ValueType::Float4x2 => "float4x2",
            ValueType::Int => "int",
            ValueType::Int2 => "int2",
            ValueType::Int3 => "int3",
            ValueType::Int4 => "int4",
            ValueType::Uint => "uint",
            ValueType::Uint2 => "uint2",
            ValueType::Uint3 => "uint3",
            ValueType::Uint4 => "uint4",
            ValueType::Bool => "bool",
            ValueType::Bool2 => "bool2",
            ValueType::Bool3 => "bool3",
            ValueType::Bool4 => "bool4",
        }
    }

    /// The scalar type of each component.
    pub fn scalar(self) -> ValueType {
        match self {
            ValueType::Float
            | ValueType::Float2
            | ValueType::Float3
            | ValueType::Float4
            | ValueType::Float2x2
            | ValueType::Float3x3
            | ValueType::Float4x4
            | ValueType::Float4x3
            | ValueType::Float4x2 => ValueType::Float,
            ValueType::Int | ValueType::Int2 | ValueType::Int3 | ValueType::Int4 => ValueType::Int,
            ValueType::Uint | ValueType::Uint2 | ValueType::Uint3 | ValueType::Uint4 => {
                ValueType::Uint
            }
            ValueType::Bool | ValueType::Bool2 | ValueType::Bool3 | ValueType::Bool4 => {
                ValueType::Bool
            }
        }
    }

    pub fn is_scalar(self) -> bool {
        self.scalar() == self
    }

    pub fn is_matrix(self) -> bool {
        matches!(
            self,
            ValueType::Float2x2
                | ValueType::Float3x3
                | ValueType::Float4x4
                | ValueType::Float4x3
                | ValueType::Float4x2
        )
    }

    /// Total number of scalar components (columns * rows for matrices).
    pub fn component_count(self) -> u32 {
        match self {
            ValueType::Float | ValueType::Int | ValueType::Uint | ValueType::Bool => 1,
            ValueType::Float2 | ValueType::Int2 | ValueType::Uint2 | ValueType::Bool2 => 2,
            ValueType::Float3 | ValueType::Int3 | ValueType::Uint3 | ValueType::Bool3 => 3,
            ValueType::Float4 | ValueType::Int4 | ValueType::Uint4 | ValueType::Bool4 => 4,
            ValueType::Float2x2 => 4,
            ValueType::Float3x3 => 9,
            ValueType::Float4x4 => 16,
            ValueType::Float4x3 => 12,
            ValueType::Float4x2 => 8,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_synonyms() {
        assert_eq!(ValueType::from_keyword("vec3"), Some(ValueType::Float3));
        assert_eq!(ValueType::from_keyword("float3"), Some(ValueType::Float3));
        assert_eq!(ValueType::from_keyword("mat4"), Some(ValueType::Float4x4));
        assert_eq!(ValueType::from_keyword("ivec2"), Some(ValueType::Int2));
        assert_eq!(ValueType::from_keyword("uvec4"), Some(ValueType::Uint4));
        assert_eq!(ValueType::from_keyword("bvec2"), Some(ValueType::Bool2));
        assert_eq!(ValueType::from_keyword("vec5"), None);
        assert_eq!(ValueType::from_keyword("Float"), None);
    }

    #[test]
    fn test_canonical_name_round_trips() {
        for name in ["float", "float4x3", "int2", "uint", "bool4"] {
            let ty = ValueType::from_keyword(name).unwrap();
            assert_eq!(ty.name(), name);
        }
    }

    #[test]
    fn test_shape_queries() {
        assert_eq!(ValueType::Float4x3.component_count(), 12);
        assert_eq!(ValueType::Uint3.scalar(), ValueType::Uint);
        assert!(ValueType::Bool.is_scalar());
        assert!(!ValueType::Bool2.is_scalar());
        assert!(ValueType::Float2x2.is_matrix());
        assert!(!ValueType::Float4.is_matrix());
    }
}
