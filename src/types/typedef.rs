//! Type specifications
//!
//! A [`TypeSpec`] is the resolved type of a leaf as the linker hands it
//! over: a built-in kind, a reference to a typedef, a leafref whose
//! effective type is already known, or an ordered union. Converting a
//! literal walks this indirection down to a built-in kind and applies
//! every range restriction met on the way.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::SourceLocation;
use crate::types::builtins::{BuiltinType, NativeRepr};
use crate::types::range::RangeRestriction;
use crate::types::values::TypedValue;
use std::sync::Arc;

// =============================================================================
// Typedef
// =============================================================================

/// A named type definition with exactly one base type
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    base: TypeSpec,
    range: Option<RangeRestriction>,
    location: Option<SourceLocation>,
}

impl TypeDef {
    /// Create a typedef over a base type
    pub fn new(name: impl Into<String>, base: TypeSpec) -> Self {
        Self {
            name: name.into(),
            base,
            range: None,
            location: None,
        }
    }

    /// Set the declaring location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Layer a range restriction on this typedef
    ///
    /// The range must be equal to or narrower than whatever the base type
    /// already allows.
    pub fn with_range(mut self, expression: &str) -> Result<Self> {
        let range = restrict(&self.base, expression, self.location.as_ref())?;
        self.range = Some(range);
        Ok(self)
    }

    /// Typedef name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The single base type
    pub fn base(&self) -> &TypeSpec {
        &self.base
    }

    /// Range restriction declared on this typedef
    pub fn range(&self) -> Option<&RangeRestriction> {
        self.range.as_ref()
    }

    /// Effective range: this typedef's own, else the base type's
    pub fn effective_range(&self) -> Option<&RangeRestriction> {
        self.range.as_ref().or_else(|| self.base.effective_range())
    }

    fn parse_at(&self, raw: &str, depth: usize, limits: &Limits) -> Result<TypedValue> {
        let value = self.base.parse_at(raw, depth, limits)?;
        if let Some(range) = &self.range {
            range.validate(&value)?;
        }
        Ok(value)
    }
}

fn restrict(
    base: &TypeSpec,
    expression: &str,
    location: Option<&SourceLocation>,
) -> Result<RangeRestriction> {
    let kind = base.effective_builtin();
    let range = RangeRestriction::parse(expression, kind, base.effective_range())?;
    Ok(match location {
        Some(loc) => range.with_location(loc.clone()),
        None => range,
    })
}

// =============================================================================
// Type specification
// =============================================================================

/// Resolved type of a leaf, leaf-list or typedef
#[derive(Debug, Clone)]
pub enum TypeSpec {
    /// A built-in kind, optionally range restricted
    Builtin {
        /// The built-in kind
        kind: BuiltinType,
        /// Range restriction on the kind
        range: Option<RangeRestriction>,
    },
    /// Reference to a typedef, optionally narrowed further
    Derived {
        /// The referred typedef
        typedef: Arc<TypeDef>,
        /// Range restriction layered at the point of use
        range: Option<RangeRestriction>,
    },
    /// Leafref with the effective type the linker resolved for its path
    Leafref {
        /// The leafref path, kept for presentation
        path: String,
        /// Type of the referred leaf
        effective: Box<TypeSpec>,
    },
    /// Ordered union of member types
    Union(Vec<TypeSpec>),
}

impl TypeSpec {
    /// Unrestricted built-in type
    pub fn builtin(kind: BuiltinType) -> Self {
        TypeSpec::Builtin { kind, range: None }
    }

    /// Reference to a typedef
    pub fn derived(typedef: Arc<TypeDef>) -> Self {
        TypeSpec::Derived {
            typedef,
            range: None,
        }
    }

    /// Leafref with an already resolved effective type
    pub fn leafref(path: impl Into<String>, effective: TypeSpec) -> Self {
        TypeSpec::Leafref {
            path: path.into(),
            effective: Box::new(effective),
        }
    }

    /// Union of member types, tried in the given order
    pub fn union(members: Vec<TypeSpec>) -> Self {
        TypeSpec::Union(members)
    }

    /// Layer a range restriction at the point of use
    pub fn with_range(self, expression: &str) -> Result<Self> {
        let range = restrict(&self, expression, None)?;
        match self {
            TypeSpec::Builtin { kind, .. } => Ok(TypeSpec::Builtin {
                kind,
                range: Some(range),
            }),
            TypeSpec::Derived { typedef, .. } => Ok(TypeSpec::Derived {
                typedef,
                range: Some(range),
            }),
            other => Err(Error::LiteralFormat(format!(
                "type {} does not admit a range restriction",
                other.data_type()
            ))),
        }
    }

    /// Declared data type of this specification
    pub fn data_type(&self) -> BuiltinType {
        match self {
            TypeSpec::Builtin { kind, .. } => *kind,
            TypeSpec::Derived { .. } => BuiltinType::Derived,
            TypeSpec::Leafref { .. } => BuiltinType::Leafref,
            TypeSpec::Union(_) => BuiltinType::Union,
        }
    }

    /// Built-in type reached after following derivation and leafrefs
    ///
    /// Unions stay unions.
    pub fn effective_builtin(&self) -> BuiltinType {
        match self {
            TypeSpec::Builtin { kind, .. } => *kind,
            TypeSpec::Derived { typedef, .. } => typedef.base().effective_builtin(),
            TypeSpec::Leafref { effective, .. } => effective.effective_builtin(),
            TypeSpec::Union(_) => BuiltinType::Union,
        }
    }

    /// Narrowest range restriction in force for this specification
    pub fn effective_range(&self) -> Option<&RangeRestriction> {
        match self {
            TypeSpec::Builtin { range, .. } => range.as_ref(),
            TypeSpec::Derived { typedef, range } => {
                range.as_ref().or_else(|| typedef.effective_range())
            }
            TypeSpec::Leafref { effective, .. } => effective.effective_range(),
            TypeSpec::Union(_) => None,
        }
    }

    /// Native representation, following leafrefs and typedefs
    pub fn native_repr(&self) -> NativeRepr {
        match self {
            TypeSpec::Builtin { kind, .. } => kind.native_repr(),
            TypeSpec::Derived { typedef, .. } => typedef.base().native_repr(),
            TypeSpec::Leafref { effective, .. } => effective.native_repr(),
            TypeSpec::Union(_) => NativeRepr::Indirect,
        }
    }

    /// Convert a literal into a typed value
    pub fn parse_value(&self, raw: &str) -> Result<TypedValue> {
        self.parse_value_with(raw, &Limits::default())
    }

    /// Convert a literal into a typed value under explicit limits
    pub fn parse_value_with(&self, raw: &str, limits: &Limits) -> Result<TypedValue> {
        self.parse_at(raw, 0, limits)
    }

    fn parse_at(&self, raw: &str, depth: usize, limits: &Limits) -> Result<TypedValue> {
        limits.check_derivation_depth(depth)?;
        match self {
            TypeSpec::Builtin { kind, range } => {
                let value = TypedValue::parse(raw, *kind)?;
                if let Some(range) = range {
                    range.validate(&value)?;
                }
                Ok(value)
            }
            TypeSpec::Derived { typedef, range } => {
                let value = typedef.parse_at(raw, depth + 1, limits)?;
                if let Some(range) = range {
                    range.validate(&value)?;
                }
                Ok(value)
            }
            TypeSpec::Leafref { effective, .. } => effective.parse_at(raw, depth + 1, limits),
            TypeSpec::Union(members) => {
                for member in members {
                    match member.parse_at(raw, depth + 1, limits) {
                        Ok(value) => return Ok(value),
                        Err(e @ Error::LimitExceeded(_)) => return Err(e),
                        Err(_) => continue,
                    }
                }
                Err(Error::NoUnionMemberMatched(format!(
                    "value '{}' matched none of the {} member types",
                    raw,
                    members.len()
                )))
            }
        }
    }
}
