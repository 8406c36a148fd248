// Crema - Semantic analysis for a small statically-typed imperative language
//
// Copyright (C) 2026 Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Type descriptors for the Crema language.
//!
//! Every declaration and every well-typed expression carries a
//! [`TypeDescriptor`]: a base type paired with a multiplicity
//! (scalar or list). Two descriptors are equal iff both parts are equal;
//! there is no subtyping, widening or implicit conversion.

use std::fmt;

/// The base of a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// Signed integer.
    Int,
    /// Double precision floating point number.
    Double,
    /// Single character.
    Char,
    /// Text string.
    String,
    /// Boolean value.
    Bool,
    /// No value (return type of procedures).
    Void,
    /// A user-defined structure, identified by name.
    Struct(String),
}

impl BaseType {
    /// Get the structure name if this is a structure type.
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            BaseType::Struct(name) => Some(name),
            _ => None,
        }
    }

    /// Get a human-readable name for this base type.
    pub fn name(&self) -> &str {
        match self {
            BaseType::Int => "int",
            BaseType::Double => "double",
            BaseType::Char => "char",
            BaseType::String => "string",
            BaseType::Bool => "bool",
            BaseType::Void => "void",
            BaseType::Struct(name) => name,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Struct(name) => write!(f, "struct {}", name),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Whether a value is a single element or a homogeneous list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    Scalar,
    List,
}

/// A type in the Crema language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// The base type.
    pub base: BaseType,
    /// Scalar or list.
    pub multiplicity: Multiplicity,
}

impl TypeDescriptor {
    /// Create a scalar descriptor.
    pub fn scalar_of(base: BaseType) -> Self {
        Self {
            base,
            multiplicity: Multiplicity::Scalar,
        }
    }

    /// Create a list descriptor.
    pub fn list_of(base: BaseType) -> Self {
        Self {
            base,
            multiplicity: Multiplicity::List,
        }
    }

    /// Create a descriptor from a declared element count.
    ///
    /// A count of one declares a scalar, anything larger a list.
    pub fn from_count(base: BaseType, count: usize) -> Self {
        if count > 1 {
            Self::list_of(base)
        } else {
            Self::scalar_of(base)
        }
    }

    /// The `void` descriptor.
    pub fn void() -> Self {
        Self::scalar_of(BaseType::Void)
    }

    /// The scalar `int` descriptor.
    pub fn int() -> Self {
        Self::scalar_of(BaseType::Int)
    }

    /// The scalar `bool` descriptor.
    pub fn bool() -> Self {
        Self::scalar_of(BaseType::Bool)
    }

    /// A scalar structure descriptor.
    pub fn structure(name: impl Into<String>) -> Self {
        Self::scalar_of(BaseType::Struct(name.into()))
    }

    /// Check if this is a list type.
    pub fn is_list(&self) -> bool {
        self.multiplicity == Multiplicity::List
    }

    /// Check if this is the `void` type.
    pub fn is_void(&self) -> bool {
        self.base == BaseType::Void && self.multiplicity == Multiplicity::Scalar
    }

    /// Check if this is a scalar `int` or `double`.
    pub fn is_numeric(&self) -> bool {
        self.multiplicity == Multiplicity::Scalar
            && matches!(self.base, BaseType::Int | BaseType::Double)
    }

    /// Get the element type if this is a list.
    pub fn element_type(&self) -> Option<TypeDescriptor> {
        if self.is_list() {
            Some(Self::scalar_of(self.base.clone()))
        } else {
            None
        }
    }

    /// Get the structure name if this is a scalar structure.
    pub fn struct_name(&self) -> Option<&str> {
        match self.multiplicity {
            Multiplicity::Scalar => self.base.struct_name(),
            Multiplicity::List => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.multiplicity {
            Multiplicity::Scalar => write!(f, "{}", self.base),
            Multiplicity::List => write!(f, "{}[]", self.base),
        }
    }
}

/// Render an inferred type, where `None` marks an ill-typed expression.
pub fn describe(inferred: &Option<TypeDescriptor>) -> String {
    match inferred {
        Some(ty) => ty.to_string(),
        None => "<ill-typed>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(TypeDescriptor::int(), TypeDescriptor::scalar_of(BaseType::Int));
        assert_ne!(TypeDescriptor::int(), TypeDescriptor::list_of(BaseType::Int));
        assert_ne!(
            TypeDescriptor::structure("Point"),
            TypeDescriptor::structure("Vector")
        );
    }

    #[test]
    fn test_from_count() {
        assert!(!TypeDescriptor::from_count(BaseType::Int, 1).is_list());
        assert!(TypeDescriptor::from_count(BaseType::Int, 5).is_list());
    }

    #[test]
    fn test_void_is_not_a_list() {
        assert!(TypeDescriptor::void().is_void());
        assert!(!TypeDescriptor::list_of(BaseType::Void).is_void());
    }

    #[test]
    fn test_numeric_types() {
        assert!(TypeDescriptor::int().is_numeric());
        assert!(TypeDescriptor::scalar_of(BaseType::Double).is_numeric());
        assert!(!TypeDescriptor::list_of(BaseType::Int).is_numeric());
        assert!(!TypeDescriptor::bool().is_numeric());
        assert!(!TypeDescriptor::structure("Point").is_numeric());
    }

    #[test]
    fn test_element_type() {
        let list = TypeDescriptor::list_of(BaseType::Char);
        assert_eq!(
            list.element_type(),
            Some(TypeDescriptor::scalar_of(BaseType::Char))
        );
        assert_eq!(TypeDescriptor::int().element_type(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeDescriptor::int().to_string(), "int");
        assert_eq!(TypeDescriptor::list_of(BaseType::Bool).to_string(), "bool[]");
        assert_eq!(TypeDescriptor::structure("Point").to_string(), "struct Point");
        assert_eq!(describe(&None), "<ill-typed>");
    }
}
