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

//! Variable scopes for the semantic analyzer.
//!
//! A scope represents a lexical region where variables are declared.
//! Scopes are nested on the [`SemanticContext`](super::SemanticContext)
//! stack to support block-level declarations and shadowing.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::ast::{TypeDescriptor, VarDecl};

/// A single variable scope.
///
/// Declarations are borrowed from the AST, except for bindings the
/// analyzer synthesizes itself (loop variables).
#[derive(Debug)]
pub struct Scope<'a> {
    /// Variables declared in this scope, in declaration order.
    variables: IndexMap<String, Cow<'a, VarDecl>>,
    /// The type a `return` inside this scope must produce.
    expected_return: TypeDescriptor,
}

impl<'a> Scope<'a> {
    /// Create a new empty scope.
    pub fn new(expected_return: TypeDescriptor) -> Self {
        Self {
            variables: IndexMap::new(),
            expected_return,
        }
    }

    /// Declare a variable in this scope.
    ///
    /// Returns the existing declaration on collision, leaving the scope
    /// untouched.
    pub fn declare(&mut self, decl: Cow<'a, VarDecl>) -> Result<(), &VarDecl> {
        if self.variables.contains_key(&decl.name) {
            return Err(&*self.variables[&decl.name]);
        }
        self.variables.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Look up a variable in this scope.
    pub fn lookup(&self, name: &str) -> Option<&VarDecl> {
        self.variables.get(name).map(|decl| &**decl)
    }

    /// The expected return type of this scope.
    pub fn expected_return(&self) -> &TypeDescriptor {
        &self.expected_return
    }

    /// Number of variables declared in this scope.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Check if nothing was declared in this scope.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Span;

    #[test]
    fn test_duplicate_is_rejected_without_mutation() {
        let first = VarDecl::new("x", TypeDescriptor::int(), Span::new(0, 1));
        let second = VarDecl::new("x", TypeDescriptor::bool(), Span::new(5, 6));

        let mut scope = Scope::new(TypeDescriptor::void());
        assert!(scope.declare(Cow::Borrowed(&first)).is_ok());

        let existing = scope.declare(Cow::Owned(second)).unwrap_err();
        assert_eq!(existing.span, Span::new(0, 1));
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.lookup("x").unwrap().var_type, TypeDescriptor::int());
    }
}
