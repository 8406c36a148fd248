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

//! Global symbol tables for the semantic analyzer.
//!
//! Functions and structures live in flat, program-wide namespaces.
//! Each table enforces uniqueness of its own identifiers only.

use indexmap::IndexMap;

use crate::ast::{FunctionDecl, StructDecl};
use crate::error::Span;

/// A declaration that can be registered in a global table.
pub trait Declaration {
    /// The identifier the declaration is registered under.
    fn name(&self) -> &str;

    /// Where the declaration appears in the source.
    fn span(&self) -> &Span;
}

impl Declaration for FunctionDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn span(&self) -> &Span {
        &self.span
    }
}

impl Declaration for StructDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn span(&self) -> &Span {
        &self.span
    }
}

/// A flat table of global declarations, keyed by identifier.
#[derive(Debug)]
pub struct SymbolTable<'a, T> {
    entries: IndexMap<&'a str, &'a T>,
}

impl<'a, T: Declaration> SymbolTable<'a, T> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a declaration.
    ///
    /// Returns the existing declaration if the identifier is taken.
    pub fn define(&mut self, decl: &'a T) -> Result<(), &'a T> {
        if let Some(existing) = self.lookup(decl.name()) {
            return Err(existing);
        }
        self.entries.insert(decl.name(), decl);
        Ok(())
    }

    /// Look up a declaration by identifier.
    pub fn lookup(&self, name: &str) -> Option<&'a T> {
        self.entries.get(name).copied()
    }

    /// Iterate over the declarations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.entries.values().copied()
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T: Declaration> Default for SymbolTable<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}
