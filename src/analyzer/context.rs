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

//! Semantic context for the analyzer.
//!
//! The context is the single piece of mutable state threaded through one
//! analysis pass: the stack of variable scopes (each paired with the return
//! type expected inside it) and the global function and structure tables.
//! One context exists per compilation unit; nothing here is global.

use std::borrow::Cow;

use tracing::debug;

use super::scope::Scope;
use super::symbol_table::SymbolTable;
use crate::ast::{FunctionDecl, StructDecl, TypeDescriptor, VarDecl};

/// State of one semantic analysis pass.
#[derive(Debug, Default)]
pub struct SemanticContext<'a> {
    /// The scope stack (innermost scope last).
    scopes: Vec<Scope<'a>>,
    /// Global function table.
    functions: SymbolTable<'a, FunctionDecl>,
    /// Global structure table.
    structures: SymbolTable<'a, StructDecl>,
}

impl<'a> SemanticContext<'a> {
    /// Create a context with no open scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope whose `return` statements must produce `expected_return`.
    pub fn open_scope(&mut self, expected_return: TypeDescriptor) {
        self.scopes.push(Scope::new(expected_return));
        debug!(depth = self.depth(), "opened scope");
    }

    /// Open a scope inheriting the enclosing expected return type.
    pub fn open_nested_scope(&mut self) {
        let inherited = self
            .expected_return()
            .cloned()
            .unwrap_or_else(TypeDescriptor::void);
        self.open_scope(inherited);
    }

    /// Close the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open; every close must match an earlier open.
    pub fn close_scope(&mut self) {
        let scope = self
            .scopes
            .pop()
            .expect("close_scope called without a matching open_scope");
        debug!(
            depth = self.scopes.len(),
            variables = scope.len(),
            "closed scope"
        );
    }

    /// Current scope depth (`-1` when no scope is open).
    pub fn depth(&self) -> isize {
        self.scopes.len() as isize - 1
    }

    /// Number of open scopes.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// The return type expected in the innermost scope.
    pub fn expected_return(&self) -> Option<&TypeDescriptor> {
        self.scopes.last().map(Scope::expected_return)
    }

    /// Declare a variable in the innermost scope.
    ///
    /// Only the innermost scope is searched for a collision, so a
    /// declaration may shadow one from an enclosing scope. On collision the
    /// existing declaration is returned and nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn declare_variable(&mut self, decl: &'a VarDecl) -> Result<(), &VarDecl> {
        self.insert_variable(Cow::Borrowed(decl))
    }

    /// Declare a variable the analyzer synthesized itself (e.g. a loop
    /// variable) in the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn bind_variable(&mut self, decl: VarDecl) -> Result<(), &VarDecl> {
        self.insert_variable(Cow::Owned(decl))
    }

    fn insert_variable(&mut self, decl: Cow<'a, VarDecl>) -> Result<(), &VarDecl> {
        debug!(name = %decl.name, ty = %decl.var_type, "declaring variable");
        self.scopes
            .last_mut()
            .expect("variable declared with no open scope")
            .declare(decl)
    }

    /// Look a variable up in the innermost scope only.
    pub fn lookup_innermost(&self, name: &str) -> Option<&VarDecl> {
        self.scopes.last().and_then(|scope| scope.lookup(name))
    }

    /// Resolve a variable, searching from the innermost to the outermost scope.
    pub fn resolve_variable(&self, name: &str) -> Option<&VarDecl> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Register a function in the global function table.
    pub fn declare_function(&mut self, decl: &'a FunctionDecl) -> Result<(), &'a FunctionDecl> {
        self.functions.define(decl)?;
        debug!(name = %decl.name, "declared function");
        Ok(())
    }

    /// Resolve a function by name.
    pub fn resolve_function(&self, name: &str) -> Option<&'a FunctionDecl> {
        self.functions.lookup(name)
    }

    /// Register a structure in the global structure table.
    pub fn declare_structure(&mut self, decl: &'a StructDecl) -> Result<(), &'a StructDecl> {
        self.structures.define(decl)?;
        debug!(name = %decl.name, "declared structure");
        Ok(())
    }

    /// Resolve a structure by name.
    pub fn resolve_structure(&self, name: &str) -> Option<&'a StructDecl> {
        self.structures.lookup(name)
    }

    /// The global function table.
    pub fn functions(&self) -> &SymbolTable<'a, FunctionDecl> {
        &self.functions
    }

    /// The global structure table.
    pub fn structures(&self) -> &SymbolTable<'a, StructDecl> {
        &self.structures
    }

    /// Give up the global tables once analysis is over.
    pub(crate) fn into_tables(
        self,
    ) -> (
        SymbolTable<'a, FunctionDecl>,
        SymbolTable<'a, StructDecl>,
    ) {
        (self.functions, self.structures)
    }
}
