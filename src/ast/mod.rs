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

//! Abstract Syntax Tree for the Crema language.
//!
//! This module defines the data structures the parser hands to the
//! semantic analyzer. The analyzer never mutates them.

mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use crate::error::Span;

/// A complete Crema program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level items, in source order.
    pub items: Vec<TopLevelItem>,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level item to the program.
    pub fn add_item(&mut self, item: TopLevelItem) {
        self.items.push(item);
    }

    /// Iterate over the function declarations of the program.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
            TopLevelItem::Function(func) => Some(func),
            _ => None,
        })
    }

    /// Iterate over the structure declarations of the program.
    pub fn structures(&self) -> impl Iterator<Item = &StructDecl> {
        self.items.iter().filter_map(|item| match item {
            TopLevelItem::Structure(decl) => Some(decl),
            _ => None,
        })
    }
}

/// A top-level item in a program.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelItem {
    /// A function declaration.
    Function(FunctionDecl),
    /// A structure declaration.
    Structure(StructDecl),
    /// A statement executed at program level.
    Statement(Statement),
}

/// A block of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The statements in this block.
    pub statements: Vec<Statement>,
    /// The source span of this block.
    pub span: Span,
}

impl Block {
    /// Create a new block.
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    /// Create an empty block.
    pub fn empty(span: Span) -> Self {
        Self {
            statements: Vec::new(),
            span,
        }
    }

    /// Check if this block is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
