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

//! Statement and declaration AST nodes.

use crate::error::Span;

use super::{Block, Expr, TypeDescriptor};

/// A statement in the Crema language.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The kind of statement.
    pub kind: StatementKind,
    /// The source span of this statement.
    pub span: Span,
}

impl Statement {
    /// Create a new statement.
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// A variable declaration.
    VarDecl(VarDecl),

    /// An assignment statement.
    Assignment(Assignment),

    /// An if statement.
    If(IfStatement),

    /// A foreach loop over a list.
    Foreach(ForeachStatement),

    /// A return statement.
    Return(Option<Expr>),

    /// A nested block.
    Block(Block),

    /// An expression statement (function call as statement).
    Expression(Expr),
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The variable name.
    pub name: String,
    /// The declared type.
    pub var_type: TypeDescriptor,
    /// Optional initial value.
    pub initializer: Option<Expr>,
    /// The source span.
    pub span: Span,
}

impl VarDecl {
    /// Create a new variable declaration.
    pub fn new(name: impl Into<String>, var_type: TypeDescriptor, span: Span) -> Self {
        Self {
            name: name.into(),
            var_type,
            initializer: None,
            span,
        }
    }

    /// Add an initializer to this declaration.
    pub fn with_initializer(mut self, expr: Expr) -> Self {
        self.initializer = Some(expr);
        self
    }
}

/// An assignment statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The target (variable, list element or structure field).
    pub target: AssignTarget,
    /// The value being assigned.
    pub value: Expr,
    /// The source span.
    pub span: Span,
}

/// The target of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// A simple variable.
    Variable(String),
    /// A list element.
    Element { name: String, index: Box<Expr> },
    /// A structure field.
    Field { name: String, field: String },
}

impl AssignTarget {
    /// The variable the assignment writes through.
    pub fn variable(&self) -> &str {
        match self {
            AssignTarget::Variable(name)
            | AssignTarget::Element { name, .. }
            | AssignTarget::Field { name, .. } => name,
        }
    }
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition.
    pub condition: Expr,
    /// The then block.
    pub then_block: Block,
    /// Optional else block.
    pub else_block: Option<Block>,
    /// The source span.
    pub span: Span,
}

/// A foreach loop (`foreach (xs as x) { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct ForeachStatement {
    /// The list being iterated.
    pub list: Expr,
    /// The name bound to each element.
    pub variable: String,
    /// The loop body.
    pub body: Block,
    /// The source span.
    pub span: Span,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name.
    pub name: String,
    /// The declared return type (`void` for procedures).
    pub return_type: TypeDescriptor,
    /// The parameters, in order.
    pub params: Vec<VarDecl>,
    /// The function body.
    pub body: Block,
    /// The source span.
    pub span: Span,
}

impl FunctionDecl {
    /// The declared parameter types, in order.
    pub fn param_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.params.iter().map(|p| &p.var_type)
    }
}

/// A structure declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    /// The structure name.
    pub name: String,
    /// The fields, in declaration order.
    pub fields: Vec<FieldDecl>,
    /// The source span.
    pub span: Span,
}

impl StructDecl {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field of a structure declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// The field name.
    pub name: String,
    /// The field type.
    pub field_type: TypeDescriptor,
    /// The source span.
    pub span: Span,
}
