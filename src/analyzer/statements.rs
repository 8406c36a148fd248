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

//! Statement analysis for the semantic analyzer.
//!
//! This module provides statement analysis functionality:
//! - Blocks (one scope each, fail-fast)
//! - Variable declarations and assignments
//! - Return statements
//! - If and foreach statements

use super::expressions::ExpressionAnalyzer;
use super::options::SelfReference;
use super::structures::StructureAnalyzer;
use super::type_check::{matches, TypeInference};
use super::{duplicate, mismatch, unresolved, Analyzer};
use crate::ast::{
    AssignTarget, Assignment, Block, Expr, ForeachStatement, IfStatement, Statement,
    StatementKind, TypeDescriptor, VarDecl,
};
use crate::error::{
    CompileError, MismatchContext, Namespace, Result, SemanticError, Span, ValueUsage,
};

/// Extension trait for statement analysis.
pub trait StatementAnalyzer<'a> {
    /// Analyze a block in its own scope, stopping at the first failure.
    fn check_block(&mut self, block: &'a Block) -> Result<()>;

    /// Analyze a statement.
    fn check_statement(&mut self, stmt: &'a Statement) -> Result<()>;

    /// Analyze a variable declaration.
    fn check_var_decl(&mut self, decl: &'a VarDecl) -> Result<()>;

    /// Analyze the initializer of a variable declaration, if any.
    fn check_initializer(&self, decl: &VarDecl) -> Result<()>;

    /// Analyze an assignment statement.
    fn check_assignment(&mut self, assign: &'a Assignment) -> Result<()>;

    /// Analyze a return statement against the innermost expected return type.
    fn check_return(&mut self, value: Option<&'a Expr>, span: &Span) -> Result<()>;

    /// Analyze an if statement.
    fn check_if(&mut self, if_stmt: &'a IfStatement) -> Result<()>;

    /// Analyze a foreach loop.
    fn check_foreach(&mut self, foreach: &'a ForeachStatement) -> Result<()>;
}

impl<'a> StatementAnalyzer<'a> for Analyzer<'a> {
    fn check_block(&mut self, block: &'a Block) -> Result<()> {
        self.in_nested_scope(|this| {
            for stmt in &block.statements {
                this.check_statement(stmt)?;
            }
            Ok(())
        })
    }

    fn check_statement(&mut self, stmt: &'a Statement) -> Result<()> {
        match &stmt.kind {
            StatementKind::VarDecl(decl) => self.check_var_decl(decl),
            StatementKind::Assignment(assign) => self.check_assignment(assign),
            StatementKind::If(if_stmt) => self.check_if(if_stmt),
            StatementKind::Foreach(foreach) => self.check_foreach(foreach),
            StatementKind::Return(value) => self.check_return(value.as_ref(), &stmt.span),
            StatementKind::Block(block) => self.check_block(block),
            StatementKind::Expression(expr) => self.check_expression(expr),
        }
    }

    fn check_var_decl(&mut self, decl: &'a VarDecl) -> Result<()> {
        self.check_value_type(&decl.var_type, ValueUsage::Variable, &decl.span)?;

        match self.options.self_reference {
            SelfReference::Reject => {
                // Duplicates are reported first; the new binding stays
                // hidden from its own initializer
                if let Some(existing) = self.ctx.lookup_innermost(&decl.name) {
                    return Err(duplicate(
                        Namespace::Variable,
                        &decl.name,
                        &decl.span,
                        &existing.span,
                    ));
                }
                self.check_initializer(decl)?;
                self.declare_variable(decl)
            }
            SelfReference::Allow => {
                self.declare_variable(decl)?;
                self.check_initializer(decl)
            }
        }
    }

    fn check_initializer(&self, decl: &VarDecl) -> Result<()> {
        let Some(init) = &decl.initializer else {
            return Ok(());
        };

        self.check_expression(init)?;
        let init_type = self.ctx.type_of(init);
        if !matches(&init_type, &decl.var_type) {
            return Err(mismatch(
                MismatchContext::Initializer {
                    variable: decl.name.clone(),
                },
                Some(decl.var_type.clone()),
                init_type,
                &init.span,
            ));
        }
        Ok(())
    }

    fn check_assignment(&mut self, assign: &'a Assignment) -> Result<()> {
        let name = assign.target.variable();
        let var_type = self
            .ctx
            .resolve_variable(name)
            .map(|decl| decl.var_type.clone())
            .ok_or_else(|| {
                unresolved(Namespace::Variable, name, &assign.span)
                    .with_hint("Variables must be declared before they are assigned")
            })?;

        let target_type = match &assign.target {
            AssignTarget::Variable(_) => var_type,
            AssignTarget::Element { index, .. } => {
                self.check_index(index)?;
                var_type.element_type().ok_or_else(|| {
                    CompileError::new(
                        SemanticError::NotAList {
                            actual: Some(var_type.clone()),
                        },
                        assign.span.clone(),
                    )
                })?
            }
            AssignTarget::Field { field, .. } => {
                self.field_type(&Some(var_type), field, &assign.span)?
            }
        };

        self.check_expression(&assign.value)?;
        let value_type = self.ctx.type_of(&assign.value);
        if !matches(&value_type, &target_type) {
            return Err(mismatch(
                MismatchContext::Assignment {
                    target: name.to_string(),
                },
                Some(target_type),
                value_type,
                &assign.value.span,
            ));
        }
        Ok(())
    }

    fn check_return(&mut self, value: Option<&'a Expr>, span: &Span) -> Result<()> {
        let value_type = match value {
            Some(expr) => {
                self.check_expression(expr)?;
                self.ctx.type_of(expr)
            }
            None => Some(TypeDescriptor::void()),
        };

        let expected = self
            .ctx
            .expected_return()
            .cloned()
            .unwrap_or_else(TypeDescriptor::void);
        if !matches(&value_type, &expected) {
            return Err(mismatch(
                MismatchContext::Return,
                Some(expected),
                value_type,
                span,
            ));
        }
        Ok(())
    }

    fn check_if(&mut self, if_stmt: &'a IfStatement) -> Result<()> {
        self.check_expression(&if_stmt.condition)?;
        let condition_type = self.ctx.type_of(&if_stmt.condition);
        if !matches(&condition_type, &TypeDescriptor::bool()) {
            return Err(mismatch(
                MismatchContext::Condition,
                Some(TypeDescriptor::bool()),
                condition_type,
                &if_stmt.condition.span,
            ));
        }

        self.check_block(&if_stmt.then_block)?;
        if let Some(else_block) = &if_stmt.else_block {
            self.check_block(else_block)?;
        }
        Ok(())
    }

    fn check_foreach(&mut self, foreach: &'a ForeachStatement) -> Result<()> {
        self.check_expression(&foreach.list)?;
        let list_type = self.ctx.type_of(&foreach.list);
        let element_type = list_type
            .as_ref()
            .and_then(TypeDescriptor::element_type)
            .ok_or_else(|| {
                CompileError::new(
                    SemanticError::NotAList { actual: list_type.clone() },
                    foreach.list.span.clone(),
                )
            })?;

        // The loop variable gets a scope of its own around the body
        self.in_nested_scope(|this| {
            let binding = VarDecl::new(foreach.variable.clone(), element_type, foreach.span.clone());
            this.ctx.bind_variable(binding).map_err(|existing| {
                duplicate(
                    Namespace::Variable,
                    &foreach.variable,
                    &foreach.span,
                    &existing.span,
                )
            })?;
            this.check_block(&foreach.body)
        })
    }
}
