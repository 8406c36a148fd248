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

//! Function analysis for the semantic analyzer.
//!
//! This module provides function-related analysis:
//! - Function declarations (signature, body, recursion check)
//! - Function calls (arity and argument types)
//! - Return coverage for non-void functions

use tracing::debug;

use super::expressions::ExpressionAnalyzer;
use super::recursion::RecursionCheck;
use super::statements::StatementAnalyzer;
use super::structures::StructureAnalyzer;
use super::type_check::{matches, TypeInference};
use super::{duplicate, mismatch, unresolved, Analyzer};
use crate::ast::{Block, Expr, FunctionDecl, StatementKind};
use crate::error::{
    CompileError, MismatchContext, Namespace, Result, SemanticError, Span, ValueUsage,
};

/// Extension trait for function analysis.
pub trait FunctionAnalyzer<'a> {
    /// Analyze a function declaration.
    fn check_function(&mut self, func: &'a FunctionDecl) -> Result<()>;

    /// Analyze a function call.
    fn check_call(&self, name: &str, args: &[Expr], span: &Span) -> Result<()>;

    /// Check whether every path through a block ends in a `return`.
    fn block_has_return(&self, block: &Block) -> bool;
}

impl<'a> FunctionAnalyzer<'a> for Analyzer<'a> {
    #[tracing::instrument(skip_all, fields(function = %func.name))]
    fn check_function(&mut self, func: &'a FunctionDecl) -> Result<()> {
        // With hoisting the function is already in the table
        if !self.options.hoist_declarations {
            self.ctx.declare_function(func).map_err(|existing| {
                duplicate(Namespace::Function, &func.name, &func.span, &existing.span)
            })?;
        }

        self.check_declared_type(&func.return_type, &func.span)?;
        for param in &func.params {
            self.check_value_type(&param.var_type, ValueUsage::Parameter, &param.span)?;
        }

        self.in_scope(func.return_type.clone(), |this| {
            for param in &func.params {
                this.declare_variable(param)?;
            }
            this.check_block(&func.body)?;

            if let Some(chain) = this.ctx.call_chain(&func.body, &func.name) {
                let chain = chain.join(" -> ");
                return Err(CompileError::new(
                    SemanticError::RecursionDetected {
                        function: func.name.clone(),
                    },
                    func.span.clone(),
                )
                .with_hint(format!("Call chain: {}", chain)));
            }
            Ok(())
        })?;

        if self.options.require_return
            && !func.return_type.is_void()
            && !self.block_has_return(&func.body)
        {
            return Err(CompileError::new(
                SemanticError::MissingReturn {
                    function: func.name.clone(),
                },
                func.span.clone(),
            ));
        }

        debug!(params = func.params.len(), "function checked");
        Ok(())
    }

    fn check_call(&self, name: &str, args: &[Expr], span: &Span) -> Result<()> {
        let func = self
            .ctx
            .resolve_function(name)
            .ok_or_else(|| unresolved(Namespace::Function, name, span))?;

        if func.params.len() != args.len() {
            return Err(CompileError::new(
                SemanticError::ArityMismatch {
                    function: name.to_string(),
                    expected: func.params.len(),
                    actual: args.len(),
                },
                span.clone(),
            ));
        }

        for (i, (arg, param)) in args.iter().zip(&func.params).enumerate() {
            self.check_expression(arg)?;
            let arg_type = self.ctx.type_of(arg);
            if !matches(&arg_type, &param.var_type) {
                return Err(mismatch(
                    MismatchContext::Argument {
                        function: name.to_string(),
                        position: i + 1,
                    },
                    Some(param.var_type.clone()),
                    arg_type,
                    &arg.span,
                ));
            }
        }
        Ok(())
    }

    fn block_has_return(&self, block: &Block) -> bool {
        block.statements.iter().any(|stmt| match &stmt.kind {
            StatementKind::Return(_) => true,
            StatementKind::If(if_stmt) => {
                self.block_has_return(&if_stmt.then_block)
                    && if_stmt
                        .else_block
                        .as_ref()
                        .is_some_and(|else_block| self.block_has_return(else_block))
            }
            StatementKind::Block(inner) => self.block_has_return(inner),
            // The loop body may never run
            StatementKind::Foreach(_) => false,
            _ => false,
        })
    }
}
