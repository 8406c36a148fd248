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

//! Expression validation for the semantic analyzer.
//!
//! Validation walks an expression depth-first and fails on the first
//! problem. An expression that validates always has a type, with one
//! exception: the empty list literal, which is well-formed but can only
//! be used where no type is required.

use super::functions::FunctionAnalyzer;
use super::structures::StructureAnalyzer;
use super::type_check::{matches, TypeInference};
use super::{mismatch, unresolved, void_value, Analyzer};
use crate::ast::{BinaryOp, Expr, ExprKind, TypeDescriptor, UnaryOp};
use crate::error::{
    CompileError, MismatchContext, Namespace, Result, SemanticError, ValueUsage,
};

/// Extension trait for expression validation.
pub trait ExpressionAnalyzer {
    /// Validate an expression.
    fn check_expression(&self, expr: &Expr) -> Result<()>;

    /// Validate a list literal: every element must have the first one's type.
    fn check_list_literal(&self, elements: &[Expr]) -> Result<()>;

    /// Validate a binary operation: both operands must be values of the same type.
    fn check_binary(&self, left: &Expr, op: BinaryOp, right: &Expr, expr: &Expr) -> Result<()>;

    /// Validate a list index: it must be a scalar `int`.
    fn check_index(&self, index: &Expr) -> Result<()>;
}

impl ExpressionAnalyzer for Analyzer<'_> {
    fn check_expression(&self, expr: &Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::DoubleLiteral(_)
            | ExprKind::CharLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::BoolLiteral(_) => Ok(()),
            ExprKind::Variable(name) => match self.ctx.resolve_variable(name) {
                Some(_) => Ok(()),
                None => Err(unresolved(Namespace::Variable, name, &expr.span)),
            },
            ExprKind::ListLiteral(elements) => self.check_list_literal(elements),
            ExprKind::StructLiteral { name, fields } => {
                self.check_struct_literal(name, fields, &expr.span)
            }
            ExprKind::Call { name, args } => self.check_call(name, args, &expr.span),
            ExprKind::Binary { left, op, right } => self.check_binary(left, *op, right, expr),
            ExprKind::Unary { op, operand } => {
                self.check_expression(operand)?;
                let operand_type = self.ctx.type_of(operand);
                let (accepted, expected) = match op {
                    UnaryOp::Not => (
                        matches(&operand_type, &TypeDescriptor::bool()),
                        TypeDescriptor::bool(),
                    ),
                    UnaryOp::Negate => (
                        operand_type.as_ref().is_some_and(TypeDescriptor::is_numeric),
                        TypeDescriptor::int(),
                    ),
                };
                if !accepted {
                    let error = mismatch(
                        MismatchContext::Unary { op: *op },
                        Some(expected),
                        operand_type,
                        &operand.span,
                    );
                    return Err(match op {
                        UnaryOp::Negate => {
                            error.with_hint("Only int and double values can be negated")
                        }
                        UnaryOp::Not => error,
                    });
                }
                Ok(())
            }
            ExprKind::Index { list, index } => {
                self.check_expression(list)?;
                self.check_index(index)?;
                let list_type = self.ctx.type_of(list);
                if !list_type.as_ref().is_some_and(TypeDescriptor::is_list) {
                    return Err(CompileError::new(
                        SemanticError::NotAList { actual: list_type },
                        list.span.clone(),
                    ));
                }
                Ok(())
            }
            ExprKind::Field { base, field } => {
                self.check_expression(base)?;
                self.field_type(&self.ctx.type_of(base), field, &expr.span)?;
                Ok(())
            }
        }
    }

    fn check_list_literal(&self, elements: &[Expr]) -> Result<()> {
        for element in elements {
            self.check_expression(element)?;
            if matches(&self.ctx.type_of(element), &TypeDescriptor::void()) {
                return Err(void_value(ValueUsage::ListElement, &element.span));
            }
        }

        let Some((first, rest)) = elements.split_first() else {
            return Ok(());
        };

        let element_type = self.ctx.type_of(first);
        if let Some(ty) = element_type.as_ref().filter(|ty| ty.is_list()) {
            // Lists hold scalars only
            return Err(mismatch(
                MismatchContext::ListElement { position: 0 },
                Some(TypeDescriptor::scalar_of(ty.base.clone())),
                element_type.clone(),
                &first.span,
            ));
        }

        for (i, element) in rest.iter().enumerate() {
            let ty = self.ctx.type_of(element);
            if element_type.is_none() || ty != element_type {
                return Err(mismatch(
                    MismatchContext::ListElement { position: i + 1 },
                    element_type,
                    ty,
                    &element.span,
                ));
            }
        }
        Ok(())
    }

    fn check_binary(&self, left: &Expr, op: BinaryOp, right: &Expr, expr: &Expr) -> Result<()> {
        for operand in [left, right] {
            self.check_expression(operand)?;
            if matches(&self.ctx.type_of(operand), &TypeDescriptor::void()) {
                return Err(void_value(ValueUsage::Operand, &operand.span));
            }
        }

        let left_type = self.ctx.type_of(left);
        let right_type = self.ctx.type_of(right);
        // No promotion: the operands must agree exactly
        if left_type.is_none() || left_type != right_type {
            return Err(mismatch(
                MismatchContext::Operator { op },
                left_type,
                right_type,
                &expr.span,
            ));
        }
        Ok(())
    }

    fn check_index(&self, index: &Expr) -> Result<()> {
        self.check_expression(index)?;
        let index_type = self.ctx.type_of(index);
        if !matches(&index_type, &TypeDescriptor::int()) {
            return Err(mismatch(
                MismatchContext::Index,
                Some(TypeDescriptor::int()),
                index_type,
                &index.span,
            ));
        }
        Ok(())
    }
}
