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

//! Expression type inference.
//!
//! Inference is total and never touches the context: every expression gets
//! either a [`TypeDescriptor`] or `None` when it is ill-typed or refers to
//! something that cannot be resolved. `None` is distinct from `void` and
//! must never be treated as compatible with anything, including itself.

use super::context::SemanticContext;
use crate::ast::{BaseType, BinaryOp, Expr, ExprKind, TypeDescriptor, UnaryOp};

/// Extension trait for expression type inference.
pub trait TypeInference {
    /// Infer the type of an expression.
    fn type_of(&self, expr: &Expr) -> Option<TypeDescriptor>;

    /// Infer the type of a list literal.
    fn list_literal_type(&self, elements: &[Expr]) -> Option<TypeDescriptor>;

    /// Infer the result type of a binary operation.
    fn binary_type(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Option<TypeDescriptor>;
}

/// Compare an inferred type against an expected one.
///
/// Ill-typed expressions match nothing.
pub fn matches(actual: &Option<TypeDescriptor>, expected: &TypeDescriptor) -> bool {
    actual.as_ref() == Some(expected)
}

impl TypeInference for SemanticContext<'_> {
    fn type_of(&self, expr: &Expr) -> Option<TypeDescriptor> {
        match &expr.kind {
            ExprKind::IntLiteral(_) => Some(TypeDescriptor::int()),
            ExprKind::DoubleLiteral(_) => Some(TypeDescriptor::scalar_of(BaseType::Double)),
            ExprKind::CharLiteral(_) => Some(TypeDescriptor::scalar_of(BaseType::Char)),
            ExprKind::StringLiteral(_) => Some(TypeDescriptor::scalar_of(BaseType::String)),
            ExprKind::BoolLiteral(_) => Some(TypeDescriptor::bool()),
            ExprKind::Variable(name) => self.resolve_variable(name).map(|v| v.var_type.clone()),
            ExprKind::ListLiteral(elements) => self.list_literal_type(elements),
            ExprKind::StructLiteral { name, .. } => self
                .resolve_structure(name)
                .map(|s| TypeDescriptor::structure(s.name.clone())),
            ExprKind::Call { name, .. } => self
                .resolve_function(name)
                .map(|f| f.return_type.clone()),
            ExprKind::Binary { left, op, right } => self.binary_type(left, *op, right),
            ExprKind::Unary { op, operand } => {
                let operand_type = self.type_of(operand)?;
                let accepted = match op {
                    UnaryOp::Not => operand_type == TypeDescriptor::bool(),
                    UnaryOp::Negate => operand_type.is_numeric(),
                };
                accepted.then_some(operand_type)
            }
            ExprKind::Index { list, index } => {
                if !matches(&self.type_of(index), &TypeDescriptor::int()) {
                    return None;
                }
                self.type_of(list)?.element_type()
            }
            ExprKind::Field { base, field } => {
                let base_type = self.type_of(base)?;
                let structure = self.resolve_structure(base_type.struct_name()?)?;
                structure.field(field).map(|f| f.field_type.clone())
            }
        }
    }

    fn list_literal_type(&self, elements: &[Expr]) -> Option<TypeDescriptor> {
        let (first, rest) = elements.split_first()?;
        let element_type = self.type_of(first)?;
        // Lists only hold scalar values
        if element_type.is_list() || element_type.is_void() {
            return None;
        }
        for element in rest {
            if !matches(&self.type_of(element), &element_type) {
                return None;
            }
        }
        Some(TypeDescriptor::list_of(element_type.base))
    }

    fn binary_type(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Option<TypeDescriptor> {
        let left_type = self.type_of(left)?;
        if left_type.is_void() || !matches(&self.type_of(right), &left_type) {
            return None;
        }
        if op.is_comparison() {
            Some(TypeDescriptor::bool())
        } else {
            Some(left_type)
        }
    }
}
