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

//! Structure analysis for the semantic analyzer.

use std::collections::HashMap;

use super::expressions::ExpressionAnalyzer;
use super::recursion::RecursionCheck;
use super::type_check::{matches, TypeInference};
use super::{duplicate, mismatch, unresolved, void_value, Analyzer};
use crate::ast::{BaseType, FieldInit, StructDecl, TypeDescriptor};
use crate::error::{
    CompileError, MismatchContext, Namespace, Result, SemanticError, Span, ValueUsage,
};

/// Extension trait for structure analysis.
pub trait StructureAnalyzer<'a> {
    /// Analyze a structure declaration.
    fn check_structure(&mut self, decl: &'a StructDecl) -> Result<()>;

    /// Analyze a structure literal.
    fn check_struct_literal(&self, name: &str, fields: &[FieldInit], span: &Span) -> Result<()>;

    /// Resolve the type of `field` on a value of type `base`.
    fn field_type(
        &self,
        base: &Option<TypeDescriptor>,
        field: &str,
        span: &Span,
    ) -> Result<TypeDescriptor>;

    /// Check that a declared type only names known structures and is not
    /// a list of `void`.
    fn check_declared_type(&self, ty: &TypeDescriptor, span: &Span) -> Result<()>;

    /// Check a declared type that must describe a value, so never `void`.
    fn check_value_type(&self, ty: &TypeDescriptor, usage: ValueUsage, span: &Span) -> Result<()>;
}

impl<'a> StructureAnalyzer<'a> for Analyzer<'a> {
    fn check_structure(&mut self, decl: &'a StructDecl) -> Result<()> {
        let mut seen: HashMap<&str, &Span> = HashMap::new();
        for field in &decl.fields {
            self.check_value_type(&field.field_type, ValueUsage::Field, &field.span)?;
            if let Some(previous) = seen.insert(&field.name, &field.span) {
                return Err(duplicate(
                    Namespace::Field,
                    &field.name,
                    &field.span,
                    previous,
                ));
            }
        }

        if !self.options.hoist_declarations {
            self.ctx.declare_structure(decl).map_err(|existing| {
                duplicate(Namespace::Structure, &decl.name, &decl.span, &existing.span)
            })?;
        }

        if let Some(chain) = self.ctx.containment_chain(decl) {
            let chain = chain.join(" -> ");
            return Err(CompileError::new(
                SemanticError::RecursiveStructure {
                    structure: decl.name.clone(),
                },
                decl.span.clone(),
            )
            .with_hint(format!("Containment chain: {}", chain)));
        }
        Ok(())
    }

    fn check_struct_literal(&self, name: &str, fields: &[FieldInit], span: &Span) -> Result<()> {
        let decl = self
            .ctx
            .resolve_structure(name)
            .ok_or_else(|| unresolved(Namespace::Structure, name, span))?;

        let mut seen: HashMap<&str, &Span> = HashMap::new();
        for init in fields {
            let field = decl
                .field(&init.name)
                .ok_or_else(|| unresolved(Namespace::Field, &init.name, &init.span))?;
            if let Some(previous) = seen.insert(&init.name, &init.span) {
                return Err(duplicate(Namespace::Field, &init.name, &init.span, previous));
            }

            self.check_expression(&init.value)?;
            let value_type = self.ctx.type_of(&init.value);
            if !matches(&value_type, &field.field_type) {
                return Err(mismatch(
                    MismatchContext::FieldInit {
                        structure: name.to_string(),
                        field: init.name.clone(),
                    },
                    Some(field.field_type.clone()),
                    value_type,
                    &init.value.span,
                ));
            }
        }

        if let Some(missing) = decl.fields.iter().find(|f| !seen.contains_key(f.name.as_str())) {
            return Err(CompileError::new(
                SemanticError::MissingField {
                    structure: name.to_string(),
                    field: missing.name.clone(),
                },
                span.clone(),
            ));
        }
        Ok(())
    }

    fn field_type(
        &self,
        base: &Option<TypeDescriptor>,
        field: &str,
        span: &Span,
    ) -> Result<TypeDescriptor> {
        let Some(struct_name) = base.as_ref().and_then(TypeDescriptor::struct_name) else {
            return Err(CompileError::new(
                SemanticError::NotAStructure {
                    field: field.to_string(),
                    actual: base.clone(),
                },
                span.clone(),
            ));
        };

        let decl = self
            .ctx
            .resolve_structure(struct_name)
            .ok_or_else(|| unresolved(Namespace::Structure, struct_name, span))?;
        decl.field(field)
            .map(|f| f.field_type.clone())
            .ok_or_else(|| {
                unresolved(Namespace::Field, field, span)
                    .with_hint(format!("Structure '{}' has no such field", decl.name))
            })
    }

    fn check_declared_type(&self, ty: &TypeDescriptor, span: &Span) -> Result<()> {
        if ty.is_list() && ty.base == BaseType::Void {
            return Err(void_value(ValueUsage::ListElement, span));
        }
        match ty.base.struct_name() {
            Some(name) if self.ctx.resolve_structure(name).is_none() => {
                Err(unresolved(Namespace::Structure, name, span))
            }
            _ => Ok(()),
        }
    }

    fn check_value_type(&self, ty: &TypeDescriptor, usage: ValueUsage, span: &Span) -> Result<()> {
        if ty.is_void() {
            return Err(void_value(usage, span));
        }
        self.check_declared_type(ty, span)
    }
}
