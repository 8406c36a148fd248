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

//! Semantic analyzer for the Crema language.
//!
//! This module performs semantic analysis on the AST:
//! - Scope and symbol management (variables, functions, structures)
//! - Type inference and type checking
//! - Static prohibition of recursion
//!
//! Analysis is a single depth-first pass. Within a construct it is
//! fail-fast: the first failing statement of a block aborts the block.

mod context;
mod expressions;
mod functions;
mod options;
mod recursion;
mod scope;
mod statements;
mod structures;
mod symbol_table;
mod type_check;

pub use context::SemanticContext;
pub use expressions::ExpressionAnalyzer;
pub use functions::FunctionAnalyzer;
pub use options::{AnalyzerOptions, ErrorMode, SelfReference};
pub use recursion::{called_functions, RecursionCheck};
pub use scope::Scope;
pub use statements::StatementAnalyzer;
pub use structures::StructureAnalyzer;
pub use symbol_table::{Declaration, SymbolTable};
pub use type_check::{matches, TypeInference};

use tracing::debug;

use crate::ast::{FunctionDecl, Program, StructDecl, TopLevelItem, TypeDescriptor, VarDecl};
use crate::error::{
    CompileError, MismatchContext, Namespace, Result, SemanticError, Span, ValueUsage,
};

/// Analyze a program with the default options.
pub fn analyze(program: &Program) -> std::result::Result<AnnotatedProgram<'_>, Vec<CompileError>> {
    analyze_with_options(program, AnalyzerOptions::default())
}

/// Analyze a program.
pub fn analyze_with_options(
    program: &Program,
    options: AnalyzerOptions,
) -> std::result::Result<AnnotatedProgram<'_>, Vec<CompileError>> {
    Analyzer::new(options).analyze(program)
}

/// A program that passed semantic analysis, together with its resolved
/// global declarations.
#[derive(Debug)]
pub struct AnnotatedProgram<'a> {
    /// The analyzed program.
    pub program: &'a Program,
    functions: SymbolTable<'a, FunctionDecl>,
    structures: SymbolTable<'a, StructDecl>,
}

impl<'a> AnnotatedProgram<'a> {
    /// Look up a function declaration.
    pub fn function(&self, name: &str) -> Option<&'a FunctionDecl> {
        self.functions.lookup(name)
    }

    /// Look up a structure declaration.
    pub fn structure(&self, name: &str) -> Option<&'a StructDecl> {
        self.structures.lookup(name)
    }

    /// All functions, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &'a FunctionDecl> + '_ {
        self.functions.iter()
    }

    /// All structures, in declaration order.
    pub fn structures(&self) -> impl Iterator<Item = &'a StructDecl> + '_ {
        self.structures.iter()
    }
}

/// The semantic analyzer.
pub struct Analyzer<'a> {
    /// The semantic context of this pass.
    pub(crate) ctx: SemanticContext<'a>,
    /// Analysis options.
    pub(crate) options: AnalyzerOptions,
    /// Collected errors.
    errors: Vec<CompileError>,
}

impl<'a> Analyzer<'a> {
    /// Create a new analyzer.
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            ctx: SemanticContext::new(),
            options,
            errors: Vec::new(),
        }
    }

    /// The semantic context of this analyzer.
    pub fn context(&self) -> &SemanticContext<'a> {
        &self.ctx
    }

    /// Analyze a program.
    pub fn analyze(
        mut self,
        program: &'a Program,
    ) -> std::result::Result<AnnotatedProgram<'a>, Vec<CompileError>> {
        // Program-level statements live in the root scope
        self.ctx.open_scope(TypeDescriptor::void());

        if self.options.hoist_declarations {
            self.hoist_declarations(program);
        }

        if self.should_continue() {
            for item in &program.items {
                if let Err(error) = self.check_top_level_item(item) {
                    self.error(error);
                    if !self.should_continue() {
                        break;
                    }
                }
            }
        }

        self.ctx.close_scope();
        debug!(errors = self.errors.len(), "analysis finished");

        if self.errors.is_empty() {
            let (functions, structures) = self.ctx.into_tables();
            Ok(AnnotatedProgram {
                program,
                functions,
                structures,
            })
        } else {
            Err(self.errors)
        }
    }

    /// Register all top-level functions and structures up front.
    fn hoist_declarations(&mut self, program: &'a Program) {
        for item in &program.items {
            let result = match item {
                TopLevelItem::Function(func) => self.ctx.declare_function(func).map_err(|existing| {
                    duplicate(Namespace::Function, &func.name, &func.span, &existing.span)
                }),
                TopLevelItem::Structure(decl) => {
                    self.ctx.declare_structure(decl).map_err(|existing| {
                        duplicate(Namespace::Structure, &decl.name, &decl.span, &existing.span)
                    })
                }
                TopLevelItem::Statement(_) => Ok(()),
            };
            if let Err(error) = result {
                self.error(error);
                if !self.should_continue() {
                    return;
                }
            }
        }
    }

    /// Analyze a top-level item.
    fn check_top_level_item(&mut self, item: &'a TopLevelItem) -> Result<()> {
        match item {
            TopLevelItem::Function(func) => self.check_function(func),
            TopLevelItem::Structure(decl) => self.check_structure(decl),
            TopLevelItem::Statement(stmt) => self.check_statement(stmt),
        }
    }

    /// Record an error.
    fn error(&mut self, error: CompileError) {
        debug!(code = error.code_str(), "{}", error.kind);
        self.errors.push(error);
    }

    /// Whether analysis goes on after the errors seen so far.
    fn should_continue(&self) -> bool {
        self.errors.is_empty() || self.options.error_mode == ErrorMode::PerItem
    }

    /// Run `f` inside a fresh scope, closing it again whatever `f` returns.
    pub(crate) fn in_scope<T>(
        &mut self,
        expected_return: TypeDescriptor,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.ctx.open_scope(expected_return);
        let result = f(self);
        self.ctx.close_scope();
        result
    }

    /// Run `f` inside a fresh scope inheriting the expected return type.
    pub(crate) fn in_nested_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.ctx.open_nested_scope();
        let result = f(self);
        self.ctx.close_scope();
        result
    }

    /// Declare a variable in the innermost scope.
    pub(crate) fn declare_variable(&mut self, decl: &'a VarDecl) -> Result<()> {
        self.ctx
            .declare_variable(decl)
            .map_err(|existing| duplicate(Namespace::Variable, &decl.name, &decl.span, &existing.span))
    }
}

/// Build a duplicate declaration error pointing back at the first declaration.
pub(crate) fn duplicate(
    namespace: Namespace,
    identifier: &str,
    span: &Span,
    previous: &Span,
) -> CompileError {
    CompileError::new(
        SemanticError::DuplicateDeclaration {
            namespace,
            identifier: identifier.to_string(),
        },
        span.clone(),
    )
    .with_hint(format!("Previously declared at position {}", previous.start))
}

/// Build an unresolved identifier error.
pub(crate) fn unresolved(namespace: Namespace, identifier: &str, span: &Span) -> CompileError {
    CompileError::new(
        SemanticError::UnresolvedIdentifier {
            namespace,
            identifier: identifier.to_string(),
        },
        span.clone(),
    )
}

/// Build a type mismatch error.
pub(crate) fn mismatch(
    context: MismatchContext,
    expected: Option<TypeDescriptor>,
    actual: Option<TypeDescriptor>,
    span: &Span,
) -> CompileError {
    CompileError::new(
        SemanticError::TypeMismatch {
            context,
            expected,
            actual,
        },
        span.clone(),
    )
}

/// Build an error for `void` used where a value type is required.
pub(crate) fn void_value(usage: ValueUsage, span: &Span) -> CompileError {
    CompileError::new(SemanticError::VoidValue { usage }, span.clone())
        .with_hint("'void' is only valid as a return type")
}
