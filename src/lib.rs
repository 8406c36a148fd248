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

//! Crema Semantic Analyzer Library
//!
//! This library validates programs of the Crema language, a small
//! statically-typed imperative language with scalars, lists of scalars,
//! structures and non-recursive functions. It takes an already parsed
//! [`Program`] and either accepts it, returning the resolved global
//! declarations, or reports what is wrong with it.
//!
//! # Modules
//!
//! - [`ast`] - Abstract Syntax Tree definitions and the type model
//! - [`analyzer`] - Scopes, type inference, type checking, recursion check
//! - [`error`] - Error types and error reporting
//!
//! # Example
//!
//! ```
//! use crema::ast::{Expr, ExprKind, Statement, StatementKind, TopLevelItem, VarDecl};
//! use crema::{analyze, Program, Span, TypeDescriptor};
//!
//! let decl = VarDecl::new("x", TypeDescriptor::int(), Span::new(0, 10))
//!     .with_initializer(Expr::new(ExprKind::IntLiteral(42), Span::new(8, 10)));
//!
//! let mut program = Program::new();
//! program.add_item(TopLevelItem::Statement(Statement::new(
//!     StatementKind::VarDecl(decl),
//!     Span::new(0, 11),
//! )));
//!
//! assert!(analyze(&program).is_ok());
//! ```

pub mod analyzer;
pub mod ast;
pub mod error;

// Re-export commonly used types
pub use analyzer::{analyze, analyze_with_options, AnalyzerOptions, AnnotatedProgram};
pub use ast::{Program, TypeDescriptor};
pub use error::{
    format_error, CompileError, ErrorCode, Result, SemanticError, SourceLocation, Span,
};

/// The version of the Crema analyzer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the analyzer.
pub const NAME: &str = "Crema";

/// Analyze a program and report only the first error, if any.
///
/// This is a convenience wrapper around [`analyze`] for callers that stop
/// at the first problem anyway.
pub fn check(program: &Program) -> Result<()> {
    match analyze(program) {
        Ok(_) => Ok(()),
        Err(errors) => match errors.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        },
    }
}
