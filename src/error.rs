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

//! Error handling for the Crema semantic analyzer.
//!
//! This module defines the semantic error taxonomy, the stable error
//! codes attached to it, and rendering of diagnostics with source context.

use std::fmt;
use std::ops::Range;
use thiserror::Error;

use crate::ast::{describe, BinaryOp, TypeDescriptor, UnaryOp};

/// A source span representing a range in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// The namespace an identifier lives in.
///
/// Variables, functions and structures never collide with each other;
/// fields are scoped to their structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Variable,
    Function,
    Structure,
    Field,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::Variable => "variable",
            Namespace::Function => "function",
            Namespace::Structure => "structure",
            Namespace::Field => "field",
        };
        write!(f, "{}", name)
    }
}

/// Where a type mismatch was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchContext {
    /// The initializer of a variable declaration.
    Initializer { variable: String },
    /// The value of an assignment.
    Assignment { target: String },
    /// The operands of a binary operator.
    Operator { op: BinaryOp },
    /// The operand of a unary operator.
    Unary { op: UnaryOp },
    /// A returned value.
    Return,
    /// A call argument (1-based position).
    Argument { function: String, position: usize },
    /// An element of a list literal (0-based position).
    ListElement { position: usize },
    /// A field initializer of a structure literal.
    FieldInit { structure: String, field: String },
    /// A list index.
    Index,
    /// The condition of an if statement.
    Condition,
}

impl fmt::Display for MismatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchContext::Initializer { variable } => {
                write!(f, "initializer of '{}'", variable)
            }
            MismatchContext::Assignment { target } => write!(f, "assignment to '{}'", target),
            MismatchContext::Operator { op } => write!(f, "operands of '{}'", op),
            MismatchContext::Unary { op } => write!(f, "operand of '{}'", op),
            MismatchContext::Return => write!(f, "return value"),
            MismatchContext::Argument { function, position } => {
                write!(f, "argument {} of '{}'", position, function)
            }
            MismatchContext::ListElement { position } => {
                write!(f, "list element {}", position)
            }
            MismatchContext::FieldInit { structure, field } => {
                write!(f, "field '{}' of '{}'", field, structure)
            }
            MismatchContext::Index => write!(f, "list index"),
            MismatchContext::Condition => write!(f, "condition"),
        }
    }
}

/// A place where only a value type may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueUsage {
    Variable,
    Parameter,
    Field,
    ListElement,
    Operand,
}

impl fmt::Display for ValueUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usage = match self {
            ValueUsage::Variable => "a variable",
            ValueUsage::Parameter => "a parameter",
            ValueUsage::Field => "a field",
            ValueUsage::ListElement => "a list element",
            ValueUsage::Operand => "an operand",
        };
        write!(f, "{}", usage)
    }
}

/// A semantic error found while analyzing a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("{namespace} '{identifier}' is already declared")]
    DuplicateDeclaration {
        namespace: Namespace,
        identifier: String,
    },

    #[error("undeclared {namespace} '{identifier}'")]
    UnresolvedIdentifier {
        namespace: Namespace,
        identifier: String,
    },

    #[error(
        "type mismatch in {context}: expected {}, found {}",
        describe(.expected),
        describe(.actual)
    )]
    TypeMismatch {
        context: MismatchContext,
        expected: Option<TypeDescriptor>,
        actual: Option<TypeDescriptor>,
    },

    #[error("function '{function}' expects {expected} arguments, but {actual} were provided")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("recursion detected in function '{function}'")]
    RecursionDetected { function: String },

    #[error("function '{function}' may not return a value on all paths")]
    MissingReturn { function: String },

    #[error("cannot index a value of type {}", describe(.actual))]
    NotAList { actual: Option<TypeDescriptor> },

    #[error("cannot access field '{field}' on a value of type {}", describe(.actual))]
    NotAStructure {
        field: String,
        actual: Option<TypeDescriptor>,
    },

    #[error("missing field '{field}' in literal of structure '{structure}'")]
    MissingField { structure: String, field: String },

    #[error("'void' cannot be the type of {usage}")]
    VoidValue { usage: ValueUsage },

    #[error("structure '{structure}' contains itself")]
    RecursiveStructure { structure: String },
}

impl SemanticError {
    /// Get the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SemanticError::DuplicateDeclaration { namespace, .. } => match namespace {
                Namespace::Variable => ErrorCode::VariableAlreadyDefined,
                Namespace::Function => ErrorCode::FunctionAlreadyDefined,
                Namespace::Structure => ErrorCode::StructureAlreadyDefined,
                Namespace::Field => ErrorCode::DuplicateField,
            },
            SemanticError::UnresolvedIdentifier { namespace, .. } => match namespace {
                Namespace::Variable => ErrorCode::UndefinedVariable,
                Namespace::Function => ErrorCode::UndefinedFunction,
                Namespace::Structure => ErrorCode::UndefinedStructure,
                Namespace::Field => ErrorCode::UndefinedField,
            },
            SemanticError::TypeMismatch { context, .. } => match context {
                MismatchContext::Argument { .. } => ErrorCode::ArgumentTypeMismatch,
                MismatchContext::Return => ErrorCode::ReturnTypeMismatch,
                _ => ErrorCode::TypeMismatch,
            },
            SemanticError::ArityMismatch { .. } => ErrorCode::WrongNumberOfArguments,
            SemanticError::RecursionDetected { .. } => ErrorCode::RecursionDetected,
            SemanticError::MissingReturn { .. } => ErrorCode::MissingReturnStatement,
            SemanticError::NotAList { .. } => ErrorCode::CannotIndexNonList,
            SemanticError::NotAStructure { .. } => ErrorCode::CannotAccessField,
            SemanticError::MissingField { .. } => ErrorCode::MissingFieldInit,
            SemanticError::VoidValue { .. } => ErrorCode::VoidValueType,
            SemanticError::RecursiveStructure { .. } => ErrorCode::RecursiveStructure,
        }
    }
}

/// Error codes for the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Name resolution (E200-E209)
    UndefinedVariable,
    VariableAlreadyDefined,
    UndefinedStructure,
    StructureAlreadyDefined,
    UndefinedField,
    DuplicateField,

    // Types (E210-E219)
    TypeMismatch,
    ReturnTypeMismatch,
    CannotIndexNonList,
    CannotAccessField,
    MissingFieldInit,
    VoidValueType,
    RecursiveStructure,

    // Functions (E220-E229)
    UndefinedFunction,
    FunctionAlreadyDefined,
    WrongNumberOfArguments,
    ArgumentTypeMismatch,
    MissingReturnStatement,
    RecursionDetected,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UndefinedVariable => "E200",
            ErrorCode::VariableAlreadyDefined => "E201",
            ErrorCode::UndefinedStructure => "E202",
            ErrorCode::StructureAlreadyDefined => "E203",
            ErrorCode::UndefinedField => "E204",
            ErrorCode::DuplicateField => "E205",

            ErrorCode::TypeMismatch => "E210",
            ErrorCode::ReturnTypeMismatch => "E211",
            ErrorCode::CannotIndexNonList => "E212",
            ErrorCode::CannotAccessField => "E213",
            ErrorCode::MissingFieldInit => "E214",
            ErrorCode::VoidValueType => "E215",
            ErrorCode::RecursiveStructure => "E216",

            ErrorCode::UndefinedFunction => "E220",
            ErrorCode::FunctionAlreadyDefined => "E221",
            ErrorCode::WrongNumberOfArguments => "E222",
            ErrorCode::ArgumentTypeMismatch => "E223",
            ErrorCode::MissingReturnStatement => "E224",
            ErrorCode::RecursionDetected => "E225",
        }
    }
}

/// A semantic error with source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {kind}", .kind.code())]
pub struct CompileError {
    /// What went wrong.
    pub kind: SemanticError,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(kind: SemanticError, span: Span) -> Self {
        Self {
            kind,
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code().code()
    }
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[line_start..line_end].to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let loc = SourceLocation::from_offset(source, error.span.start);
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.kind));
    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    // Underline the span, clipped to the reported line
    let underline_start = loc.column - 1;
    let underline_len = error
        .span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start))
        .max(1);
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    if let Some(hint) = &error.hint {
        output.push_str(&format!(
            "{:>width$} = hint: {}\n",
            "",
            hint,
            width = line_num_width
        ));
    }

    output
}
