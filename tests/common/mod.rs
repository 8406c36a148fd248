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

//! AST builders shared by the integration tests.
//!
//! Parsing happens outside this crate, so tests build their programs by
//! hand. All nodes get an empty span unless a test needs real positions.

#![allow(dead_code)]

use crema::analyzer::{analyze_with_options, AnalyzerOptions};
use crema::ast::{
    AssignTarget, Assignment, BaseType, BinaryOp, Block, Expr, ExprKind, FieldDecl, FieldInit,
    ForeachStatement, FunctionDecl, IfStatement, Program, Statement, StatementKind, StructDecl,
    TopLevelItem, TypeDescriptor, UnaryOp, VarDecl,
};
use crema::{CompileError, ErrorCode, Span};

pub fn sp() -> Span {
    Span::new(0, 0)
}

// ============================================================================
// Types
// ============================================================================

pub fn t_int() -> TypeDescriptor {
    TypeDescriptor::int()
}

pub fn t_bool() -> TypeDescriptor {
    TypeDescriptor::bool()
}

pub fn t_double() -> TypeDescriptor {
    TypeDescriptor::scalar_of(BaseType::Double)
}

pub fn t_void() -> TypeDescriptor {
    TypeDescriptor::void()
}

pub fn t_list(base: BaseType) -> TypeDescriptor {
    TypeDescriptor::list_of(base)
}

pub fn t_struct(name: &str) -> TypeDescriptor {
    TypeDescriptor::structure(name)
}

// ============================================================================
// Expressions
// ============================================================================

pub fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, sp())
}

pub fn int(n: i64) -> Expr {
    expr(ExprKind::IntLiteral(n))
}

pub fn double(d: f64) -> Expr {
    expr(ExprKind::DoubleLiteral(d))
}

pub fn chr(c: char) -> Expr {
    expr(ExprKind::CharLiteral(c))
}

pub fn string(s: &str) -> Expr {
    expr(ExprKind::StringLiteral(s.to_string()))
}

pub fn boolean(b: bool) -> Expr {
    expr(ExprKind::BoolLiteral(b))
}

pub fn var(name: &str) -> Expr {
    expr(ExprKind::Variable(name.to_string()))
}

pub fn list(elements: Vec<Expr>) -> Expr {
    expr(ExprKind::ListLiteral(elements))
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call {
        name: name.to_string(),
        args,
    })
}

pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    expr(ExprKind::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

pub fn not(operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op: UnaryOp::Not,
        operand: Box::new(operand),
    })
}

pub fn neg(operand: Expr) -> Expr {
    expr(ExprKind::Unary {
        op: UnaryOp::Negate,
        operand: Box::new(operand),
    })
}

pub fn index(list: Expr, idx: Expr) -> Expr {
    expr(ExprKind::Index {
        list: Box::new(list),
        index: Box::new(idx),
    })
}

pub fn field(base: Expr, name: &str) -> Expr {
    expr(ExprKind::Field {
        base: Box::new(base),
        field: name.to_string(),
    })
}

pub fn struct_lit(name: &str, fields: Vec<(&str, Expr)>) -> Expr {
    expr(ExprKind::StructLiteral {
        name: name.to_string(),
        fields: fields
            .into_iter()
            .map(|(name, value)| FieldInit {
                name: name.to_string(),
                value,
                span: sp(),
            })
            .collect(),
    })
}

// ============================================================================
// Statements
// ============================================================================

pub fn statement(kind: StatementKind) -> Statement {
    Statement::new(kind, sp())
}

pub fn declare(name: &str, ty: TypeDescriptor, init: Option<Expr>) -> Statement {
    let mut decl = VarDecl::new(name, ty, sp());
    decl.initializer = init;
    statement(StatementKind::VarDecl(decl))
}

fn assignment(target: AssignTarget, value: Expr) -> Statement {
    statement(StatementKind::Assignment(Assignment {
        target,
        value,
        span: sp(),
    }))
}

pub fn assign(name: &str, value: Expr) -> Statement {
    assignment(AssignTarget::Variable(name.to_string()), value)
}

pub fn assign_element(name: &str, idx: Expr, value: Expr) -> Statement {
    assignment(
        AssignTarget::Element {
            name: name.to_string(),
            index: Box::new(idx),
        },
        value,
    )
}

pub fn assign_field(name: &str, field: &str, value: Expr) -> Statement {
    assignment(
        AssignTarget::Field {
            name: name.to_string(),
            field: field.to_string(),
        },
        value,
    )
}

pub fn ret(value: Option<Expr>) -> Statement {
    statement(StatementKind::Return(value))
}

pub fn expr_stmt(e: Expr) -> Statement {
    statement(StatementKind::Expression(e))
}

pub fn block(statements: Vec<Statement>) -> Block {
    Block::new(statements, sp())
}

pub fn block_stmt(statements: Vec<Statement>) -> Statement {
    statement(StatementKind::Block(block(statements)))
}

pub fn if_else(condition: Expr, then: Vec<Statement>, otherwise: Option<Vec<Statement>>) -> Statement {
    statement(StatementKind::If(IfStatement {
        condition,
        then_block: block(then),
        else_block: otherwise.map(block),
        span: sp(),
    }))
}

pub fn foreach(list: Expr, variable: &str, body: Vec<Statement>) -> Statement {
    statement(StatementKind::Foreach(ForeachStatement {
        list,
        variable: variable.to_string(),
        body: block(body),
        span: sp(),
    }))
}

// ============================================================================
// Top-level items
// ============================================================================

pub fn function(
    name: &str,
    return_type: TypeDescriptor,
    params: &[(&str, TypeDescriptor)],
    body: Vec<Statement>,
) -> TopLevelItem {
    TopLevelItem::Function(FunctionDecl {
        name: name.to_string(),
        return_type,
        params: params
            .iter()
            .map(|(name, ty)| VarDecl::new(*name, ty.clone(), sp()))
            .collect(),
        body: block(body),
        span: sp(),
    })
}

pub fn procedure(name: &str, body: Vec<Statement>) -> TopLevelItem {
    function(name, t_void(), &[], body)
}

pub fn structure(name: &str, fields: &[(&str, TypeDescriptor)]) -> TopLevelItem {
    TopLevelItem::Structure(StructDecl {
        name: name.to_string(),
        fields: fields
            .iter()
            .map(|(name, ty)| FieldDecl {
                name: name.to_string(),
                field_type: ty.clone(),
                span: sp(),
            })
            .collect(),
        span: sp(),
    })
}

pub fn top(stmt: Statement) -> TopLevelItem {
    TopLevelItem::Statement(stmt)
}

pub fn program(items: Vec<TopLevelItem>) -> Program {
    Program { items }
}

// ============================================================================
// Analysis helpers
// ============================================================================

/// Analyze with the given options and return all errors (empty on success).
pub fn errors_with(program: &Program, options: AnalyzerOptions) -> Vec<CompileError> {
    analyze_with_options(program, options).err().unwrap_or_default()
}

/// Analyze with default options and return all errors (empty on success).
pub fn errors(program: &Program) -> Vec<CompileError> {
    errors_with(program, AnalyzerOptions::default())
}

/// The codes of all errors reported for a program.
pub fn codes_with(program: &Program, options: AnalyzerOptions) -> Vec<ErrorCode> {
    errors_with(program, options).iter().map(CompileError::code).collect()
}

/// Assert that a program is accepted with default options.
pub fn assert_valid(program: &Program) {
    let errors = errors(program);
    assert!(errors.is_empty(), "Expected program to be valid, got: {:?}", errors);
}
