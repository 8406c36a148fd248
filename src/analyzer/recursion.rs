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

//! Static recursion check.
//!
//! Crema forbids recursion, direct or mutual. A function is recursive if
//! the call graph reachable from its body leads back to the function.
//! The search is a breadth-first walk over the global function table with
//! a visited set, so cycles that never pass through the target (`g -> h ->
//! g` while checking `f`) are walked once and then left alone.
//!
//! Structures get the same treatment: a structure holding itself by value,
//! directly or through other structures, could never be constructed.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use super::context::SemanticContext;
use crate::ast::{AssignTarget, Block, Expr, ExprKind, Statement, StatementKind, StructDecl};

/// Extension trait for the recursion check.
pub trait RecursionCheck {
    /// Find a call chain from `body` back to the function named `target`.
    ///
    /// The chain starts and ends with `target`, e.g. `["f", "g", "f"]`.
    /// Callees missing from the function table are skipped.
    fn call_chain<'b>(&'b self, body: &'b Block, target: &'b str) -> Option<Vec<&'b str>>;

    /// Check whether `body` can reach a call to `target`.
    fn contains_recursion(&self, body: &Block, target: &str) -> bool {
        self.call_chain(body, target).is_some()
    }

    /// Find a chain of scalar fields through which `structure` contains
    /// itself, e.g. `["A", "B", "A"]`.
    fn containment_chain<'b>(&'b self, structure: &'b StructDecl) -> Option<Vec<&'b str>>;
}

impl RecursionCheck for SemanticContext<'_> {
    fn call_chain<'b>(&'b self, body: &'b Block, target: &'b str) -> Option<Vec<&'b str>> {
        let mut visited: HashSet<&'b str> = HashSet::new();
        // callee -> first caller that reached it
        let mut reached_from: HashMap<&'b str, &'b str> = HashMap::new();
        let mut queue: VecDeque<(&'b str, &'b Block)> = VecDeque::new();
        queue.push_back((target, body));

        while let Some((caller, block)) = queue.pop_front() {
            for callee in called_functions(block) {
                if callee == target {
                    let chain = chain_back(target, caller, &reached_from);
                    debug!(function = target, chain = ?chain, "recursion found");
                    return Some(chain);
                }

                if visited.insert(callee) {
                    reached_from.insert(callee, caller);
                    if let Some(func) = self.resolve_function(callee) {
                        trace!(function = callee, "visiting call graph node");
                        queue.push_back((callee, &func.body));
                    }
                }
            }
        }

        None
    }

    fn containment_chain<'b>(&'b self, structure: &'b StructDecl) -> Option<Vec<&'b str>> {
        let target = structure.name.as_str();
        let mut visited: HashSet<&'b str> = HashSet::new();
        let mut reached_from: HashMap<&'b str, &'b str> = HashMap::new();
        let mut queue: VecDeque<&'b StructDecl> = VecDeque::new();
        queue.push_back(structure);

        while let Some(container) = queue.pop_front() {
            let outer = container.name.as_str();
            // List fields may stay empty, so only scalar fields count
            for inner in container.fields.iter().filter_map(|f| f.field_type.struct_name()) {
                if inner == target {
                    let chain = chain_back(target, outer, &reached_from);
                    debug!(structure = target, chain = ?chain, "self-containing structure found");
                    return Some(chain);
                }

                if visited.insert(inner) {
                    reached_from.insert(inner, outer);
                    if let Some(decl) = self.resolve_structure(inner) {
                        queue.push_back(decl);
                    }
                }
            }
        }

        None
    }
}

/// Rebuild `target -> ... -> last -> target` from the back-pointers.
fn chain_back<'b>(
    target: &'b str,
    last: &'b str,
    reached_from: &HashMap<&'b str, &'b str>,
) -> Vec<&'b str> {
    let mut chain = vec![target];
    let mut node = last;
    loop {
        chain.push(node);
        if node == target {
            break;
        }
        match reached_from.get(node) {
            Some(previous) => node = *previous,
            None => break,
        }
    }
    chain.reverse();
    chain
}

/// Collect the names of all functions called anywhere in a block.
pub fn called_functions(block: &Block) -> Vec<&str> {
    let mut calls = Vec::new();
    collect_block(block, &mut calls);
    calls
}

fn collect_block<'b>(block: &'b Block, calls: &mut Vec<&'b str>) {
    for stmt in &block.statements {
        collect_statement(stmt, calls);
    }
}

fn collect_statement<'b>(stmt: &'b Statement, calls: &mut Vec<&'b str>) {
    match &stmt.kind {
        StatementKind::VarDecl(decl) => {
            if let Some(init) = &decl.initializer {
                collect_expr(init, calls);
            }
        }
        StatementKind::Assignment(assign) => {
            if let AssignTarget::Element { index, .. } = &assign.target {
                collect_expr(index, calls);
            }
            collect_expr(&assign.value, calls);
        }
        StatementKind::If(if_stmt) => {
            collect_expr(&if_stmt.condition, calls);
            collect_block(&if_stmt.then_block, calls);
            if let Some(else_block) = &if_stmt.else_block {
                collect_block(else_block, calls);
            }
        }
        StatementKind::Foreach(foreach) => {
            collect_expr(&foreach.list, calls);
            collect_block(&foreach.body, calls);
        }
        StatementKind::Return(Some(expr)) | StatementKind::Expression(expr) => {
            collect_expr(expr, calls);
        }
        StatementKind::Return(None) => {}
        StatementKind::Block(block) => collect_block(block, calls),
    }
}

fn collect_expr<'b>(expr: &'b Expr, calls: &mut Vec<&'b str>) {
    match &expr.kind {
        ExprKind::Call { name, args } => {
            calls.push(name);
            for arg in args {
                collect_expr(arg, calls);
            }
        }
        ExprKind::ListLiteral(elements) => {
            for element in elements {
                collect_expr(element, calls);
            }
        }
        ExprKind::StructLiteral { fields, .. } => {
            for field in fields {
                collect_expr(&field.value, calls);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            collect_expr(left, calls);
            collect_expr(right, calls);
        }
        ExprKind::Unary { operand, .. } => collect_expr(operand, calls),
        ExprKind::Index { list, index } => {
            collect_expr(list, calls);
            collect_expr(index, calls);
        }
        ExprKind::Field { base, .. } => collect_expr(base, calls),
        ExprKind::IntLiteral(_)
        | ExprKind::DoubleLiteral(_)
        | ExprKind::CharLiteral(_)
        | ExprKind::StringLiteral(_)
        | ExprKind::BoolLiteral(_)
        | ExprKind::Variable(_) => {}
    }
}
