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

//! Property-based tests for the Crema semantic analyzer.
//!
//! These tests verify invariants that should hold for all inputs, using
//! proptest for random program generation.

mod common;

use common::*;
use crema::analyzer::{AnalyzerOptions, SemanticContext, TypeInference};
use crema::ast::{BaseType, Statement, TypeDescriptor};
use crema::error::format_error;
use crema::{CompileError, ErrorCode, SemanticError, Span};
use proptest::prelude::*;

fn scalar_base() -> impl Strategy<Value = BaseType> {
    prop_oneof![
        Just(BaseType::Int),
        Just(BaseType::Double),
        Just(BaseType::Char),
        Just(BaseType::String),
        Just(BaseType::Bool),
    ]
}

fn literal_of(base: &BaseType, seed: i64) -> crema::ast::Expr {
    match base {
        BaseType::Int => int(seed),
        BaseType::Double => double(seed as f64 / 2.0),
        BaseType::Char => chr('a'),
        BaseType::String => string("s"),
        _ => boolean(seed % 2 == 0),
    }
}

/// Nest `depth` blocks, each declaring `x` once more.
fn nested_declarations(depth: usize, innermost: Vec<Statement>) -> Statement {
    let mut body = innermost;
    for level in (0..depth).rev() {
        let mut statements = vec![declare("x", t_int(), Some(int(level as i64)))];
        statements.append(&mut body);
        body = vec![block_stmt(statements)];
    }
    body.remove(0)
}

// ============================================================================
// Type Inference Properties
// ============================================================================

proptest! {
    /// Property: A homogeneous list literal infers as a list of its element type.
    #[test]
    fn prop_homogeneous_list(base in scalar_base(), seeds in prop::collection::vec(any::<i64>(), 1..20)) {
        let ctx = SemanticContext::new();
        let literal = list(seeds.iter().map(|s| literal_of(&base, *s)).collect());
        prop_assert_eq!(ctx.type_of(&literal), Some(TypeDescriptor::list_of(base)));
    }

    /// Property: One foreign element makes the whole list ill-typed.
    #[test]
    fn prop_foreign_element_is_ill_typed(
        len in 1usize..20,
        position in any::<prop::sample::Index>(),
    ) {
        let ctx = SemanticContext::new();
        let mut elements: Vec<_> = (0..len as i64).map(int).collect();
        elements.insert(position.index(len + 1), boolean(true));
        prop_assert_eq!(ctx.type_of(&list(elements)), None);
    }

    /// Property: Type descriptors are equal only when base and multiplicity are.
    #[test]
    fn prop_descriptor_equality(a in scalar_base(), b in scalar_base()) {
        prop_assert_eq!(TypeDescriptor::scalar_of(a.clone()) == TypeDescriptor::scalar_of(b.clone()), a == b);
        prop_assert_ne!(TypeDescriptor::scalar_of(a.clone()), TypeDescriptor::list_of(a));
    }
}

// ============================================================================
// Scope Properties
// ============================================================================

proptest! {
    /// Property: Redeclaring in a nested block always shadows successfully.
    #[test]
    fn prop_nested_shadowing_is_valid(depth in 1usize..24) {
        let p = program(vec![top(nested_declarations(depth, Vec::new()))]);
        prop_assert!(errors(&p).is_empty());
    }

    /// Property: Redeclaring in the same block always fails, at any depth.
    #[test]
    fn prop_same_scope_duplicate_fails(depth in 1usize..24) {
        let p = program(vec![top(nested_declarations(
            depth,
            vec![declare("y", t_int(), None), declare("y", t_bool(), None)],
        ))]);
        let codes: Vec<ErrorCode> = errors(&p).iter().map(CompileError::code).collect();
        prop_assert_eq!(codes, vec![ErrorCode::VariableAlreadyDefined]);
    }
}

// ============================================================================
// Function Properties
// ============================================================================

proptest! {
    /// Property: A call is accepted exactly when the arity matches.
    #[test]
    fn prop_call_arity(params in 0usize..8, args in 0usize..8) {
        let names: Vec<String> = (0..params).map(|i| format!("p{}", i)).collect();
        let signature: Vec<(&str, TypeDescriptor)> =
            names.iter().map(|n| (n.as_str(), t_int())).collect();
        let p = program(vec![
            function("f", t_void(), &signature, Vec::new()),
            top(expr_stmt(call("f", (0..args as i64).map(int).collect()))),
        ]);

        let codes: Vec<ErrorCode> = errors(&p).iter().map(CompileError::code).collect();
        if params == args {
            prop_assert!(codes.is_empty());
        } else {
            prop_assert_eq!(codes, vec![ErrorCode::WrongNumberOfArguments]);
        }
    }

    /// Property: A call chain is accepted, closing it into a cycle is not.
    #[test]
    fn prop_call_chain_and_cycle(len in 1usize..16, close in any::<bool>()) {
        // f0 calls f(len-1) when closed; every fi (i > 0) calls f(i-1)
        let items = (0..len)
            .map(|i| {
                let body = if i > 0 {
                    vec![expr_stmt(call(&format!("f{}", i - 1), Vec::new()))]
                } else if close {
                    vec![expr_stmt(call(&format!("f{}", len - 1), Vec::new()))]
                } else {
                    Vec::new()
                };
                procedure(&format!("f{}", i), body)
            })
            .collect();
        let p = program(items);

        let errors = errors_with(&p, AnalyzerOptions::default().with_hoisting(true));
        if close {
            prop_assert_eq!(errors.len(), 1);
            let is_recursion = matches!(
                &errors[0].kind,
                SemanticError::RecursionDetected { function } if function == "f0"
            );
            prop_assert!(is_recursion);
        } else {
            prop_assert!(errors.is_empty());
        }
    }
}

// ============================================================================
// Diagnostic Rendering Properties
// ============================================================================

proptest! {
    /// Property: Rendering never panics, whatever the span or source text.
    #[test]
    fn prop_format_error_any_span(
        source in "[a-zé€ =;\\n]{0,120}",
        start in 0usize..200,
        end in 0usize..200,
    ) {
        let error = CompileError::new(
            SemanticError::RecursionDetected { function: "f".to_string() },
            Span::new(start, end),
        );
        let rendered = format_error(&error, &source, Some("prop.cr"));
        prop_assert!(rendered.starts_with("error[E225]: "));
        prop_assert!(rendered.contains("--> prop.cr:"));
    }
}
