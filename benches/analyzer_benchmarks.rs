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

//! Performance benchmarks for the Crema semantic analyzer.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use crema::analyzer::{analyze_with_options, AnalyzerOptions};
use crema::ast::{
    BinaryOp, Block, Expr, ExprKind, FunctionDecl, Program, Statement, StatementKind,
    TopLevelItem, TypeDescriptor, VarDecl,
};
use crema::Span;

// ============================================================================
// Benchmark Inputs
// ============================================================================

fn span() -> Span {
    Span::new(0, 0)
}

fn expr(kind: ExprKind) -> Expr {
    Expr::new(kind, span())
}

fn call(name: String, args: Vec<Expr>) -> Expr {
    expr(ExprKind::Call { name, args })
}

/// `f0 <- f1 <- ... <- f(n-1)`: every function calls its predecessor.
fn call_chain(len: usize) -> Program {
    let items = (0..len)
        .map(|i| {
            let param = VarDecl::new("n", TypeDescriptor::int(), span());
            let value = if i == 0 {
                expr(ExprKind::Variable("n".to_string()))
            } else {
                call(
                    format!("f{}", i - 1),
                    vec![expr(ExprKind::Binary {
                        left: Box::new(expr(ExprKind::Variable("n".to_string()))),
                        op: BinaryOp::Add,
                        right: Box::new(expr(ExprKind::IntLiteral(1))),
                    })],
                )
            };
            TopLevelItem::Function(FunctionDecl {
                name: format!("f{}", i),
                return_type: TypeDescriptor::int(),
                params: vec![param],
                body: Block::new(
                    vec![Statement::new(StatementKind::Return(Some(value)), span())],
                    span(),
                ),
                span: span(),
            })
        })
        .collect();
    Program { items }
}

/// `count` top-level declarations in nested blocks of the given depth.
fn wide_program(count: usize, depth: usize) -> Program {
    let items = (0..count)
        .map(|i| {
            let mut stmt = Statement::new(
                StatementKind::VarDecl(
                    VarDecl::new(format!("v{}", i), TypeDescriptor::int(), span())
                        .with_initializer(expr(ExprKind::IntLiteral(i as i64))),
                ),
                span(),
            );
            for _ in 0..depth {
                stmt = Statement::new(StatementKind::Block(Block::new(vec![stmt], span())), span());
            }
            TopLevelItem::Statement(stmt)
        })
        .collect();
    Program { items }
}

// ============================================================================
// Analyzer Benchmarks
// ============================================================================

fn bench_call_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_chain");

    for len in [10usize, 50, 200] {
        let program = call_chain(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("analyze", len), &program, |b, p| {
            b.iter(|| analyze_with_options(black_box(p), AnalyzerOptions::default()).is_ok())
        });
    }

    group.finish();
}

fn bench_wide_program(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_program");

    for (count, depth) in [(100usize, 1usize), (1_000, 1), (100, 32)] {
        let program = wide_program(count, depth);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("analyze", format!("{}x{}", count, depth)),
            &program,
            |b, p| b.iter(|| analyze_with_options(black_box(p), AnalyzerOptions::default()).is_ok()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_call_chain, bench_wide_program);
criterion_main!(benches);
