//! Benchmarks for metadata traversal
//!
//! Measures performance of:
//! - Default (identity) traversal of whole assemblies
//! - Counting traversal, with and without method bodies
//! - Outline rendering over the persistent line vector

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;

use metadata_visitor::metadata::{
    Accessors, AssemblyInfo, ConstructorInfo, FieldInfo, MethodInfo, TypeInfo,
};
use metadata_visitor::visitor::transforms::{ElementCounter, ElementCounts, MemberOutline};
use metadata_visitor::{ReflectionVisitor, VisitResult, VisitorRef, VisitorRefExt, ToElement};

// ============================================================================
// Synthetic assemblies
// ============================================================================

/// An assembly of `types` types, each with `members` members of every kind.
fn generate_assembly(types: usize, members: usize) -> Arc<AssemblyInfo> {
    let mut assembly = AssemblyInfo::builder("Bench");
    for t in 0..types {
        let mut builder = TypeInfo::builder(format!("Type{}", t)).namespace("Bench.Generated");
        for m in 0..members {
            builder = builder
                .field(FieldInfo::new(format!("field{}", m), "int"))
                .constructor(ConstructorInfo::new().parameter(format!("p{}", m), "int"))
                .property(format!("Property{}", m), "string", Accessors::READ_WRITE)
                .method(
                    MethodInfo::new(format!("Method{}", m), "void")
                        .parameter("a", "int")
                        .parameter("b", "string")
                        .local("int"),
                )
                .event(format!("Event{}", m), "EventHandler");
        }
        assembly = assembly.add_type(builder.build());
    }
    assembly.build()
}

/// Visitor that keeps every default.
struct Identity;

impl ReflectionVisitor<()> for Identity {
    fn value(&self) -> VisitResult<()> {
        Ok(())
    }
}

// ============================================================================
// Benchmark: Default traversal
// ============================================================================

fn bench_default_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("default_traversal");

    for types in [10, 100, 1000].iter() {
        let assembly = generate_assembly(*types, 10);
        let element = assembly.to_element();
        group.bench_with_input(BenchmarkId::new("identity", types), &element, |b, element| {
            let visitor: VisitorRef<()> = Arc::new(Identity);
            b.iter(|| black_box(visitor.visit(Some(element))))
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Counting traversal
// ============================================================================

fn bench_counting_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting_traversal");
    let element = generate_assembly(100, 10).to_element();

    group.bench_function("members", |b| {
        b.iter(|| {
            let visitor: VisitorRef<ElementCounts> = Arc::new(ElementCounter::new());
            black_box(visitor.visit(Some(&element)).and_then(|v| v.value()))
        })
    });

    group.bench_function("with_bodies", |b| {
        b.iter(|| {
            let visitor: VisitorRef<ElementCounts> = Arc::new(ElementCounter::with_bodies());
            black_box(visitor.visit(Some(&element)).and_then(|v| v.value()))
        })
    });

    group.finish();
}

// ============================================================================
// Benchmark: Outline rendering
// ============================================================================

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");

    for members in [1, 10, 50].iter() {
        let element = generate_assembly(50, *members).to_element();
        group.bench_with_input(BenchmarkId::new("members_per_type", members), &element, |b, element| {
            b.iter(|| {
                let visitor: VisitorRef<Vec<String>> = Arc::new(MemberOutline::new());
                black_box(visitor.visit(Some(element)).and_then(|v| v.value()))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2));
    targets =
        bench_default_traversal,
        bench_counting_traversal,
        bench_outline
}

criterion_main!(benches);
