use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nanoc_util::Symbol;

fn bench_intern_miss(c: &mut Criterion) {
    let mut i = 0u64;
    c.bench_function("symbol_intern_miss", |b| {
        b.iter(|| {
            i += 1;
            black_box(Symbol::intern(&format!("sym_{i}")))
        })
    });
}

fn bench_intern_hit(c: &mut Criterion) {
    let sym = Symbol::intern("repeated_identifier");
    c.bench_function("symbol_intern_hit", |b| {
        b.iter(|| black_box(Symbol::intern(sym.as_str())))
    });
}

criterion_group!(benches, bench_intern_miss, bench_intern_hit);
criterion_main!(benches);
