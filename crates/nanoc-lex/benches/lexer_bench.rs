use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nanoc_lex::tokenize;
use nanoc_util::FileId;

const FIB_SOURCE: &str = r#"
int fib(int n) {
    if (n < 2) return n;
    return fib(n - 1) + fib(n - 2);
}
int main() {
    int total = 0;
    for (int i = 0; i < 20; i = i + 1) {
        total = total + fib(i);
    }
    return total;
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_fib_program", |b| {
        b.iter(|| black_box(tokenize(FIB_SOURCE, FileId::DUMMY).unwrap()))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
