use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcane_armory::forge_item;
use arcane_armory::render::Card;
use arcane_armory::TableSet;

fn bench_forge(c: &mut Criterion) {
    let tables = TableSet::builtin().unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("forge_item", |b| {
        b.iter(|| forge_item(black_box(&tables), &mut rng))
    });

    c.bench_function("builtin_tables", |b| {
        b.iter(|| TableSet::builtin().unwrap())
    });
}

fn bench_card(c: &mut Criterion) {
    let tables = TableSet::builtin().unwrap();
    let item = forge_item(&tables, &mut StdRng::seed_from_u64(7));
    let notes = vec!["🔒 OpenAI not configured; showing base generator output.".to_string()];

    c.bench_function("render_card", |b| {
        b.iter(|| Card::new(black_box(&item), &notes).ansi_lines())
    });
}

criterion_group!(benches, bench_forge, bench_card);
criterion_main!(benches);
