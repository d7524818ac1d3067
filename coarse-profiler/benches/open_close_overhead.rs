use coarse_profiler::profiler::{Profiler, to_chrome_tracing_events};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

const PAIRS: usize = 10_000;

fn bench_open_close(c: &mut Criterion) {
    c.bench_function("open_close_presized", |b| {
        b.iter_batched(
            || Profiler::new(PAIRS + 2),
            |mut profiler| {
                for _ in 0..PAIRS {
                    profiler.open(black_box("pair"));
                    profiler.close();
                }
                profiler
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("open_close_growing", |b| {
        b.iter_batched(
            || Profiler::new(2),
            |mut profiler| {
                for _ in 0..PAIRS {
                    profiler.open(black_box("pair"));
                    profiler.close();
                }
                profiler
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("scoped_nested", |b| {
        b.iter_batched(
            || Profiler::new(2 * PAIRS + 2),
            |mut profiler| {
                for _ in 0..PAIRS {
                    let mut outer = profiler.scoped("outer");
                    let _inner = outer.scoped("inner");
                }
                profiler
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_export(c: &mut Criterion) {
    let mut profiler = Profiler::new(PAIRS + 2);
    for _ in 0..PAIRS {
        profiler.open("pair");
        profiler.close();
    }

    c.bench_function("to_chrome_tracing_events", |b| {
        b.iter(|| black_box(to_chrome_tracing_events(&profiler)));
    });
}

criterion_group!(benches, bench_open_close, bench_export);
criterion_main!(benches);
