use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_get_hotset(c: &mut Criterion) {
    c.bench_function("lru_get_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(4096);
                for i in 0..4096u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i % 256)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_eviction_churn,
    bench_lru_get_hotset
);
criterion_main!(benches);
