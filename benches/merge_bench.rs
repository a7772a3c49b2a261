use chrono::DateTime;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use url::Url;

use media_merge::collection::{MediaCollection, VecCollection};
use media_merge::{MediaItem, MergedMediaList, SortOrder};

const PER_SOURCE: i64 = 10_000;

/// Three interleaved sources: images every 3ms, videos every 7ms, internal every 11ms.
fn build() -> MergedMediaList {
    let order = SortOrder::Descending;
    let sources = [("images", 3), ("videos", 7), ("internal", 11)]
        .into_iter()
        .map(|(name, step)| {
            let items = (0..PER_SOURCE).map(move |i| {
                let uri = Url::parse(&format!("content://media/{name}/{i}")).unwrap();
                MediaItem::new(uri, DateTime::from_timestamp_millis(i * step).unwrap())
            });
            Box::new(VecCollection::new(order, items)) as Box<dyn MediaCollection>
        })
        .collect();
    MergedMediaList::new(sources, order).unwrap()
}

fn bench_merge(c: &mut Criterion) {
    c.bench_function("sequential_full_merge", |b| {
        b.iter_batched(
            build,
            |mut list| {
                for i in 0..list.count() {
                    black_box(list.get_at(i).unwrap());
                }
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("random_access_warm_memo", |b| {
        let mut list = build();
        let count = list.count();
        list.get_at(count - 1).unwrap();
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 7_919) % count;
            black_box(list.get_at(i).unwrap())
        })
    });

    c.bench_function("index_of_warm_memo", |b| {
        let mut list = build();
        let count = list.count();
        let item = list.get_at(count / 2).unwrap().unwrap();
        b.iter(|| black_box(list.index_of(&item).unwrap()))
    });
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
