use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linked_collections::DoublyLinkedList;
use std::collections::LinkedList;

fn bench_list(c: &mut Criterion) {
    let n = 256;
    {
        let mut group = c.benchmark_group("LinkedList vs DoublyLinkedList (PushBack 256)");
        group.bench_function("std::collections::LinkedList", |b| {
            b.iter(|| {
                let mut l = LinkedList::new();
                for i in 0..n {
                    l.push_back(black_box(i as i32));
                }
                l
            })
        });

        group.bench_function("DoublyLinkedList<i32>", |b| {
            b.iter(|| {
                let mut l = DoublyLinkedList::new();
                for i in 0..n {
                    l.push_back(black_box(i as i32));
                }
                l
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("LinkedList vs DoublyLinkedList (Iterate 256)");
        let l_std: LinkedList<i32> = (0..n).collect();
        let l_dll: DoublyLinkedList<i32> = (0..n).collect();

        group.bench_function("std::collections::LinkedList", |b| {
            b.iter(|| black_box(l_std.iter().sum::<i32>()))
        });

        group.bench_function("DoublyLinkedList<i32>", |b| {
            b.iter(|| black_box(l_dll.iter().sum::<i32>()))
        });
        group.finish();
    }
}

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("Copy Assignment (256 onto 256)");
    let src: DoublyLinkedList<String> = (0..256).map(|i| i.to_string()).collect();

    group.bench_function("clone_from (node reuse)", |b| {
        let mut dst: DoublyLinkedList<String> = (0..256).map(|i| (i * 2).to_string()).collect();
        b.iter(|| {
            dst.clone_from(black_box(&src));
        })
    });

    group.bench_function("clone (fresh nodes)", |b| {
        b.iter(|| black_box(&src).clone())
    });
    group.finish();
}

fn bench_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Positional Insert/Erase (middle of 256)");
    let mut list: DoublyLinkedList<i32> = (0..256).collect();
    let mut mid = list.begin();
    for _ in 0..128 {
        mid.increment(&list);
    }

    group.bench_function("insert + erase", |b| {
        b.iter(|| {
            let pos = list.insert(black_box(mid), 7);
            list.erase(pos)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_list, bench_assign, bench_positions);
criterion_main!(benches);
