//! Benchmarks for event dispatch and subscription churn.

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use zeta_event::{Event, EventContext};

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    for subscribers in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(subscribers as u64));

        let event: Event<u64> = Event::new();
        let total = Rc::new(Cell::new(0u64));
        let contexts: Vec<EventContext> = (0..subscribers)
            .map(|_| {
                let ctx = EventContext::new();
                let total = Rc::clone(&total);
                ctx.register_event(&event, move |v| total.set(total.get().wrapping_add(*v)));
                ctx
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(subscribers), &event, |b, event| {
            b.iter(|| event.emit(black_box(1)));
        });

        drop(contexts);
    }

    group.finish();
}

fn bench_register_unregister(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_unregister");

    for subscribers in [16usize, 256] {
        group.throughput(Throughput::Elements(subscribers as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, &subscribers| {
                let event: Event<u64> = Event::new();
                b.iter(|| {
                    let contexts: Vec<EventContext> = (0..subscribers)
                        .map(|_| {
                            let ctx = EventContext::new();
                            ctx.register_event(&event, |v| {
                                black_box(v);
                            });
                            ctx
                        })
                        .collect();
                    // Dropping unregisters every context.
                    drop(contexts);
                });
            },
        );
    }

    group.finish();
}

fn bench_relocate(c: &mut Criterion) {
    let events: Vec<Event<u64>> = (0..8).map(|_| Event::new()).collect();
    let ctx = EventContext::new();
    for event in &events {
        ctx.register_event(event, |_| {});
    }

    let mut current = ctx;
    c.bench_function("relocate_8_events", |b| {
        b.iter(|| {
            current = current.take();
        });
    });
}

criterion_group!(benches, bench_emit, bench_register_unregister, bench_relocate);
criterion_main!(benches);
