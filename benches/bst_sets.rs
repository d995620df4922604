use criterion::{black_box, criterion_group, criterion_main, Criterion};
use balanced_trees::red_black_tree::RedBlackSet;
use balanced_trees::{Config, Pooling};
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 1000;

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.next_u32());
            }
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = BTreeSet::new();
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        set.insert(key);
        keys.push(key);
    }

    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(set.contains(key));
            }
        })
    });
}

fn bench_pooling(c: &mut Criterion) {
    let modes = [
        ("disabled", Pooling::Disabled),
        ("lazy", Pooling::Lazy),
        ("preallocated", Pooling::Preallocated(NUM_OF_OPERATIONS)),
    ];
    for (name, pooling) in modes.iter() {
        let config = Config::new().pooling(*pooling);
        c.bench_function(&format!("bench {} pooling", name), move |b| {
            let mut set = RedBlackSet::with_config(config);
            b.iter(|| {
                let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                for _ in 0..NUM_OF_OPERATIONS {
                    set.insert(rng.next_u32());
                }
                set.clear();
            })
        });
    }
}

macro_rules! bst_set_benches {
    ($($module_name:ident: $parent:ident::$type_name:ident,)*) => {
        $(
            mod $module_name {
                use balanced_trees::$parent::$type_name;
                use rand::Rng;
                use super::NUM_OF_OPERATIONS;
                use criterion::{Criterion, black_box};

                pub fn bench_insert(c: &mut Criterion) {
                    let name = format!("bench {} insert", stringify!($module_name));
                    c.bench_function(&name, |b| b.iter(|| {
                        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                        let mut set = $type_name::new();
                        for _ in 0..NUM_OF_OPERATIONS {
                            set.insert(rng.next_u32());
                        }
                    }));
                }

                pub fn bench_contains(c: &mut Criterion) {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut set = $type_name::new();
                    let mut keys = Vec::new();
                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.next_u32();
                        set.insert(key);
                        keys.push(key);
                    }

                    let name = format!("bench {} contains", stringify!($module_name));
                    c.bench_function(&name, move |b| b.iter(|| {
                        for key in &keys {
                            black_box(set.contains(key));
                        }
                    }));
                }

                pub fn bench_insert_erase(c: &mut Criterion) {
                    let name = format!("bench {} insert erase", stringify!($module_name));
                    c.bench_function(&name, |b| b.iter(|| {
                        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                        let mut set = $type_name::new();
                        let mut keys = Vec::new();
                        for _ in 0..NUM_OF_OPERATIONS {
                            let key = rng.next_u32();
                            set.insert(key);
                            keys.push(key);
                        }
                        rng.shuffle(&mut keys);
                        for key in &keys {
                            black_box(set.erase(key));
                        }
                    }));
                }
            }
        )*

        criterion_group!(
            benches,
            bench_btreeset_contains,
            bench_btreeset_insert,
            bench_pooling,
            $(
                $module_name::bench_contains,
                $module_name::bench_insert,
                $module_name::bench_insert_erase,
            )*
        );
    }
}

bst_set_benches!(
    avl: avl_tree::AvlSet,
    bottom_up: red_black_tree::RedBlackSet,
    top_down: red_black_tree::TopDownSet,
    left_leaning: red_black_tree::LeftLeaningSet,
    hybrid: red_black_tree::HybridSet,
);

criterion_main!(benches);
