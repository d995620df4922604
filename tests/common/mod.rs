#![allow(dead_code)]

use balanced_trees::balancer::Balancer;
use balanced_trees::{BalancedMap, BalancedSet, Config, Pooling, Replacement};
use rand::{Rng, SeedableRng, XorShiftRng};
use simplelog::{LevelFilter, SimpleLogger};
use std::collections::{BTreeMap, BTreeSet};

/// 22 keys, one of which (14) is inserted and erased twice.
pub const KEYS: [i32; 22] = [
    8, 9, 11, 15, 19, 20, 21, 7, 3, 2, 1, 5, 6, 4, 13, 14, 10, 12, 14, 17, 16, 18,
];
pub const PRESENT_KEY: i32 = 13;
pub const DUPLICATE_KEY: i32 = 14;
pub const MISSING_KEY: i32 = 0;

pub const REPLACEMENTS: [Replacement; 3] = [
    Replacement::Successor,
    Replacement::Predecessor,
    Replacement::Preferred,
];

pub fn init_logger() {
    let _ = SimpleLogger::init(LevelFilter::Warn, simplelog::Config::default());
}

pub fn rng(seed: u32) -> XorShiftRng {
    SeedableRng::from_seed([seed, 1, 1, 1])
}

pub fn key_scenario<B: Balancer>(config: Config) {
    init_logger();
    let mut set: BalancedSet<i32, B> = BalancedSet::with_config(config);
    let mut seen = BTreeSet::new();

    for key in KEYS.iter() {
        assert_eq!(set.insert(*key), seen.insert(*key));
        assert_eq!(set.len(), seen.len());
        set.check_tree();
    }
    assert!(!set.insert(DUPLICATE_KEY));
    assert_eq!(set.len(), 21);
    assert_eq!(set.iter().cloned().collect::<Vec<i32>>(), (1..22).collect::<Vec<i32>>());

    assert!(set.contains(&PRESENT_KEY));
    assert!(!set.contains(&MISSING_KEY));
    assert!(!set.erase(&MISSING_KEY));
    set.check_tree();

    for key in KEYS.iter() {
        assert_eq!(set.erase(key), seen.remove(key));
        assert_eq!(set.len(), seen.len());
        set.check_tree();
    }
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
}

pub fn random_operations<B: Balancer>(config: Config, seed: u32) {
    init_logger();
    let mut rng = rng(seed);
    let mut set: BalancedSet<u32, B> = BalancedSet::with_config(config);
    let mut expected = BTreeSet::new();

    for _ in 0..2000 {
        let key = rng.gen_range(0, 256);
        if rng.gen::<bool>() {
            assert_eq!(set.insert(key), expected.insert(key));
        } else {
            assert_eq!(set.erase(&key), expected.remove(&key));
        }
        assert_eq!(set.len(), expected.len());
        set.check_tree();
    }

    assert!(set.iter().eq(expected.iter()));
    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
}

pub fn shuffled_keys<B: Balancer>(config: Config, seed: u32) {
    init_logger();
    let mut rng = rng(seed);
    let mut keys: Vec<u32> = (0..1000).collect();
    let mut set: BalancedSet<u32, B> = BalancedSet::with_config(config);

    rng.shuffle(&mut keys);
    for key in &keys {
        assert!(set.insert(*key));
    }
    set.check_tree();
    assert_eq!(set.len(), 1000);
    assert!(set.iter().cloned().eq(0..1000));
    for key in &keys {
        assert!(set.contains(key));
    }

    rng.shuffle(&mut keys);
    for (index, key) in keys.iter().enumerate() {
        assert!(set.erase(key));
        assert!(!set.contains(key));
        if index % 50 == 0 {
            set.check_tree();
        }
    }
    set.check_tree();
    assert!(set.is_empty());
}

pub fn sorted_keys<B: Balancer>(config: Config) {
    init_logger();
    let mut set: BalancedSet<u32, B> = BalancedSet::with_config(config);
    for key in 0..512 {
        assert!(set.insert(key));
        set.check_tree();
    }
    for key in (512..1024).rev() {
        assert!(set.insert(key));
        set.check_tree();
    }
    for key in 0..1024 {
        assert!(set.erase(&key));
        set.check_tree();
    }
    assert!(set.is_empty());
}

pub fn pooling<B: Balancer>() {
    init_logger();
    let mut set: BalancedSet<u32, B> =
        BalancedSet::with_config(Config::new().pooling(Pooling::Preallocated(64)));
    assert_eq!(set.free_len(), 64);
    for key in 0..64 {
        set.insert(key);
    }
    assert_eq!(set.free_len(), 0);
    for key in 0..32 {
        set.erase(&key);
    }
    assert_eq!(set.free_len(), 32);
    for key in 100..132 {
        set.insert(key);
    }
    assert_eq!(set.free_len(), 0);
    set.check_tree();

    let mut set: BalancedSet<u32, B> =
        BalancedSet::with_config(Config::new().pooling(Pooling::Disabled));
    for key in 0..16 {
        set.insert(key);
    }
    for key in 0..15 {
        assert!(set.erase(&key));
        assert_eq!(set.free_len(), 0);
    }
    set.check_tree();
    assert!(set.insert(15_000));
    assert!(set.erase(&15));
    assert!(set.erase(&15_000));
    assert_eq!(set.free_len(), 0);
    assert!(set.is_empty());
    assert!(set.insert(3));
    set.check_tree();
}

pub fn clear_and_reuse<B: Balancer>() {
    init_logger();
    let mut set: BalancedSet<u32, B> = BalancedSet::new();
    for key in 0..100 {
        set.insert(key);
    }
    set.clear();
    assert!(set.is_empty());
    set.check_tree();
    for key in (0..100).rev() {
        assert!(set.insert(key));
    }
    assert_eq!(set.free_len(), 0);
    set.check_tree();
}

pub fn map_operations<B: Balancer>(seed: u32) {
    init_logger();
    let mut rng = rng(seed);
    let mut map: BalancedMap<String, u32, B> = BalancedMap::new();
    let mut expected = BTreeMap::new();

    for value in 0..1000 {
        let key = format!("{:x}", rng.gen_range(0, 400));
        assert_eq!(map.insert(key.clone(), value), expected.insert(key, value).is_none());
    }
    assert_eq!(map.len(), expected.len());
    map.check_tree();

    for (key, value) in &expected {
        assert_eq!(map.get(key), Some(value));
    }
    assert!(map.iter().eq(expected.iter()));

    let keys: Vec<String> = expected.keys().cloned().collect();
    for key in keys.iter().step_by(2) {
        assert_eq!(map.remove(key), expected.remove(key));
        map.check_tree();
    }
    for key in &keys {
        assert_eq!(map.contains_key(key), expected.contains_key(key));
    }
    assert_eq!(map.len(), expected.len());
}
