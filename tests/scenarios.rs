// ==============================================
// POLICY SCENARIOS (integration)
// ==============================================
//
// Short request traces with known outcomes, plus statistical checks on the
// randomized components.

use cachesim::prelude::*;
use rustc_hash::FxHashMap;

// ==============================================
// Trace Scenarios
// ==============================================

#[test]
fn lru_promoted_key_survives() {
    let mut cache = LruCache::new(2).unwrap();
    assert_eq!(cache.put("A"), None);
    assert_eq!(cache.put("B"), None);
    assert!(cache.get(&"A"));
    assert_eq!(cache.put("C"), Some("B"));
    assert_eq!(cache.dump(), vec!["C", "A"]);
    cache.check_invariants().unwrap();
}

#[test]
fn lfu_frequent_key_survives() {
    let mut cache = LfuCache::new(2).unwrap();
    assert_eq!(cache.put("A"), None);
    assert_eq!(cache.put("B"), None);
    assert!(cache.get(&"A"));
    assert_eq!(cache.put("C"), Some("B"));
    assert_eq!(cache.dump(), vec!["A", "C"]);
    cache.check_invariants().unwrap();
}

#[test]
fn fifo_hit_does_not_protect() {
    let mut cache = FifoCache::new(2).unwrap();
    assert_eq!(cache.put("A"), None);
    assert_eq!(cache.put("B"), None);
    assert!(cache.get(&"A"));
    assert_eq!(cache.put("C"), Some("A"));
    assert_eq!(cache.dump(), vec!["C", "B"]);
    cache.check_invariants().unwrap();
}

#[test]
fn lru_and_fifo_agree_without_hits() {
    let mut lru = LruCache::new(4).unwrap();
    let mut fifo = FifoCache::new(4).unwrap();
    for key in 0..50u32 {
        assert_eq!(lru.put(key), fifo.put(key));
    }
    assert_eq!(lru.dump(), fifo.dump());
}

#[test]
fn position_diagnostics() {
    let mut lru = LruCache::new(3).unwrap();
    let mut fifo = FifoCache::new(3).unwrap();
    for key in ["x", "y", "z"] {
        lru.put(key);
        fifo.put(key);
    }
    lru.get(&"x");
    fifo.get(&"x");

    assert_eq!(lru.position(&"x"), Ok(0));
    assert_eq!(fifo.position(&"x"), Ok(2));

    let err = lru.position(&"w").unwrap_err();
    assert!(err.to_string().contains("\"w\""));
    assert!(fifo.position(&"w").is_err());
}

// ==============================================
// Random Eviction Uniformity
// ==============================================

#[cfg_attr(miri, ignore)]
#[test]
fn rand_eviction_is_uniform_over_slots() {
    const CAPACITY: usize = 8;
    const TRIALS: usize = 80_000;

    let mut cache = RandCache::with_seed(CAPACITY, 0xC0FFEE).unwrap();
    // dump() lists slots in order and a victim's slot takes the newcomer,
    // so a victim's dump index is its slot.
    for key in 0..CAPACITY as u64 {
        cache.put(key);
    }

    let mut hits = [0usize; CAPACITY];
    for trial in 0..TRIALS {
        let before = cache.dump();
        let evicted = cache
            .put(CAPACITY as u64 + trial as u64)
            .expect("full cache must evict");
        let slot = before
            .iter()
            .position(|&k| k == evicted)
            .expect("victim was resident");
        hits[slot] += 1;
    }

    let expected = TRIALS as f64 / CAPACITY as f64;
    for (slot, &count) in hits.iter().enumerate() {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(
            deviation < 0.05,
            "slot {} evicted {} times, expected about {}",
            slot,
            count,
            expected
        );
    }
}

#[cfg_attr(miri, ignore)]
#[test]
fn rand_eviction_is_uniform_over_occupants() {
    const CAPACITY: usize = 5;
    const TRIALS: usize = 50_000;

    // Residents are ranked by insertion time; age must not bias the victim.
    let mut cache = RandCache::with_seed(CAPACITY, 7).unwrap();
    let mut next_key = 0u64;
    let mut inserted_at: FxHashMap<u64, usize> = FxHashMap::default();
    for _ in 0..CAPACITY {
        inserted_at.insert(next_key, 0);
        cache.put(next_key);
        next_key += 1;
    }

    let mut by_age_rank = [0usize; CAPACITY];
    for trial in 1..=TRIALS {
        let mut residents = cache.dump();
        residents.sort_by_key(|k| inserted_at[k]);
        let evicted = cache.put(next_key).expect("full cache must evict");
        inserted_at.insert(next_key, trial);
        next_key += 1;

        let rank = residents
            .iter()
            .position(|&k| k == evicted)
            .expect("victim was resident");
        by_age_rank[rank] += 1;
        inserted_at.remove(&evicted);
    }

    let expected = TRIALS as f64 / CAPACITY as f64;
    for (rank, &count) in by_age_rank.iter().enumerate() {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(deviation < 0.05, "age rank {} evicted {} times", rank, count);
    }
}

// ==============================================
// Wrappers
// ==============================================

#[test]
fn rand_insert_zero_probability_keeps_size() {
    for policy in [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::Fifo] {
        let inner = CacheBuilder::new(4).build::<u32>(policy).unwrap();
        let mut cache = RandInsertCache::new(inner.as_ref(), 0.0, None).unwrap();
        for key in 0..500 {
            cache.put(key);
            assert_eq!(cache.len(), 0);
        }
    }
}

#[test]
fn rand_insert_unit_probability_is_transparent() {
    for policy in [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::Fifo] {
        let mut plain = CacheBuilder::new(4).build::<u32>(policy).unwrap();
        let mut wrapped = RandInsertCache::new(plain.as_ref(), 1.0, Some(5)).unwrap();
        for i in 0..300u32 {
            let key = (i * 7) % 11;
            if i % 3 == 0 {
                assert_eq!(wrapped.get(&key), plain.get(&key));
            } else {
                assert_eq!(wrapped.put(key), plain.put(key));
            }
        }
        assert_eq!(wrapped.dump(), plain.dump());
    }
}

#[test]
fn rand_insert_admission_rate_tracks_probability() {
    let fifo = FifoCache::new(100_000).unwrap();
    let mut cache = RandInsertCache::new(&fifo, 0.25, Some(31)).unwrap();
    for key in 0..40_000u32 {
        cache.put(key);
    }
    let rate = cache.len() as f64 / 40_000.0;
    assert!((rate - 0.25).abs() < 0.02, "admission rate {}", rate);
}

#[test]
fn keyval_round_trip_over_every_policy() {
    for policy in [
        CachePolicy::Lru,
        CachePolicy::Lfu,
        CachePolicy::Fifo,
        CachePolicy::Rand { seed: Some(3) },
    ] {
        let inner = CacheBuilder::new(5).build::<u32>(policy).unwrap();
        let mut cache = KeyValCache::new(inner.as_ref()).unwrap();
        for key in 0..100u32 {
            let value = format!("v{}", key);
            if let Some((evicted, evicted_value)) = cache.put(key, value.clone()) {
                assert_eq!(evicted_value, format!("v{}", evicted), "{}", policy);
            }
            if cache.contains(&key) {
                assert_eq!(cache.get(&key), Some(&value), "{}", policy);
            }
            cache.check_invariants().unwrap();
        }
    }
}

#[test]
fn keyval_over_rand_insert_stays_consistent() {
    let lru = LruCache::new(3).unwrap();
    let sometimes = RandInsertCache::new(&lru, 0.5, Some(12)).unwrap();
    let mut cache = KeyValCache::new(&sometimes).unwrap();
    for key in 0..200u32 {
        cache.put(key % 10, key);
        cache.check_invariants().unwrap();
    }
}
