#![allow(non_snake_case)]

use rand::{
    SeedableRng,
    rngs::StdRng,
};
use spin_decide::{
    EntryRegistry,
    RegistryError,
    config::RegistryConfig,
    history::{
        HistoryStore,
        LocalStoreHistoryStorage,
    },
    store::LocalStore,
    wheel,
};
use std::{
    collections::HashMap,
    time::{
        SystemTime,
        UNIX_EPOCH,
    },
};

fn temp_store(name: &str) -> LocalStore {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("spin-decide-it-{name}-{nanos}"));
    LocalStore::new(dir.join("store.json"))
}

#[test]
fn spin_recorded__history_survives_reopening_the_store() {
    // given
    let store = temp_store("history");
    let mut registry = EntryRegistry::new(RegistryConfig::default());
    registry.set_text("Pizza\nSushi\nTacos").unwrap();
    registry.confirm().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let mut history = HistoryStore::open(LocalStoreHistoryStorage::new(store.clone()));

    // when
    let mut winners = Vec::new();
    for _ in 0..20 {
        let result = registry.spin_recorded(&mut rng, &mut history).unwrap();
        winners.push(result.winner.entry.name);
    }
    let reopened = HistoryStore::open(LocalStoreHistoryStorage::new(store.clone()));

    // then
    let record = reopened.query(&registry.signature());
    assert_eq!(record.total, 20);
    assert_eq!(record.results.values().sum::<u64>(), 20);
    for name in &winners {
        assert!(record.wins(name) > 0);
    }
    let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
}

#[test]
fn spin__lands_inside_the_winning_segment() {
    let mut registry = EntryRegistry::new(RegistryConfig::default());
    registry.set_ratio_mode(true).unwrap();
    registry.set_text("A:50\nB:30\nC:20").unwrap();
    registry.confirm().unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let result = registry.spin(&mut rng).unwrap();
        let plan = wheel::SpinPlan::new(0.0, result.segment, 0.5);
        let segments = registry.segments();

        let under_pointer = wheel::segment_at_pointer(&segments, plan.final_rotation);

        assert_eq!(under_pointer, Some(result.winner.index));
    }
}

#[test]
fn spin__follows_ratio_weights() {
    let mut registry = EntryRegistry::new(RegistryConfig::default());
    registry.set_ratio_mode(true).unwrap();
    registry.set_text("A:70\nB:20\nC:10").unwrap();
    registry.confirm().unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let draws = 50_000;

    let mut counts: HashMap<String, u32> = HashMap::new();
    for _ in 0..draws {
        let result = registry.spin(&mut rng).unwrap();
        *counts.entry(result.winner.entry.name).or_default() += 1;
    }

    for (name, weight) in [("A", 0.7), ("B", 0.2), ("C", 0.1)] {
        let observed = f64::from(counts[name]) / f64::from(draws);
        assert!((observed - weight).abs() < 0.02, "{name}: {observed}");
    }
}

#[test]
fn single_entry_mode__edits_round_trip_through_confirmation() {
    // given
    let mut registry = EntryRegistry::new(RegistryConfig::default());
    registry.set_text("Alice\nBob").unwrap();
    registry.set_single_entry_mode(true);

    // when
    registry.add_single_entry("Carol:40").unwrap();
    registry.confirm().unwrap();
    let locked = registry.add_single_entry("Dave");
    registry.cancel();
    let removed = registry.delete_entry(0).unwrap();

    // then
    assert_eq!(locked, Err(RegistryError::Locked));
    assert_eq!(removed.name, "Alice");
    assert_eq!(registry.text(), "Bob\nCarol");
    assert!(registry.entries().entries().iter().all(|e| e.weight == 1));
}

#[test]
fn confirm__reports_why_entries_cannot_spin() {
    let mut registry = EntryRegistry::new(RegistryConfig::default());
    registry.set_text("Only").unwrap();
    assert_eq!(
        registry.confirm(),
        Err(RegistryError::TooFewEntries { min: 2, found: 1 })
    );

    registry.set_ratio_mode(true).unwrap();
    registry.set_text("A:60\nB:30").unwrap();
    assert_eq!(
        registry.confirm(),
        Err(RegistryError::RatioNotFull {
            expected: 100,
            total: 90
        })
    );
    assert!(!registry.modes().confirmed);
}
