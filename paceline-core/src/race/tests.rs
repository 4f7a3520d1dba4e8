use std::time::{Duration, Instant};

use crate::race::Race;
use crate::BibNumber;

fn race_with_offsets(offsets: &[(BibNumber, u64)]) -> Race {
    let mut race = Race::new("test");
    for &(number, offset) in offsets {
        race.add_racer(number, &format!("racer{}", number), false, offset)
            .unwrap();
    }
    race
}

/// Five racers, no stagger, checkpointed ten seconds apart: racer 1 is the
/// fastest, racer 5 the slowest.
fn spread_field() -> Race {
    let mut race = race_with_offsets(&[(1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    let base = Instant::now();
    for i in 1..=5u64 {
        race.checkpoint_at(i as BibNumber, base + Duration::from_secs(i * 10))
            .unwrap();
    }
    race
}

#[test]
fn checkpoint_lifecycle() {
    let mut race = race_with_offsets(&[(1, 0), (2, 0)]);
    assert!(!race.has_checkpointed(1));

    race.checkpoint(1).unwrap();
    assert!(race.has_checkpointed(1));
    assert!(!race.has_checkpointed(2));

    race.undo_checkpoint(1);
    assert!(!race.has_checkpointed(1));
    // undoing again is a no-op
    race.undo_checkpoint(1);

    race.checkpoint(1).unwrap();
    race.checkpoint(2).unwrap();
    race.reset();
    assert!(!race.has_checkpointed(1));
    assert!(!race.has_checkpointed(2));
    assert_eq!(race.numbers(), vec![1, 2]);
}

#[test]
fn checkpoint_requires_a_registered_bib() {
    let mut race = race_with_offsets(&[(1, 0)]);
    assert!(race.checkpoint(42).is_err());
    assert!(!race.has_checkpointed(42));
}

#[test]
fn checkpoint_overwrites_an_earlier_one() {
    let mut race = race_with_offsets(&[(1, 0), (2, 0)]);
    let base = Instant::now();
    race.checkpoint_at(1, base).unwrap();
    race.checkpoint_at(2, base + Duration::from_secs(5)).unwrap();
    race.checkpoint_at(2, base + Duration::from_secs(1)).unwrap();

    let splits = race.get_splits(1, None).unwrap();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].number, 2);
    assert_eq!(splits[0].split_ms, 1000);
}

#[test]
fn start_is_display_only_and_restartable() {
    let mut race = race_with_offsets(&[(1, 0)]);
    assert!(race.start_time().is_none());

    // checkpointing before the gun is well-defined
    race.checkpoint(1).unwrap();
    race.start();
    let first = race.start_time().unwrap();
    race.start();
    assert!(race.start_time().unwrap() >= first);
    assert!(race.has_checkpointed(1));
}

#[test]
fn splits_are_empty_without_a_checkpoint() {
    let race = race_with_offsets(&[(1, 0), (2, 0)]);
    assert!(race.get_splits(1, None).unwrap().is_empty());
    assert_eq!(race.format_splits(1, None).unwrap(), "");
}

#[test]
fn offsets_normalize_staggered_starts() {
    let mut race = race_with_offsets(&[(1, 0), (2, 10)]);
    let base = Instant::now();
    race.checkpoint_at(1, base).unwrap();
    race.checkpoint_at(2, base + Duration::from_secs(10)).unwrap();

    // racer 2 started ten seconds later and checkpointed ten seconds
    // later, so on race time they are even
    let splits = race.get_splits(1, None).unwrap();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].number, 2);
    assert_eq!(splits[0].split_ms, 0);
    assert_eq!(splits[0].race_time_ms, 0);
}

#[test]
fn splits_sort_slowest_first_with_signed_gaps() {
    let race = spread_field();
    let splits = race.get_splits(3, Some(3)).unwrap();

    let numbers: Vec<_> = splits.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![5, 4, 2, 1]);
    let gaps: Vec<_> = splits.iter().map(|e| e.split_ms).collect();
    assert_eq!(gaps, vec![20_000, 10_000, -10_000, -20_000]);
}

#[test]
fn window_comes_from_the_rank_before_removal() {
    let race = spread_field();

    // mid-field: one neighbor each side
    let numbers: Vec<_> = race
        .get_splits(3, Some(1))
        .unwrap()
        .iter()
        .map(|e| e.number)
        .collect();
    assert_eq!(numbers, vec![4, 2]);

    // slowest racer sits at the top of the ranking
    let numbers: Vec<_> = race
        .get_splits(5, Some(2))
        .unwrap()
        .iter()
        .map(|e| e.number)
        .collect();
    assert_eq!(numbers, vec![4, 3]);

    // fastest racer sits at the bottom
    let numbers: Vec<_> = race
        .get_splits(1, Some(2))
        .unwrap()
        .iter()
        .map(|e| e.number)
        .collect();
    assert_eq!(numbers, vec![3, 2]);
}

#[test]
fn format_truncates_toward_zero_and_marks_positive_gaps() {
    let mut race = race_with_offsets(&[(1, 0), (2, 0), (3, 0)]);
    let base = Instant::now();
    race.checkpoint_at(1, base).unwrap();
    race.checkpoint_at(2, base + Duration::from_millis(1500))
        .unwrap();
    race.checkpoint_at(3, base + Duration::from_millis(500))
        .unwrap();

    // behind by 1.5s and 0.5s: positive, sub-second gap shows as +0
    assert_eq!(
        race.format_splits(1, None).unwrap(),
        "2,\tracer2,\t+1\n3,\tracer3,\t+0"
    );
    // ahead by 1.0s and 1.5s: both truncate to -1, no extra prefix
    assert_eq!(
        race.format_splits(2, None).unwrap(),
        "3,\tracer3,\t-1\n1,\tracer1,\t-1"
    );
}

#[test]
fn roster_reload_prunes_orphan_checkpoints() {
    let mut race = race_with_offsets(&[(1, 0), (2, 0)]);
    race.checkpoint(1).unwrap();
    race.checkpoint(2).unwrap();

    race.load_csv("1,\tAlice,\t\tn,\t00:00").unwrap();
    assert!(race.has_checkpointed(1));
    assert!(!race.has_checkpointed(2));
    assert_eq!(race.start_list().name(1).unwrap(), "Alice");
}

#[test]
fn bulk_add_after_roster_reload_allocates_fresh_bibs() {
    let mut race = Race::new("test");
    race.load_csv("1,\tA,\t\tn,\t00:00\n2,\tB,\t\tn,\t00:02\n3,\tC,\t\tn,\t00:04")
        .unwrap();

    race.add_some_racers(2);
    assert_eq!(race.numbers(), vec![1, 2, 3, 4, 5]);
    // the loaded racers survive untouched
    assert_eq!(race.start_list().name(1).unwrap(), "A");
    assert_eq!(race.start_list().name(2).unwrap(), "B");
}

#[test]
fn update_racers_round_trips_a_listing() {
    let mut race = Race::new("a");
    race.add_some_racers(3);
    race.track(2).unwrap();

    let mut copy = Race::new("b");
    copy.update_racers(&race.racers()).unwrap();
    assert_eq!(copy.racers(), race.racers());
    assert!(copy.is_tracked(2).unwrap());
}
