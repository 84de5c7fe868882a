//! # History Scenario Tests
//!
//! Scenario-based verification of the reconciliation engine against the
//! behaviors that matter in the field: bounded capacity, order
//! preservation, undo/redo inversion, boundary no-ops, foreign-state
//! fallback, and divergent-write truncation.
//!
//! Every scenario drives the real engine over a temp workspace with an
//! in-memory pointer register standing in for the external resource.

#![allow(clippy::unwrap_used, clippy::panic)]

use scribbler_core::{
    Artifact, BackgroundPointer, HistoryEngine, MemoryPointer, Position, ScribbleError, Workspace,
};
use std::path::Path;

/// Tagged artifact so store contents can be traced back to the commit
/// that produced them.
fn artifact(tag: u8) -> Artifact {
    Artifact::new(vec![tag; 8])
}

fn engine_in(dir: &Path) -> HistoryEngine<MemoryPointer> {
    let ws = Workspace::resolve(dir).expect("resolve");
    HistoryEngine::open(&ws, MemoryPointer::new()).expect("open")
}

fn commit_n(engine: &mut HistoryEngine<MemoryPointer>, count: u8) {
    for tag in 1..=count {
        engine.commit(&artifact(tag)).expect("commit");
    }
}

// =============================================================================
// P1: MONOTONE CAPACITY
// =============================================================================

mod p1_monotone_capacity {
    use super::*;

    /// P1.1: The store never exceeds 10 entries after any commit.
    #[test]
    fn store_stays_bounded_across_many_commits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());

        for tag in 1..=25u8 {
            engine.commit(&artifact(tag)).expect("commit");
            assert!(engine.store().count().expect("count") <= 10);
        }

        // 25 commits, 24 archives, capacity still holds
        assert_eq!(engine.store().count().expect("count"), 10);
    }

    /// P1.2: Eviction removes the oldest entries, not the newest.
    #[test]
    fn eviction_drops_oldest_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 15);

        let entries = engine.store().entries().expect("entries");
        let oldest = engine.store().path_of(&entries[0]);

        // 14 archives total (tags 1..=14), the 10 survivors are tags 5..=14
        assert_eq!(std::fs::read(oldest).expect("read"), vec![5u8; 8]);
    }
}

// =============================================================================
// P2: ORDER PRESERVATION
// =============================================================================

mod p2_order_preservation {
    use super::*;

    /// P2.1: Sorting by name reflects true chronological archive order.
    #[test]
    fn name_order_is_archive_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 6);

        let entries = engine.store().entries().expect("entries");
        assert_eq!(entries.len(), 5);

        // Entry i (name-ascending) holds the artifact of commit i+1
        for (i, name) in entries.iter().enumerate() {
            let bytes = std::fs::read(engine.store().path_of(name)).expect("read");
            assert_eq!(bytes, vec![(i + 1) as u8; 8]);
        }
    }

    /// P2.2: Archive names carry strictly increasing timestamps even when
    /// commits land faster than the clock ticks.
    #[test]
    fn rapid_commits_still_sort_strictly() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 8);

        let entries = engine.store().entries().expect("entries");
        assert!(entries.windows(2).all(|w| w[0] < w[1]));
        assert!(entries.iter().all(|n| n.timestamp().is_some()));
    }
}

// =============================================================================
// P3: UNDO/REDO INVERSE (IN-RANGE)
// =============================================================================

mod p3_undo_redo_inverse {
    use super::*;

    /// P3.1: From a backup entry with an older neighbor, undo then redo
    /// restores the original pointer target.
    #[test]
    fn undo_redo_restores_backup_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 3);

        engine.undo().expect("undo to newest backup");
        let before = engine.current_position().expect("position");
        let Position::BackupEntry(ref n) = before else {
            panic!("expected backup entry, got {before:?}");
        };
        assert!(
            engine.store().next_older(n).expect("older").is_some(),
            "scenario needs an older neighbor"
        );

        engine.undo().expect("undo");
        engine.redo().expect("redo");

        assert_eq!(engine.current_position().expect("position"), before);
    }

    /// P3.2: A full walk down and back up returns to staging with the
    /// counter at zero.
    #[test]
    fn full_walk_round_trips_to_staging() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 4);

        for _ in 0..3 {
            engine.undo().expect("undo");
        }
        assert_eq!(engine.undo_count(), 3);

        for _ in 0..3 {
            engine.redo().expect("redo");
        }
        assert_eq!(engine.undo_count(), 0);
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
    }
}

// =============================================================================
// P4: BOUNDARY NO-OPS
// =============================================================================

mod p4_boundary_noops {
    use super::*;

    /// P4.1: Undo at staging with an empty store changes nothing.
    #[test]
    fn undo_with_empty_store_keeps_pointer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        engine.commit(&artifact(1)).expect("commit");

        let before = engine.pointer().get().expect("get");
        engine.undo().expect("undo");

        assert_eq!(engine.pointer().get().expect("get"), before);
        assert_eq!(engine.undo_count(), 0);
    }

    /// P4.2: Redo at staging changes nothing.
    #[test]
    fn redo_at_staging_keeps_pointer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 3);

        let before = engine.pointer().get().expect("get");
        engine.redo().expect("redo");

        assert_eq!(engine.pointer().get().expect("get"), before);
        assert_eq!(engine.undo_count(), 0);
    }

    /// P4.3: Undo at the oldest backup entry changes nothing.
    #[test]
    fn undo_at_oldest_entry_keeps_pointer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 3);

        engine.undo().expect("undo");
        engine.undo().expect("undo");
        assert_eq!(engine.undo_count(), 2);

        let before = engine.pointer().get().expect("get");
        engine.undo().expect("boundary undo");

        assert_eq!(engine.pointer().get().expect("get"), before);
        assert_eq!(engine.undo_count(), 2);
    }
}

// =============================================================================
// P5: FOREIGN-STATE FALLBACK
// =============================================================================

mod p5_foreign_state_fallback {
    use super::*;

    /// P5.1: With staging present, undo from a foreign path falls back to
    /// staging without touching the counter.
    #[test]
    fn foreign_pointer_falls_back_to_staging() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ws = Workspace::resolve(dir.path()).expect("resolve");

        let foreign = dir.path().join("somebody-elses.jpg");
        std::fs::write(&foreign, b"other process wrote this").expect("write foreign");

        let register = MemoryPointer::new();
        let mut engine = HistoryEngine::open(&ws, register.clone()).expect("open");
        engine.commit(&artifact(1)).expect("commit");

        // External actor rewrites the register behind our back
        register.overwrite(foreign.display().to_string());

        engine.undo().expect("undo");
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
        assert_eq!(engine.undo_count(), 0);
    }

    /// P5.2: With staging absent, undo from missing/foreign values is a
    /// no-op for every input, and never an error.
    #[test]
    fn fallback_without_staging_is_total_noop() {
        for raw in ["", "   ", "C:\\img0.jpg", "bad\0path", "/no/such/file.bmp"] {
            let dir = tempfile::tempdir().expect("tempdir");
            let ws = Workspace::resolve(dir.path()).expect("resolve");
            let mut engine =
                HistoryEngine::open(&ws, MemoryPointer::with_value(raw)).expect("open");

            engine.undo().expect("undo never errors");
            assert_eq!(engine.pointer().get().expect("get"), raw);
            assert_eq!(engine.undo_count(), 0);
        }
    }

    /// P5.3: Redo from missing/foreign values is always a no-op.
    #[test]
    fn redo_from_unrecognized_is_noop() {
        for raw in ["", "C:\\img0.jpg", "bad\0path"] {
            let dir = tempfile::tempdir().expect("tempdir");
            let ws = Workspace::resolve(dir.path()).expect("resolve");
            let register = MemoryPointer::new();
            let mut engine = HistoryEngine::open(&ws, register.clone()).expect("open");
            engine.commit(&artifact(1)).expect("commit");

            // Hijack the register after the commit
            register.overwrite(raw);

            engine.redo().expect("redo never errors");
            assert_eq!(engine.pointer().get().expect("get"), raw);
        }
    }
}

// =============================================================================
// P6: DIVERGENT-WRITE TRUNCATION
// =============================================================================

mod p6_divergent_write_truncation {
    use super::*;

    /// P6.1: Commit after k > 1 undos removes exactly the k-1 newest
    /// entries and resets the counter.
    #[test]
    fn commit_after_deep_undo_truncates_redo_branch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 5);
        assert_eq!(engine.store().count().expect("count"), 4);

        for _ in 0..3 {
            engine.undo().expect("undo");
        }
        assert_eq!(engine.undo_count(), 3);

        engine.commit(&artifact(6)).expect("divergent commit");

        assert_eq!(engine.undo_count(), 0);
        let entries = engine.store().entries().expect("entries");
        assert_eq!(entries.len(), 2);

        // Survivors are the two oldest archives (tags 1 and 2)
        for (i, name) in entries.iter().enumerate() {
            let bytes = std::fs::read(engine.store().path_of(name)).expect("read");
            assert_eq!(bytes, vec![(i + 1) as u8; 8]);
        }
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
    }

    /// P6.2: The single-undo commit branch archives nothing and leaves the
    /// store untouched (observed behavior, preserved).
    #[test]
    fn commit_after_single_undo_skips_archive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = engine_in(dir.path());
        commit_n(&mut engine, 2);
        assert_eq!(engine.store().count().expect("count"), 1);

        engine.undo().expect("undo");
        assert_eq!(engine.undo_count(), 1);

        engine.commit(&artifact(3)).expect("commit");

        let entries = engine.store().entries().expect("entries");
        assert_eq!(entries.len(), 1);
        let bytes = std::fs::read(engine.store().path_of(&entries[0])).expect("read");
        assert_eq!(bytes, vec![1u8; 8]);
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
    }
}

// =============================================================================
// REFERENCE SCENARIO
// =============================================================================

mod reference_scenario {
    use super::*;

    /// The full walkthrough: fresh engine, junk pointer, two commits, two
    /// undos, then the single-undo commit branch.
    #[test]
    fn fresh_engine_walkthrough() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ws = Workspace::resolve(dir.path()).expect("resolve");
        let mut engine =
            HistoryEngine::open(&ws, MemoryPointer::with_value("C:\\img0.jpg")).expect("open");

        // Undo with nothing known: pointer unchanged
        engine.undo().expect("undo");
        assert_eq!(engine.pointer().get().expect("get"), "C:\\img0.jpg");

        // First commit: staging created, store still empty
        engine.commit(&artifact(1)).expect("commit 1");
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
        assert_eq!(engine.store().count().expect("count"), 0);

        // Second commit: the first artifact is archived
        engine.commit(&artifact(2)).expect("commit 2");
        assert_eq!(engine.store().count().expect("count"), 1);
        assert_eq!(
            std::fs::read(ws.staging_path()).expect("read staging"),
            vec![2u8; 8]
        );

        // Undo: onto the sole backup entry
        engine.undo().expect("undo");
        assert!(matches!(
            engine.current_position().expect("position"),
            Position::BackupEntry(_)
        ));
        assert_eq!(engine.undo_count(), 1);

        // Undo again: already at the oldest known artifact
        let before = engine.pointer().get().expect("get");
        engine.undo().expect("undo");
        assert_eq!(engine.pointer().get().expect("get"), before);
        assert_eq!(engine.undo_count(), 1);

        // Commit three: single-undo branch, no archive
        engine.commit(&artifact(3)).expect("commit 3");
        assert_eq!(engine.current_position().expect("position"), Position::Staging);
        let entries = engine.store().entries().expect("entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            std::fs::read(engine.store().path_of(&entries[0])).expect("read"),
            vec![1u8; 8]
        );
    }
}

// =============================================================================
// EXTERNAL FAILURE SURFACES
// =============================================================================

mod failure_surfaces {
    use super::*;

    struct UnreadablePointer;
    impl BackgroundPointer for UnreadablePointer {
        fn get(&self) -> Result<String, ScribbleError> {
            Err(ScribbleError::PointerUnreadable("register gone".to_string()))
        }
        fn set(&mut self, _path: &Path) -> Result<(), ScribbleError> {
            Ok(())
        }
    }

    /// An unreadable register aborts undo/redo with the surfaced error and
    /// leaves the counter untouched.
    #[test]
    fn unreadable_register_surfaces_and_preserves_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ws = Workspace::resolve(dir.path()).expect("resolve");
        let mut engine = HistoryEngine::open(&ws, UnreadablePointer).expect("open");

        let err = engine.undo().expect_err("must surface");
        assert!(matches!(err, ScribbleError::PointerUnreadable(_)));
        assert_eq!(engine.undo_count(), 0);

        let err = engine.redo().expect_err("must surface");
        assert!(matches!(err, ScribbleError::PointerUnreadable(_)));
        assert_eq!(engine.undo_count(), 0);
    }
}
