//! ---
//! ems_section: "03-persistence-logging"
//! ems_subsection: "integration-tests"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Counter and run folder behaviour across repeated runs."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use std::fs;

use bms_persistence::{
    Clock, CounterStore, FileCounterStore, FixedClock, OutputLocationBuilder, PersistenceError,
    RunIdentity,
};
use chrono::NaiveDate;
use tempfile::tempdir;

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2025, 11, 2)
            .unwrap()
            .and_hms_opt(16, 7, 0)
            .unwrap(),
    )
}

#[test]
fn sequential_runs_get_sequential_folders() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let counter_path = dir.path().join("output_counter.txt");
    let builder = OutputLocationBuilder::new(dir.path());
    let clock = clock();

    let mut names = Vec::new();
    for _ in 0..2 {
        let mut store = FileCounterStore::new(&counter_path);
        let run = store.next()?;
        let location = builder.create(RunIdentity::new(run, clock.now()))?;
        names.push(location.dir.file_name().unwrap().to_string_lossy().into_owned());
    }

    assert_eq!(
        names,
        vec![
            "Output-001__2025-11-02__04-07PM".to_string(),
            "Output-002__2025-11-02__04-07PM".to_string(),
        ]
    );
    Ok(())
}

#[test]
fn corrupt_counter_creates_nothing() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let counter_path = dir.path().join("output_counter.txt");
    fs::write(&counter_path, "abc")?;

    let result = FileCounterStore::new(&counter_path).next();
    assert!(matches!(result, Err(PersistenceError::CounterCorrupt { .. })));

    let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    Ok(())
}
