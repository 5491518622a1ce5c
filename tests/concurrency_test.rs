mod common;

use std::thread;

use anyhow::Result;
use choreledger::application::HouseholdLocks;
use common::{StandardHousehold, open, test_memory_store};

const WRITERS: usize = 8;
const PAYMENTS_PER_WRITER: usize = 25;

#[test]
fn test_household_lock_serializes_writers() -> Result<()> {
    let store = test_memory_store()?;
    StandardHousehold::create_children(&store)?;
    let locks = HouseholdLocks::new();

    thread::scope(|scope| {
        for _ in 0..WRITERS {
            scope.spawn(|| {
                for _ in 0..PAYMENTS_PER_WRITER {
                    // One fresh account per operation, inside the household lock
                    locks
                        .with_household(common::HOUSEHOLD, || -> Result<()> {
                            let mut account = open(&store)?;
                            account.pay(-1.0, "ann")?;
                            Ok(())
                        })
                        .unwrap();
                }
            });
        }
    });

    let expected = (WRITERS * PAYMENTS_PER_WRITER) as f64;
    assert_eq!(open(&store)?.all_balances()["ann"], expected);
    assert_eq!(locks.len(), 1);
    Ok(())
}

#[test]
fn test_households_do_not_block_each_other() -> Result<()> {
    let locks = HouseholdLocks::new();

    // Holding one household's lock must not stop work on another
    let inner = locks.with_household("smith", || locks.with_household("jones", || 7));
    assert_eq!(inner, 7);
    assert_eq!(locks.len(), 2);
    Ok(())
}
