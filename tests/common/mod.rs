// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use choreledger::application::{LedgerConfig, ParentAccount};
use choreledger::storage::{FileStore, MemoryStore};
use tempfile::TempDir;

pub const HOUSEHOLD: &str = "smith";

/// Helper to create a file store in a temporary directory
pub fn test_file_store() -> Result<(FileStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = FileStore::new(temp_dir.path());
    Ok((store, temp_dir))
}

/// Helper to create an in-memory store that already holds the test household
pub fn test_memory_store() -> Result<MemoryStore> {
    MemoryStore::with_household(HOUSEHOLD)
}

/// Open a fresh account on the test household, the way every caller does
/// for each operation.
pub fn open(store: &MemoryStore) -> Result<ParentAccount<'_>> {
    Ok(ParentAccount::open(store, HOUSEHOLD, LedgerConfig::default())?)
}

/// Open a fresh account with the strict completion policy.
pub fn open_strict(store: &MemoryStore) -> Result<ParentAccount<'_>> {
    Ok(ParentAccount::open(store, HOUSEHOLD, LedgerConfig::strict())?)
}

/// Test fixture: standard household setup
pub struct StandardHousehold;

impl StandardHousehold {
    /// Two children, Ann and Ben, with no chores yet
    pub fn create_children(store: &MemoryStore) -> Result<()> {
        let mut account = open(store)?;
        account.create_child("ann")?;
        account.create_child("ben")?;
        Ok(())
    }

    /// Ann gets dishes ($5.00) and laundry ($2.50); Ben gets the lawn ($10)
    pub fn create_with_chores(store: &MemoryStore) -> Result<()> {
        Self::create_children(store)?;
        let mut account = open(store)?;
        account.assign_chore("ann", "dishes", "$5.00", "01/02/2024")?;
        account.assign_chore("ann", "laundry", "$2.50", "02/02/2024")?;
        account.assign_chore("ben", "lawn", "10", "03/02/2024")?;
        Ok(())
    }
}
