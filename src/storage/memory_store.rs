use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};

use super::{RecordStore, validate_key};

/// In-memory record store, used by tests and by embedders that do their own
/// persistence. Households must be created before records can be listed or
/// written, matching [`super::FileStore`].
#[derive(Default)]
pub struct MemoryStore {
    households: Mutex<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains `household`.
    pub fn with_household(household: &str) -> Result<Self> {
        let store = Self::new();
        store.create_household(household)?;
        Ok(store)
    }

    /// Raw text of a record, bypassing the ledger types.
    pub fn raw(&self, household: &str, child: &str) -> Option<String> {
        self.households
            .lock()
            .ok()?
            .get(household)?
            .get(child)
            .cloned()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, BTreeMap<String, String>>>> {
        self.households
            .lock()
            .map_err(|_| anyhow!("Memory store lock poisoned"))
    }
}

impl RecordStore for MemoryStore {
    fn list_child_records(&self, household: &str) -> Result<Vec<String>> {
        let households = self.lock()?;
        match households.get(household) {
            Some(records) => Ok(records.keys().cloned().collect()),
            None => bail!("Household not found: {}", household),
        }
    }

    fn read_record(&self, household: &str, child: &str) -> Result<Option<String>> {
        let households = self.lock()?;
        Ok(households
            .get(household)
            .and_then(|records| records.get(child))
            .cloned())
    }

    fn write_record(&self, household: &str, child: &str, contents: &str) -> Result<()> {
        validate_key("child", child)?;
        let mut households = self.lock()?;
        let records = households
            .get_mut(household)
            .ok_or_else(|| anyhow!("Household not found: {}", household))?;
        records.insert(child.to_string(), contents.to_string());
        Ok(())
    }

    fn create_household(&self, household: &str) -> Result<()> {
        validate_key("household", household)?;
        self.lock()?.entry(household.to_string()).or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_household_cannot_be_listed() {
        let store = MemoryStore::new();
        assert!(store.list_child_records("smith").is_err());
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let store = MemoryStore::with_household("smith")?;
        assert_eq!(store.read_record("smith", "ann")?, None);

        store.write_record("smith", "ann", "0\n")?;
        assert_eq!(store.read_record("smith", "ann")?.as_deref(), Some("0\n"));
        assert_eq!(store.list_child_records("smith")?, vec!["ann".to_string()]);
        Ok(())
    }

    #[test]
    fn test_write_requires_household() {
        let store = MemoryStore::new();
        assert!(store.write_record("smith", "ann", "0\n").is_err());
    }

    #[test]
    fn test_create_household_is_idempotent() -> Result<()> {
        let store = MemoryStore::with_household("smith")?;
        store.write_record("smith", "ann", "0\n")?;
        store.create_household("smith")?;
        assert_eq!(store.list_child_records("smith")?.len(), 1);
        Ok(())
    }
}
