use std::collections::BTreeMap;

use log::{debug, info};

use crate::domain::{Amount, Chore};
use crate::storage::RecordStore;

use super::{ChildLedger, LedgerConfig, LedgerError};

/// A household: every child ledger found in its storage area.
///
/// The set of children is a snapshot taken when the account is opened. Open
/// a fresh account for each operation; an account kept around will not see
/// children or writes made through other accounts.
pub struct ParentAccount<'s> {
    name: String,
    children: BTreeMap<String, ChildLedger<'s>>,
    config: LedgerConfig,
    store: &'s dyn RecordStore,
}

impl<'s> ParentAccount<'s> {
    /// Open an existing household and load every child ledger in it.
    pub fn open(
        store: &'s dyn RecordStore,
        household: &str,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        let mut children = BTreeMap::new();
        for child in store.list_child_records(household)? {
            let ledger = ChildLedger::open(store, household, &child, config.completion)?;
            children.insert(child, ledger);
        }

        debug!(
            "event=household_open module=parent status=ok household={} children={}",
            household,
            children.len()
        );

        Ok(Self {
            name: household.to_string(),
            children,
            config,
            store,
        })
    }

    /// Create the household's storage area if needed, then open it.
    pub fn create(
        store: &'s dyn RecordStore,
        household: &str,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        store.create_household(household)?;
        info!(
            "event=household_create module=parent status=ok household={}",
            household
        );
        Self::open(store, household, config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    pub fn child(&self, name: &str) -> Option<&ChildLedger<'s>> {
        self.children.get(name)
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn child_mut(&mut self, name: &str) -> Result<&mut ChildLedger<'s>, LedgerError> {
        self.children
            .get_mut(name)
            .ok_or_else(|| LedgerError::UnknownChild(name.to_string()))
    }

    /// Record a payment of `amount` to `child`.
    pub fn pay(&mut self, amount: Amount, child: &str) -> Result<(), LedgerError> {
        self.child_mut(child)?.record_payment(amount)
    }

    pub fn assign_chore(
        &mut self,
        child: &str,
        chore: &str,
        cost: &str,
        date_assigned: &str,
    ) -> Result<(), LedgerError> {
        self.child_mut(child)?
            .assign_chore(chore, cost, date_assigned)
    }

    pub fn complete_chore(&mut self, child: &str, chore: &str) -> Result<(), LedgerError> {
        self.child_mut(child)?.complete_chore(chore)
    }

    /// Open (or re-read) the ledger for `name` and add it to the household,
    /// replacing any ledger already loaded under that name.
    pub fn create_child(&mut self, name: &str) -> Result<&ChildLedger<'s>, LedgerError> {
        let ledger = ChildLedger::open(self.store, &self.name, name, self.config.completion)?;
        self.children.insert(name.to_string(), ledger);
        self.child(name)
            .ok_or_else(|| LedgerError::UnknownChild(name.to_string()))
    }

    /// Amount owed to each child.
    pub fn all_balances(&self) -> BTreeMap<String, Amount> {
        self.children
            .iter()
            .map(|(name, ledger)| (name.clone(), ledger.owed()))
            .collect()
    }

    /// Each child's chores, incomplete ones first.
    pub fn all_chores(&self) -> BTreeMap<String, Vec<Chore>> {
        self.children
            .iter()
            .map(|(name, ledger)| (name.clone(), ledger.list_chores()))
            .collect()
    }
}
