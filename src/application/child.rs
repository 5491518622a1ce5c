use log::{debug, info};

use crate::domain::{Amount, Chore, ChoreStatus, LedgerRecord, is_storable_field, parse_cost};
use crate::storage::RecordStore;

use super::{CompletionPolicy, LedgerError};

/// One child's balance and chores, bound to the record that stores them.
///
/// Every mutating call writes the whole record back before returning.
pub struct ChildLedger<'s> {
    name: String,
    household: String,
    record: LedgerRecord,
    policy: CompletionPolicy,
    store: &'s dyn RecordStore,
}

impl<'s> ChildLedger<'s> {
    /// Load the child's ledger, creating and persisting an empty one if the
    /// child has no record yet.
    pub fn open(
        store: &'s dyn RecordStore,
        household: &str,
        name: &str,
        policy: CompletionPolicy,
    ) -> Result<Self, LedgerError> {
        let existing = store.read_record(household, name)?;

        let mut ledger = Self {
            name: name.to_string(),
            household: household.to_string(),
            record: LedgerRecord::new(),
            policy,
            store,
        };

        match existing {
            Some(text) => {
                ledger.record =
                    LedgerRecord::decode(&text).map_err(|e| LedgerError::parse(name, e))?;
                debug!(
                    "event=ledger_open module=child status=ok household={} child={} chores={}",
                    household,
                    name,
                    ledger.record.chores.len()
                );
            }
            None => {
                ledger.persist()?;
                info!(
                    "event=ledger_create module=child status=ok household={} child={}",
                    household, name
                );
            }
        }

        Ok(ledger)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn household(&self) -> &str {
        &self.household
    }

    /// Net amount currently owed to the child.
    pub fn owed(&self) -> Amount {
        self.record.owed
    }

    /// Chores in stored order.
    pub fn chores(&self) -> &[Chore] {
        &self.record.chores
    }

    pub fn chore(&self, name: &str) -> Option<&Chore> {
        self.record.chore(name)
    }

    pub fn record(&self) -> &LedgerRecord {
        &self.record
    }

    /// Reduce the balance by `amount`. Negative amounts raise it; the balance
    /// may go below zero.
    pub fn record_payment(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.record.owed -= amount;
        info!(
            "event=payment module=child status=ok household={} child={} amount={} owed={}",
            self.household, self.name, amount, self.record.owed
        );
        self.persist()
    }

    /// Assign a chore, replacing any chore with the same name.
    pub fn assign_chore(
        &mut self,
        name: &str,
        cost: &str,
        date_assigned: &str,
    ) -> Result<(), LedgerError> {
        for (field, value) in [("chore name", name), ("cost", cost), ("date", date_assigned)] {
            if !is_storable_field(value) {
                return Err(LedgerError::InvalidField {
                    field,
                    value: value.to_string(),
                });
            }
        }

        self.record
            .upsert_chore(Chore::new(name, cost, date_assigned));
        info!(
            "event=chore_assign module=child status=ok household={} child={} chore={} cost={}",
            self.household, self.name, name, cost
        );
        self.persist()
    }

    /// Mark a chore complete and add its cost to the balance.
    ///
    /// Under [`CompletionPolicy::Lenient`] a chore that was never assigned is
    /// read with an "N/A" cost, which fails to parse, and a chore that is
    /// already complete is paid out again.
    pub fn complete_chore(&mut self, name: &str) -> Result<(), LedgerError> {
        let chore = match (self.record.chore(name), self.policy) {
            (Some(chore), CompletionPolicy::Strict) if chore.is_complete() => {
                return Err(LedgerError::ChoreAlreadyComplete {
                    child: self.name.clone(),
                    chore: name.to_string(),
                });
            }
            (Some(chore), _) => chore.clone(),
            (None, CompletionPolicy::Strict) => {
                return Err(LedgerError::ChoreNotFound {
                    child: self.name.clone(),
                    chore: name.to_string(),
                });
            }
            (None, CompletionPolicy::Lenient) => Chore::unassigned(name),
        };

        let amount = parse_cost(&chore.cost).map_err(|e| LedgerError::parse(&self.name, e))?;

        self.record
            .upsert_chore(chore.with_status(ChoreStatus::Complete));
        self.record.owed += amount;
        info!(
            "event=chore_complete module=child status=ok household={} child={} chore={} amount={} owed={}",
            self.household, self.name, name, amount, self.record.owed
        );
        self.persist()
    }

    /// All chores, incomplete ones first. Within each group chores keep the
    /// order they were assigned in.
    pub fn list_chores(&self) -> Vec<Chore> {
        let mut chores = self.record.chores.clone();
        chores.sort_by_key(|c| c.is_complete());
        chores
    }

    /// Overwrite the stored record with the current state.
    pub fn persist(&self) -> Result<(), LedgerError> {
        self.store
            .write_record(&self.household, &self.name, &self.record.encode())?;
        debug!(
            "event=ledger_persist module=child status=ok household={} child={}",
            self.household, self.name
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::with_household("smith").unwrap()
    }

    fn open<'s>(store: &'s MemoryStore, name: &str) -> ChildLedger<'s> {
        ChildLedger::open(store, "smith", name, CompletionPolicy::Lenient).unwrap()
    }

    #[test]
    fn test_new_child_is_bootstrapped() {
        let store = store();
        let ledger = open(&store, "ann");

        assert_eq!(ledger.owed(), 0.0);
        assert!(ledger.chores().is_empty());
        assert_eq!(store.raw("smith", "ann").as_deref(), Some("0\n"));
    }

    #[test]
    fn test_payment_can_go_negative() {
        let store = store();
        let mut ledger = open(&store, "ann");

        ledger.record_payment(3.0).unwrap();
        assert_eq!(ledger.owed(), -3.0);

        ledger.record_payment(-5.5).unwrap();
        assert_eq!(ledger.owed(), 2.5);
        assert_eq!(store.raw("smith", "ann").as_deref(), Some("2.5\n"));
    }

    #[test]
    fn test_assign_overwrites_same_name() {
        let store = store();
        let mut ledger = open(&store, "ann");

        ledger.assign_chore("dishes", "$2.00", "01/02/2024").unwrap();
        ledger.complete_chore("dishes").unwrap();
        ledger.assign_chore("dishes", "$3.00", "02/02/2024").unwrap();

        assert_eq!(ledger.chores().len(), 1);
        let chore = ledger.chore("dishes").unwrap();
        assert_eq!(chore.cost, "$3.00");
        assert_eq!(chore.date_assigned, "02/02/2024");
        assert_eq!(chore.status, ChoreStatus::Incomplete);
    }

    #[test]
    fn test_assign_rejects_delimiter() {
        let store = store();
        let mut ledger = open(&store, "ann");

        let result = ledger.assign_chore("a@b", "1", "01/02/2024");
        assert!(matches!(
            result,
            Err(LedgerError::InvalidField {
                field: "chore name",
                ..
            })
        ));
        assert!(ledger.chores().is_empty());
    }

    #[test]
    fn test_complete_accrues_cost() {
        let store = store();
        let mut ledger = open(&store, "ann");

        ledger.assign_chore("dishes", "$5.00", "01/02/2024").unwrap();
        ledger.complete_chore("dishes").unwrap();

        assert_eq!(ledger.owed(), 5.0);
        assert_eq!(ledger.chore("dishes").unwrap().status, ChoreStatus::Complete);
    }

    #[test]
    fn test_unknown_chore_fails_to_parse_placeholder() {
        let store = store();
        let mut ledger = open(&store, "ann");

        let err = ledger.complete_chore("ghost").unwrap_err();
        assert!(err.is_parse());
        assert!(ledger.chores().is_empty());
        assert_eq!(ledger.owed(), 0.0);
    }

    #[test]
    fn test_list_chores_groups_incomplete_first() {
        let store = store();
        let mut ledger = open(&store, "ann");

        for name in ["A", "B", "C", "D"] {
            ledger.assign_chore(name, "1", "01/02/2024").unwrap();
        }
        ledger.complete_chore("A").unwrap();
        ledger.complete_chore("C").unwrap();

        let names: Vec<String> = ledger.list_chores().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }
}
