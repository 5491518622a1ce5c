use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::ParentAccount;
use crate::domain::{Amount, Chore};

/// Household snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdSnapshot {
    pub version: String,
    pub household: String,
    pub exported_at: DateTime<Utc>,
    pub children: Vec<ChildSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildSnapshot {
    pub name: String,
    pub owed: Amount,
    pub chores: Vec<Chore>,
}

/// Exporter for writing a household's ledgers to CSV or JSON
pub struct Exporter<'a, 's> {
    account: &'a ParentAccount<'s>,
}

impl<'a, 's> Exporter<'a, 's> {
    pub fn new(account: &'a ParentAccount<'s>) -> Self {
        Self { account }
    }

    /// Export balances to CSV format
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["child", "owed"])?;

        let mut count = 0;
        for (child, owed) in self.account.all_balances() {
            csv_writer.write_record([child, owed.to_string()])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export every child's chores to CSV format, incomplete chores first
    pub fn export_chores_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["child", "chore", "cost", "date_assigned", "status"])?;

        let mut count = 0;
        for (child, chores) in self.account.all_chores() {
            for chore in chores {
                csv_writer.write_record([
                    child.as_str(),
                    chore.name.as_str(),
                    chore.cost.as_str(),
                    chore.date_assigned.as_str(),
                    chore.status.as_str(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Build a snapshot of the whole household
    pub fn snapshot(&self) -> HouseholdSnapshot {
        let balances = self.account.all_balances();
        let children = self
            .account
            .all_chores()
            .into_iter()
            .map(|(name, chores)| ChildSnapshot {
                owed: balances.get(&name).copied().unwrap_or_default(),
                name,
                chores,
            })
            .collect();

        HouseholdSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            household: self.account.name().to_string(),
            exported_at: Utc::now(),
            children,
        }
    }

    /// Export the household snapshot as pretty-printed JSON
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = self.snapshot();
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        Ok(snapshot.children.len())
    }
}
