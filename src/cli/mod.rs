use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{CompletionPolicy, LedgerConfig, ParentAccount};
use crate::domain::{Chore, format_amount};
use crate::io::Exporter;
use crate::storage::FileStore;

/// Date format used for assigned chores, e.g. "19/10/2026".
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Choreledger - household allowance ledger
#[derive(Parser)]
#[command(name = "choreledger")]
#[command(about = "Track chores, accrued allowance and payments for a household")]
#[command(version)]
pub struct Cli {
    /// Directory holding one sub-directory per household
    #[arg(long, default_value = "users", global = true)]
    pub data_dir: String,

    /// Refuse to complete unknown or already completed chores
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a household
    Init {
        /// Household name
        household: String,
    },

    /// Add a child to a household
    AddChild {
        /// Household name
        household: String,

        /// Child name (must be unique within the household)
        child: String,
    },

    /// Record a payment to a child, reducing what they are owed
    Pay {
        /// Household name
        household: String,

        /// Child name
        child: String,

        /// Amount paid (e.g., "5" or "2.50"; negative to add to the balance)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Assign a chore to a child
    Assign {
        /// Household name
        household: String,

        /// Child name
        child: String,

        /// Chore name (re-using a name replaces that chore)
        chore: String,

        /// What the chore pays (e.g., "$2.00")
        cost: String,

        /// Date assigned (DD/MM/YYYY, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Mark a chore as complete and add its cost to the balance
    Complete {
        /// Household name
        household: String,

        /// Child name
        child: String,

        /// Chore name
        chore: String,
    },

    /// Show what each child is owed
    Balances {
        /// Household name
        household: String,
    },

    /// List chores, incomplete first
    Chores {
        /// Household name
        household: String,

        /// Only show this child
        child: Option<String>,
    },

    /// Export a household to CSV or JSON
    Export {
        /// Household name
        household: String,

        /// What to export: balances, chores, json
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> LedgerConfig {
        let completion = if self.strict {
            CompletionPolicy::Strict
        } else {
            CompletionPolicy::Lenient
        };
        LedgerConfig::default().with_completion(completion)
    }

    pub fn run(self) -> Result<()> {
        let store = FileStore::new(&self.data_dir);
        let config = self.config();

        match self.command {
            Commands::Init { household } => {
                let household = normalize_household(&household);
                ParentAccount::create(&store, &household, config)?;
                println!("Created household: {}", household);
            }

            Commands::AddChild { household, child } => {
                let mut account = open_account(&store, &household, config)?;
                account.create_child(&child)?;
                println!("Created new child: {}", child);
            }

            Commands::Pay {
                household,
                child,
                amount,
            } => {
                let value: f64 = amount
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid amount '{}'. Use '5' or '2.50'", amount))?;
                let mut account = open_account(&store, &household, config)?;
                account.pay(value, &child)?;
                println!("Paid ${} to {}", amount, child);
            }

            Commands::Assign {
                household,
                child,
                chore,
                cost,
                date,
            } => {
                let date = match date {
                    Some(date_str) => parse_date(&date_str)?,
                    None => Local::now().format(DATE_FORMAT).to_string(),
                };
                let mut account = open_account(&store, &household, config)?;
                account.assign_chore(&child, &chore, &cost, &date)?;
                println!("Assigned {} chore: {} for {}", child, chore, cost);
            }

            Commands::Complete {
                household,
                child,
                chore,
            } => {
                let mut account = open_account(&store, &household, config)?;
                account.complete_chore(&child, &chore)?;
                println!("{} completed chore {}", child, chore);
            }

            Commands::Balances { household } => {
                let account = open_account(&store, &household, config)?;
                run_balances_command(&account);
            }

            Commands::Chores { household, child } => {
                let account = open_account(&store, &household, config)?;
                run_chores_command(&account, child.as_deref())?;
            }

            Commands::Export {
                household,
                export_type,
                output,
            } => {
                let account = open_account(&store, &household, config)?;
                run_export_command(&account, &export_type, output.as_deref())?;
            }
        }

        Ok(())
    }
}

/// Household names are case-insensitive.
fn normalize_household(household: &str) -> String {
    household.trim().to_lowercase()
}

fn open_account<'s>(
    store: &'s FileStore,
    household: &str,
    config: LedgerConfig,
) -> Result<ParentAccount<'s>> {
    let household = normalize_household(household);
    ParentAccount::open(store, &household, config)
        .with_context(|| format!("Could not open household '{}'", household))
}

fn run_balances_command(account: &ParentAccount) {
    let balances = account.all_balances();
    if balances.is_empty() {
        println!("No children in household {}.", account.name());
        return;
    }

    println!("{:<20} {:>12}", "CHILD", "OWED");
    println!("{}", "-".repeat(33));
    for (child, owed) in balances {
        println!("{:<20} {:>12}", truncate(&child, 20), format_amount(owed));
    }
}

fn run_chores_command(account: &ParentAccount, child: Option<&str>) -> Result<()> {
    let all_chores = account.all_chores();

    let selected: Vec<(&String, &Vec<Chore>)> = match child {
        Some(name) => match all_chores.get_key_value(name) {
            Some(entry) => vec![entry],
            None => bail!("Child not found: {}", name),
        },
        None => all_chores.iter().collect(),
    };

    if selected.iter().all(|(_, chores)| chores.is_empty()) {
        println!("No chores found.");
        return Ok(());
    }

    println!(
        "{:<15} {:<25} {:>10} {:<12} {:<10}",
        "CHILD", "CHORE", "COST", "ASSIGNED", "STATUS"
    );
    println!("{}", "-".repeat(76));
    for (name, chores) in selected {
        for chore in chores {
            println!(
                "{:<15} {:<25} {:>10} {:<12} {:<10}",
                truncate(name, 15),
                truncate(&chore.name, 25),
                chore.cost,
                chore.date_assigned,
                chore.status
            );
        }
    }
    Ok(())
}

fn run_export_command(
    account: &ParentAccount,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create file {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let exporter = Exporter::new(account);
    let count = match export_type {
        "balances" => exporter.export_balances_csv(writer)?,
        "chores" => exporter.export_chores_csv(writer)?,
        "json" => exporter.export_json(writer)?,
        other => bail!(
            "Unknown export type '{}'. Valid types: balances, chores, json",
            other
        ),
    };

    if let Some(path) = output {
        eprintln!("Exported {} {} to {}", count, export_type, path);
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Validate a DD/MM/YYYY date and return it in canonical form.
fn parse_date(date_str: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(date_str.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date format '{}'. Use DD/MM/YYYY", date_str))?;
    Ok(date.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("01/02/2024").unwrap(), "01/02/2024");
        assert!(parse_date("2024-02-01").is_err());
        assert!(parse_date("31/02/2024").is_err());
    }

    #[test]
    fn test_normalize_household() {
        assert_eq!(normalize_household(" Smith "), "smith");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("dishes", 10), "dishes");
        assert_eq!(truncate("vacuum the whole house", 10), "vacuum ...");
    }

    #[test]
    fn test_cli_parses_assign() {
        let cli = Cli::try_parse_from([
            "choreledger",
            "--strict",
            "assign",
            "smith",
            "ann",
            "dishes",
            "$2.00",
            "--date",
            "01/02/2024",
        ])
        .unwrap();

        assert!(cli.config().completion.is_strict());
        match cli.command {
            Commands::Assign {
                household,
                child,
                chore,
                cost,
                date,
            } => {
                assert_eq!(household, "smith");
                assert_eq!(child, "ann");
                assert_eq!(chore, "dishes");
                assert_eq!(cost, "$2.00");
                assert_eq!(date.as_deref(), Some("01/02/2024"));
            }
            _ => panic!("expected assign command"),
        }
    }
}
