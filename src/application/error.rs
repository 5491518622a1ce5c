use thiserror::Error;

use crate::domain::ParseError;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to parse record for {child}: {source}")]
    Parse {
        child: String,
        #[source]
        source: ParseError,
    },

    #[error("Child not found: {0}")]
    UnknownChild(String),

    #[error("Chore '{chore}' is not assigned to {child}")]
    ChoreNotFound { child: String, chore: String },

    #[error("Chore '{chore}' is already complete for {child}")]
    ChoreAlreadyComplete { child: String, chore: String },

    #[error("Invalid {field}: {value:?} cannot contain '@' or line breaks")]
    InvalidField { field: &'static str, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn parse(child: &str, source: ParseError) -> Self {
        LedgerError::Parse {
            child: child.to_string(),
            source,
        }
    }

    /// True for any failure to turn stored text into numbers or chores.
    pub fn is_parse(&self) -> bool {
        matches!(self, LedgerError::Parse { .. })
    }
}
