use serde::{Deserialize, Serialize};

/// How `complete_chore` treats chores that are missing or already done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Completing an unknown chore falls back to an "N/A" cost and fails to
    /// parse it; completing a finished chore pays it out again.
    #[default]
    Lenient,
    /// Unknown chores fail with `ChoreNotFound`, finished chores with
    /// `ChoreAlreadyComplete`. Nothing is changed in either case.
    Strict,
}

impl CompletionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionPolicy::Lenient => "lenient",
            CompletionPolicy::Strict => "strict",
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, CompletionPolicy::Strict)
    }
}

/// Settings shared by every ledger a [`super::ParentAccount`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub completion: CompletionPolicy,
}

impl LedgerConfig {
    pub fn strict() -> Self {
        Self {
            completion: CompletionPolicy::Strict,
        }
    }

    pub fn with_completion(mut self, completion: CompletionPolicy) -> Self {
        self.completion = completion;
        self
    }
}
