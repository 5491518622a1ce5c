use serde::{Deserialize, Serialize};

/// Separator between the fields of a chore line.
pub const FIELD_DELIMITER: char = '@';

/// Placeholder used for the cost and date of a chore that was never assigned.
pub const UNASSIGNED_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoreStatus {
    Incomplete,
    Complete,
}

impl ChoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoreStatus::Incomplete => "incomplete",
            ChoreStatus::Complete => "complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "incomplete" => Some(ChoreStatus::Incomplete),
            "complete" => Some(ChoreStatus::Complete),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ChoreStatus::Complete)
    }
}

impl std::fmt::Display for ChoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chore assigned to one child.
///
/// `cost` and `date_assigned` are kept as the text they were entered with;
/// the cost is only turned into a number when the chore is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    pub name: String,
    pub cost: String,
    pub date_assigned: String,
    pub status: ChoreStatus,
}

impl Chore {
    /// A freshly assigned, incomplete chore.
    pub fn new(
        name: impl Into<String>,
        cost: impl Into<String>,
        date_assigned: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost: cost.into(),
            date_assigned: date_assigned.into(),
            status: ChoreStatus::Incomplete,
        }
    }

    /// Stand-in record for a chore name that has never been assigned.
    pub fn unassigned(name: impl Into<String>) -> Self {
        Self::new(name, UNASSIGNED_PLACEHOLDER, UNASSIGNED_PLACEHOLDER)
    }

    pub fn with_status(mut self, status: ChoreStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    /// Render the chore as one record line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{name}{d}{cost}{d}{date}{d}{status}",
            name = self.name,
            cost = self.cost,
            date = self.date_assigned,
            status = self.status,
            d = FIELD_DELIMITER,
        )
    }
}

/// Whether `value` can be stored in a chore line and read back unchanged.
pub fn is_storable_field(value: &str) -> bool {
    !value.contains(FIELD_DELIMITER) && !value.contains(['\n', '\r'])
}
