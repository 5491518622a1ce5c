use std::fmt;

use super::{Amount, Chore, ChoreStatus, FIELD_DELIMITER, encode_amount, parse_balance};

/// The persisted state of one child: balance first, then one line per chore.
///
/// ```text
/// 12.5
/// dishes@$2.00@01/02/2024@complete
/// laundry@$3.50@03/02/2024@incomplete
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerRecord {
    pub owed: Amount,
    pub chores: Vec<Chore>,
}

impl LedgerRecord {
    /// An empty record: nothing owed, no chores.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chore(&self, name: &str) -> Option<&Chore> {
        self.chores.iter().find(|c| c.name == name)
    }

    pub fn chore_mut(&mut self, name: &str) -> Option<&mut Chore> {
        self.chores.iter_mut().find(|c| c.name == name)
    }

    /// Insert a chore, replacing any chore with the same name in place.
    pub fn upsert_chore(&mut self, chore: Chore) {
        match self.chore_mut(&chore.name) {
            Some(existing) => *existing = chore,
            None => self.chores.push(chore),
        }
    }

    /// Serialize the record to its text form. Always ends with a newline.
    pub fn encode(&self) -> String {
        let mut out = encode_amount(self.owed);
        out.push('\n');
        for chore in &self.chores {
            out.push_str(&chore.to_line());
            out.push('\n');
        }
        out
    }

    /// Parse a record from its text form.
    pub fn decode(text: &str) -> Result<Self, ParseError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, balance_line) = lines.next().ok_or(ParseError::EmptyRecord)?;
        let mut record = LedgerRecord {
            owed: parse_balance(balance_line)?,
            chores: Vec::new(),
        };

        for (line_no, line) in lines {
            record.upsert_chore(decode_chore_line(line_no, line)?);
        }

        Ok(record)
    }
}

fn decode_chore_line(line_no: usize, line: &str) -> Result<Chore, ParseError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let [name, cost, date_assigned, status] = fields.as_slice() else {
        return Err(ParseError::MalformedChoreLine {
            line: line_no,
            fields: fields.len(),
        });
    };

    let status = ChoreStatus::from_str(status).ok_or_else(|| ParseError::InvalidStatus {
        line: line_no,
        value: status.to_string(),
    })?;

    Ok(Chore::new(*name, *cost, *date_assigned).with_status(status))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyRecord,
    InvalidAmount { value: String },
    MalformedChoreLine { line: usize, fields: usize },
    InvalidStatus { line: usize, value: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyRecord => write!(f, "record is empty (missing balance line)"),
            ParseError::InvalidAmount { value } => write!(f, "invalid amount '{}'", value),
            ParseError::MalformedChoreLine { line, fields } => write!(
                f,
                "line {}: expected 4 '{}'-separated fields, found {}",
                line, FIELD_DELIMITER, fields
            ),
            ParseError::InvalidStatus { line, value } => {
                write!(f, "line {}: unknown chore status '{}'", line, value)
            }
        }
    }
}

impl std::error::Error for ParseError {}
