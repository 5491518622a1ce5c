use anyhow::{Result, bail};

/// Storage collaborator for ledger records.
///
/// A store holds one text record per child, grouped by household. The ledger
/// types never touch the filesystem directly; they go through this trait so
/// they can run against a directory tree or an in-memory map alike.
pub trait RecordStore {
    /// Names of every child record in the household.
    fn list_child_records(&self, household: &str) -> Result<Vec<String>>;

    /// The child's record, or `None` when it has never been written.
    fn read_record(&self, household: &str, child: &str) -> Result<Option<String>>;

    /// Replace the child's record with `contents`.
    fn write_record(&self, household: &str, child: &str, contents: &str) -> Result<()>;

    /// Make sure the household exists so records can be listed and written.
    fn create_household(&self, household: &str) -> Result<()>;
}

/// Reject keys that cannot safely name a household or a child record.
pub fn validate_key(kind: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        bail!("{} name cannot be empty", kind);
    }
    if key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
        bail!("Invalid {} name: {:?}", kind, key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_plain_names() {
        assert!(validate_key("child", "ann").is_ok());
        assert!(validate_key("child", "Mary Jane").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(validate_key("child", "").is_err());
        assert!(validate_key("child", "  ").is_err());
        assert!(validate_key("child", "..").is_err());
        assert!(validate_key("household", "a/b").is_err());
        assert!(validate_key("household", "a\\b").is_err());
    }
}
