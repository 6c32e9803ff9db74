//! A single edit in a record's revision history

use serde::{Deserialize, Serialize};

/// One revision of a knowledge base record, newest first as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    pub revid: u64,
    pub user: String,
    pub comment: String,
    pub timestamp: String,
}

impl RevisionEntry {
    pub fn new(
        revid: u64,
        user: impl Into<String>,
        comment: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            revid,
            user: user.into(),
            comment: comment.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Human-readable history line, e.g.
    /// `2020-08-31T23:13:00Z (oldid: 2600): 'Emmanuel Goldstein' edited: 'edit comment #1'`
    pub fn history_line(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for RevisionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (oldid: {}): '{}' edited: '{}'",
            self.timestamp, self.revid, self.user, self.comment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_line() {
        let entry = RevisionEntry::new(
            2600,
            "Emmanuel Goldstein",
            "edit comment #1",
            "2020-08-31T23:13:00Z",
        );
        assert_eq!(
            entry.history_line(),
            "2020-08-31T23:13:00Z (oldid: 2600): 'Emmanuel Goldstein' edited: 'edit comment #1'"
        );
    }

    #[test]
    fn test_empty_comment() {
        let entry = RevisionEntry::new(1, "bot", "", "2021-01-01T00:00:00Z");
        assert!(entry.history_line().ends_with("edited: ''"));
    }
}
