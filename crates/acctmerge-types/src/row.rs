//! Input and output record shapes plus their fixed headers.

use serde::{Deserialize, Serialize};

use crate::account::Account;

/// Header every input stream must start with, in this exact order.
pub const INPUT_HEADER: [&str; 4] = ["Account ID", "Account Name", "First Name", "Created On"];

/// Header written at the top of every output stream.
pub const OUTPUT_HEADER: [&str; 5] = [
    "Account ID",
    "First Name",
    "Created On",
    "Status",
    "Status Set On",
];

/// One data record read from the input stream.
///
/// Fields are decoded positionally, matching [`INPUT_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRow {
    pub account_id: String,
    pub account_name: String,
    pub first_name: String,
    pub created_on: String,
}

/// One record written to the output stream, positionally matching [`OUTPUT_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub account_id: String,
    pub first_name: String,
    pub created_on: String,
    pub status: String,
    pub status_set_on: String,
}

impl OutputRow {
    /// Output row for `input` with blank status fields.
    #[must_use]
    pub fn unenriched(input: &InputRow) -> Self {
        Self {
            account_id: input.account_id.clone(),
            first_name: input.first_name.clone(),
            created_on: input.created_on.clone(),
            status: String::new(),
            status_set_on: String::new(),
        }
    }

    /// Fill the status fields from a looked-up account.
    pub fn enrich(&mut self, account: &Account) {
        self.status.clone_from(&account.status);
        self.status_set_on.clone_from(&account.created_on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> InputRow {
        InputRow {
            account_id: "1".into(),
            account_name: "jdoe".into(),
            first_name: "Jane".into(),
            created_on: "2020-01-01".into(),
        }
    }

    #[test]
    fn unenriched_copies_identity_and_blanks_status() {
        let out = OutputRow::unenriched(&jane());
        assert_eq!(out.account_id, "1");
        assert_eq!(out.first_name, "Jane");
        assert_eq!(out.created_on, "2020-01-01");
        assert!(out.status.is_empty());
        assert!(out.status_set_on.is_empty());
    }

    #[test]
    fn enrich_uses_account_created_on_as_status_set_on() {
        let mut out = OutputRow::unenriched(&jane());
        out.enrich(&Account {
            account_id: 1,
            status: "good".into(),
            created_on: "2019-12-12".into(),
        });
        assert_eq!(out.status, "good");
        assert_eq!(out.status_set_on, "2019-12-12");
        // The row's own created_on is never overwritten.
        assert_eq!(out.created_on, "2020-01-01");
    }

    #[test]
    fn headers_have_expected_widths() {
        assert_eq!(INPUT_HEADER.len(), 4);
        assert_eq!(OUTPUT_HEADER.len(), 5);
        assert_eq!(OUTPUT_HEADER[0], INPUT_HEADER[0]);
    }
}
