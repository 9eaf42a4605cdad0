//! Account-status reconciliation
//!
//! Matches rows of the externally maintained account-status spreadsheet
//! against church records. The identifier cell holds one or more
//! semicolon-delimited tokens; a token matches every church whose decimal
//! parish id *contains* it as a substring. That substring test mirrors the
//! long-standing behavior of the upstream workflow (token "12" also hits
//! parish 1234) and is kept on purpose.

use crate::model::{AccountStatusRow, Church};

/// Apply account-status rows to the church collection.
///
/// Rows with a blank identifier cell are skipped; tokens are trimmed and
/// empty tokens ignored. Every match overwrites the church's status with
/// the row's status. Zero matches for a token is normal. Returns the
/// number of status assignments made.
pub fn apply_account_status(churches: &mut [Church], rows: &[AccountStatusRow]) -> usize {
    let mut assigned = 0;

    for row in rows {
        let Some(cell) = row.identifiers.as_deref() else {
            continue;
        };
        if cell.trim().is_empty() {
            continue;
        }

        for token in cell.split(';') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            for church in churches.iter_mut() {
                if church.parish_id.to_string().contains(token) {
                    church.account_status = row.status.clone();
                    assigned += 1;
                }
            }
        }
    }

    tracing::debug!(rows = rows.len(), assigned, "Applied account-status rows");
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn church(church_id: u32, parish_id: u32) -> Church {
        Church {
            church_id,
            parish_id,
            ..Default::default()
        }
    }

    fn status_row(identifiers: Option<&str>, status: &str) -> AccountStatusRow {
        AccountStatusRow {
            identifiers: identifiers.map(str::to_string),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_exact_identifier_match() {
        let mut churches = vec![church(1, 7000), church(2, 7001)];
        let rows = vec![status_row(Some("7001"), "Active")];

        let assigned = apply_account_status(&mut churches, &rows);

        assert_eq!(assigned, 1);
        assert_eq!(churches[0].account_status, "");
        assert_eq!(churches[1].account_status, "Active");
    }

    #[test]
    fn test_substring_token_matches_longer_parish_id() {
        // Deliberate behavior: "12" is contained in "123"
        let mut churches = vec![church(1, 123)];
        let rows = vec![status_row(Some("12"), "Active")];

        assert_eq!(apply_account_status(&mut churches, &rows), 1);
        assert_eq!(churches[0].account_status, "Active");
    }

    #[test]
    fn test_multiple_tokens_in_one_cell() {
        let mut churches = vec![church(1, 7000), church(2, 7001), church(3, 8000)];
        let rows = vec![status_row(Some("7000; 8000"), "Expired")];

        assert_eq!(apply_account_status(&mut churches, &rows), 2);
        assert_eq!(churches[0].account_status, "Expired");
        assert_eq!(churches[1].account_status, "");
        assert_eq!(churches[2].account_status, "Expired");
    }

    #[test]
    fn test_blank_identifier_cell_is_skipped() {
        let mut churches = vec![church(1, 7000)];
        let rows = vec![
            status_row(None, "Active"),
            status_row(Some("   "), "Active"),
        ];

        assert_eq!(apply_account_status(&mut churches, &rows), 0);
        assert_eq!(churches[0].account_status, "");
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let mut churches = vec![church(1, 7000)];
        let rows = vec![status_row(Some("9999"), "Active")];

        assert_eq!(apply_account_status(&mut churches, &rows), 0);
    }

    #[test]
    fn test_later_row_overwrites_earlier_status() {
        let mut churches = vec![church(1, 7000)];
        let rows = vec![
            status_row(Some("7000"), "Pending"),
            status_row(Some("7000"), "Active"),
        ];

        assert_eq!(apply_account_status(&mut churches, &rows), 2);
        assert_eq!(churches[0].account_status, "Active");
    }
}
