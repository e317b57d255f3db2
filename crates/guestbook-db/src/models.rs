//! Database row types. These map directly to SQLite rows.
//! Converted into guestbook-types API models at the query boundary.

use guestbook_types::api::{EntrySummary, UserSummary};

pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub message_count: i64,
}

/// A user joined with its newest entry, if any.
pub struct UserSummaryRow {
    pub name: String,
    pub message_count: i64,
    pub last_subject: Option<String>,
    pub last_message: Option<String>,
}

pub struct EntryListRow {
    pub user_name: String,
    pub subject: String,
    pub message: String,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        let last_entry = match (row.last_subject, row.last_message) {
            (Some(subject), Some(message)) => Some(format!("{} | {}", subject, message)),
            _ => None,
        };

        UserSummary {
            username: row.name,
            last_entry,
            total_count_of_messages: row.message_count,
        }
    }
}

impl From<EntryListRow> for EntrySummary {
    fn from(row: EntryListRow) -> Self {
        EntrySummary {
            user: row.user_name,
            subject: row.subject,
            message: row.message,
        }
    }
}
