use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::links::EntryLinks;

// -- Users --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    /// `"<subject> | <message>"` of the user's newest entry.
    pub last_entry: Option<String>,
    pub total_count_of_messages: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub message_count: i64,
}

// -- Entries --

/// Body of `POST /entries`. Unknown keys such as a client-sent
/// `created_at` are ignored; the server stamps its own time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub user: String,
    pub subject: String,
    pub message: String,
}

/// One page of entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryList {
    pub count: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub current_page_number: i64,
    pub links: EntryLinks,
    pub entries: Vec<EntrySummary>,
}

impl EntryList {
    /// Builds the envelope and fills in the navigation links.
    pub fn new(
        count: i64,
        page_size: i64,
        total_pages: i64,
        current_page_number: i64,
        entries: Vec<EntrySummary>,
    ) -> Self {
        Self {
            count,
            page_size,
            total_pages,
            current_page_number,
            links: EntryLinks::for_page(current_page_number, total_pages, page_size),
            entries,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}
