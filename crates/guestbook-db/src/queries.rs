use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use guestbook_types::api::{
    EntryList, EntryRecord, EntrySummary, NewEntry, UserList, UserRecord, UserSummary,
};
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::is_unique_violation;
use crate::models::{EntryListRow, UserRow, UserSummaryRow};
use crate::pagination::paginate;
use crate::{Database, DbError, Result};

impl Database {
    // -- Users --

    /// Every user with their newest entry, ordered by name. Not paginated.
    pub fn list_users(&self) -> Result<UserList> {
        let rows = self.with_conn(query_user_summaries)?;

        Ok(UserList {
            users: rows.into_iter().map(UserSummary::from).collect(),
        })
    }

    /// Create a user, failing with [`DbError::Conflict`] if the name is taken.
    pub fn add_user(&self, name: &str) -> Result<UserRecord> {
        self.with_tx(|tx| {
            if query_user_by_name(tx, name)?.is_some() {
                return Err(DbError::Conflict(name.to_string()));
            }
            insert_user(tx, name)
        })
    }

    // -- Entries --

    pub fn list_entries(&self, page: i64, limit: i64) -> Result<EntryList> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
            let page = paginate(page, limit, count);

            let entries = query_entry_page(conn, page.limit, page.offset)?
                .into_iter()
                .map(EntrySummary::from)
                .collect();

            Ok(EntryList::new(
                count,
                page.limit,
                page.total_pages,
                page.page,
                entries,
            ))
        })
    }

    /// Store an entry, creating its user on first post. The user's
    /// `message_count` is bumped in the same transaction as the insert.
    pub fn add_entry(&self, entry: &NewEntry) -> Result<EntryRecord> {
        self.with_tx(|tx| {
            let user_id = match query_user_by_name(tx, &entry.name)? {
                Some(user) => user.id,
                None => insert_user(tx, &entry.name)?.id,
            };

            tx.execute(
                "UPDATE users SET message_count = message_count + 1 WHERE id = ?1",
                [user_id],
            )?;

            let created_at = now();
            tx.execute(
                "INSERT INTO entries (subject, message, created_at, user_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    entry.subject,
                    entry.message,
                    format_timestamp(&created_at),
                    user_id
                ],
            )?;
            let id = tx.last_insert_rowid();

            debug!("Stored entry {} for user {}", id, user_id);
            Ok(EntryRecord {
                id,
                subject: entry.subject.clone(),
                message: entry.message.clone(),
                created_at,
                user_id,
            })
        })
    }
}

fn insert_user(conn: &Connection, name: &str) -> Result<UserRecord> {
    let created_at = now();

    conn.execute(
        "INSERT INTO users (name, created_at, message_count) VALUES (?1, ?2, 0)",
        (name, format_timestamp(&created_at)),
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            DbError::Conflict(name.to_string())
        } else {
            e.into()
        }
    })?;

    let id = conn.last_insert_rowid();
    info!("Created user {} ({})", name, id);

    Ok(UserRecord {
        id,
        name: name.to_string(),
        created_at,
        message_count: 0,
    })
}

fn query_user_by_name(conn: &Connection, name: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, created_at, message_count FROM users WHERE name = ?1")?;

    let row = stmt
        .query_row([name], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
                message_count: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_summaries(conn: &Connection) -> Result<Vec<UserSummaryRow>> {
    // Newest entry per user is the one with the largest id
    let mut stmt = conn.prepare(
        "SELECT u.name, u.message_count, e.subject, e.message
         FROM users u
         LEFT JOIN entries e
            ON e.id = (SELECT MAX(id) FROM entries WHERE user_id = u.id)
         ORDER BY u.name",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserSummaryRow {
                name: row.get(0)?,
                message_count: row.get(1)?,
                last_subject: row.get(2)?,
                last_message: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_entry_page(conn: &Connection, limit: i64, offset: i64) -> Result<Vec<EntryListRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.name, e.subject, e.message
         FROM entries e
         JOIN users u ON u.id = e.user_id
         ORDER BY e.created_at DESC, e.id DESC
         LIMIT ?1 OFFSET ?2",
    )?;

    let rows = stmt
        .query_map([limit, offset], |row| {
            Ok(EntryListRow {
                user_name: row.get(0)?,
                subject: row.get(1)?,
                message: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

// Fixed-width RFC 3339 so text ordering matches time ordering.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
