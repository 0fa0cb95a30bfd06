//! SQLite storage for users and tracked intervals
//!
//! Timestamps are stored as RFC 3339 text in UTC. The schema is created on
//! open, so a fresh data directory works without a migration step.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::path::Path;

use crate::intervals::Interval;
use crate::users::{NewUser, User};

/// Database filename inside the data directory
pub const DB_FILENAME: &str = "focus.db";

/// Storage wrapper
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

/// Row type for users query
#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    timezone: String,
}

/// Row type for intervals query
#[derive(FromRow)]
struct IntervalRow {
    interval_id: i64,
    user_id: i64,
    project_id: Option<i64>,
    name: String,
    start_time: String,
    end_time: Option<String>,
}

impl Store {
    /// Open or create the database
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // SQLx requires the file to exist for SQLite
        if !path.exists() {
            std::fs::File::create(path)?;
        }

        let url = format!("sqlite:{}", path.display());
        let pool = SqlitePool::connect(&url)
            .await
            .context("Failed to open database")?;

        Self::from_pool(pool).await
    }

    /// Open an in-memory database (tests)
    ///
    /// Pinned to a single connection: every pooled connection would otherwise
    /// see its own empty in-memory database.
    pub async fn open_in_memory() -> Result<Self> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        // WAL mode and a busy timeout prevent SQLITE_BUSY errors when the
        // server and the admin CLI touch the same file
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout=5000")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA foreign_keys=ON").execute(&pool).await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                email TEXT NOT NULL,
                timezone TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "
            CREATE TABLE IF NOT EXISTS intervals (
                interval_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                project_id INTEGER,
                name TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index for per-user interval lookups
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_intervals_user ON intervals(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user, returns the ID
    pub async fn create_user(&self, user: &NewUser) -> Result<i64> {
        let result = sqlx::query("INSERT INTO users (username, email, timezone) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.timezone)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch a user by ID
    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, email, timezone FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|r| User {
            id: r.id,
            username: r.username,
            email: r.email,
            timezone: r.timezone,
        }))
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, username, email, timezone FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|r| User {
                id: r.id,
                username: r.username,
                email: r.email,
                timezone: r.timezone,
            })
            .collect())
    }

    /// Delete a user (intervals cascade)
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update a user's timezone setting
    pub async fn set_timezone(&self, id: i64, timezone: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET timezone = ? WHERE id = ?")
            .bind(timezone)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Intervals
    // =========================================================================

    /// Start a new interval, returns the ID
    pub async fn start_interval(
        &self,
        user_id: i64,
        project_id: Option<i64>,
        name: &str,
        start: DateTime<Utc>,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO intervals (user_id, project_id, name, start_time) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(project_id)
        .bind(name)
        .bind(start.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Set the end time of an interval
    pub async fn end_interval(&self, id: i64, end: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query("UPDATE intervals SET end_time = ? WHERE interval_id = ?")
            .bind(end.to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Rewrite an interval's fields
    pub async fn edit_interval(&self, id: i64, interval: &Interval) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE intervals SET name = ?, project_id = ?, start_time = ?, end_time = ?
             WHERE interval_id = ?",
        )
        .bind(&interval.name)
        .bind(interval.project_id)
        .bind(interval.start_time.to_rfc3339())
        .bind(interval.end_time.map(|e| e.to_rfc3339()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an interval by ID
    pub async fn delete_interval(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM intervals WHERE interval_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Completed intervals for a user, oldest first
    pub async fn finished_intervals(&self, user_id: i64) -> Result<Vec<Interval>> {
        let rows: Vec<IntervalRow> = sqlx::query_as(
            "SELECT interval_id, user_id, project_id, name, start_time, end_time
             FROM intervals
             WHERE user_id = ? AND end_time IS NOT NULL
             ORDER BY start_time",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_interval).collect()
    }

    /// The earliest-started interval that has not been stopped. Normally at
    /// most one interval is open per user; if several are, the oldest wins.
    pub async fn active_interval(&self, user_id: i64) -> Result<Option<Interval>> {
        let row: Option<IntervalRow> = sqlx::query_as(
            "SELECT interval_id, user_id, project_id, name, start_time, end_time
             FROM intervals
             WHERE user_id = ? AND end_time IS NULL
             ORDER BY start_time
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_interval).transpose()
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Get storage statistics
    pub async fn stats(&self) -> Result<StoreStats> {
        let users: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let intervals: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM intervals")
            .fetch_one(&self.pool)
            .await?;

        Ok(StoreStats {
            users: users.0 as u64,
            intervals: intervals.0 as u64,
        })
    }
}

/// Convert an IntervalRow to an Interval
fn row_to_interval(r: IntervalRow) -> Result<Interval> {
    let start_time = parse_timestamp(&r.start_time)?;
    let end_time = r.end_time.as_deref().map(parse_timestamp).transpose()?;

    Ok(Interval {
        id: Some(r.interval_id),
        user_id: r.user_id,
        project_id: r.project_id,
        name: r.name,
        start_time,
        end_time,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp: {}", s))
}

/// Storage statistics
#[derive(Debug)]
pub struct StoreStats {
    pub users: u64,
    pub intervals: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} users, {} intervals", self.users, self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_user() -> NewUser {
        NewUser {
            username: "dana".to_string(),
            email: "dana@example.com".to_string(),
            timezone: "America/Los_Angeles".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let store = Store::open_in_memory().await.unwrap();
        let id = store.create_user(&test_user()).await.unwrap();

        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.username, "dana");
        assert_eq!(user.timezone, "America/Los_Angeles");

        assert!(store.get_user(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_timezone() {
        let store = Store::open_in_memory().await.unwrap();
        let id = store.create_user(&test_user()).await.unwrap();

        assert!(store.set_timezone(id, "Europe/Berlin").await.unwrap());
        let user = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(user.timezone, "Europe/Berlin");

        assert!(!store.set_timezone(id + 1, "UTC").await.unwrap());
    }

    #[tokio::test]
    async fn test_interval_lifecycle() {
        let store = Store::open_in_memory().await.unwrap();
        let user_id = store.create_user(&test_user()).await.unwrap();

        let start = Utc.with_ymd_and_hms(2025, 8, 29, 9, 0, 0).unwrap();
        let id = store
            .start_interval(user_id, None, "deep work", start)
            .await
            .unwrap();

        // Running interval is active, not finished
        let active = store.active_interval(user_id).await.unwrap().unwrap();
        assert_eq!(active.id, Some(id));
        assert_eq!(active.name, "deep work");
        assert!(store.finished_intervals(user_id).await.unwrap().is_empty());

        // Stop it
        let end = start + chrono::Duration::hours(1);
        assert!(store.end_interval(id, end).await.unwrap());

        assert!(store.active_interval(user_id).await.unwrap().is_none());
        let finished = store.finished_intervals(user_id).await.unwrap();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].start_time, start);
        assert_eq!(finished[0].end_time, Some(end));
    }

    #[tokio::test]
    async fn test_active_interval_is_oldest_open_one() {
        let store = Store::open_in_memory().await.unwrap();
        let user_id = store.create_user(&test_user()).await.unwrap();

        let base = Utc.with_ymd_and_hms(2025, 8, 29, 9, 0, 0).unwrap();
        let first = store
            .start_interval(user_id, None, "first", base)
            .await
            .unwrap();
        store
            .start_interval(user_id, None, "second", base + chrono::Duration::hours(1))
            .await
            .unwrap();

        let active = store.active_interval(user_id).await.unwrap().unwrap();
        assert_eq!(active.id, Some(first));
        assert_eq!(active.name, "first");
    }

    #[tokio::test]
    async fn test_finished_intervals_ordered_by_start() {
        let store = Store::open_in_memory().await.unwrap();
        let user_id = store.create_user(&test_user()).await.unwrap();

        let base = Utc.with_ymd_and_hms(2025, 8, 29, 9, 0, 0).unwrap();
        let later = base + chrono::Duration::hours(3);

        // Insert out of order
        let id2 = store
            .start_interval(user_id, None, "second", later)
            .await
            .unwrap();
        let id1 = store
            .start_interval(user_id, Some(7), "first", base)
            .await
            .unwrap();
        store
            .end_interval(id2, later + chrono::Duration::hours(1))
            .await
            .unwrap();
        store
            .end_interval(id1, base + chrono::Duration::hours(1))
            .await
            .unwrap();

        let finished = store.finished_intervals(user_id).await.unwrap();
        let names: Vec<&str> = finished.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(finished[0].project_id, Some(7));
    }

    #[tokio::test]
    async fn test_delete_user_cascades_intervals() {
        let store = Store::open_in_memory().await.unwrap();
        let user_id = store.create_user(&test_user()).await.unwrap();
        store
            .start_interval(user_id, None, "work", Utc::now())
            .await
            .unwrap();

        assert!(store.delete_user(user_id).await.unwrap());

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.users, 0);
        assert_eq!(stats.intervals, 0);
    }

    #[tokio::test]
    async fn test_edit_interval() {
        let store = Store::open_in_memory().await.unwrap();
        let user_id = store.create_user(&test_user()).await.unwrap();

        let start = Utc.with_ymd_and_hms(2025, 8, 29, 9, 0, 0).unwrap();
        let id = store
            .start_interval(user_id, None, "draft", start)
            .await
            .unwrap();

        let edited = Interval {
            id: Some(id),
            user_id,
            project_id: Some(3),
            name: "final".to_string(),
            start_time: start,
            end_time: Some(start + chrono::Duration::minutes(45)),
        };
        assert!(store.edit_interval(id, &edited).await.unwrap());

        let finished = store.finished_intervals(user_id).await.unwrap();
        assert_eq!(finished[0].name, "final");
        assert_eq!(finished[0].project_id, Some(3));
    }
}
