//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database. The engine and
//! the game logic call store methods — they never execute SQL.
//!
//! Records are whole JSON documents: get returns the full record,
//! put replaces it atomically. The engine serializes all mutation
//! through one writer, so read-modify-write at record granularity is
//! safe without row locking.

mod account;
mod enterprise;
mod world;

use crate::error::EconResult;
use rusqlite::Connection;

pub struct EconStore {
    conn: Connection,
}

impl EconStore {
    /// Open (or create) the economy database at `path`.
    pub fn open(path: &str) -> EconResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EconResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EconResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
