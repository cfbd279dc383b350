//! Enterprise record persistence. At most one per user; enterprises
//! are never deleted once founded.

use super::EconStore;
use crate::{account::Enterprise, error::EconResult, types::UserId};
use rusqlite::{params, OptionalExtension};

impl EconStore {
    pub fn enterprise(&self, user_id: &str) -> EconResult<Option<Enterprise>> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT data FROM enterprise WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn put_enterprise(&self, user_id: &str, enterprise: &Enterprise) -> EconResult<()> {
        let json = serde_json::to_string(enterprise)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO enterprise (user_id, data) VALUES (?1, ?2)",
            params![user_id, json],
        )?;
        Ok(())
    }

    /// Every enterprise with its owner, for the background sweeps.
    pub fn all_enterprises(&self) -> EconResult<Vec<(UserId, Enterprise)>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT user_id, data FROM enterprise ORDER BY user_id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, json)| Ok((id, serde_json::from_str(&json)?)))
            .collect()
    }
}
