//! World-scoped records: the singleton tax pool and per-guild config
//! (updates channel + surge window).

use super::EconStore;
use crate::{
    error::EconResult,
    types::{EpochSecs, GuildId, Zentrons},
};
use rusqlite::{params, OptionalExtension};

impl EconStore {
    // ── Tax pool ──────────────────────────────────────────────

    pub fn tax_pool(&self) -> EconResult<Zentrons> {
        let amount: i64 = self.conn().query_row(
            "SELECT amount FROM tax_pool WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(amount)
    }

    pub fn set_tax_pool(&self, amount: Zentrons) -> EconResult<()> {
        self.conn()
            .execute("UPDATE tax_pool SET amount = ?1 WHERE id = 1", params![amount])?;
        Ok(())
    }

    // ── Guild config ──────────────────────────────────────────

    pub fn updates_channel(&self, guild_id: &str) -> EconResult<Option<String>> {
        let channel: Option<Option<String>> = self
            .conn()
            .query_row(
                "SELECT updates_channel_id FROM guild_config WHERE guild_id = ?1",
                params![guild_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(channel.flatten())
    }

    /// Record the updates channel, preserving any surge state the
    /// guild row already carries.
    pub fn set_updates_channel(&self, guild_id: &str, channel_id: &str) -> EconResult<()> {
        self.conn().execute(
            "INSERT INTO guild_config (guild_id, updates_channel_id) VALUES (?1, ?2)
             ON CONFLICT(guild_id) DO UPDATE SET updates_channel_id = excluded.updates_channel_id",
            params![guild_id, channel_id],
        )?;
        Ok(())
    }

    /// The guild's live reward multiplier: 1.0 unless a surge is
    /// active and unexpired at `now`.
    pub fn surge_multiplier(&self, guild_id: &str, now: EpochSecs) -> EconResult<f64> {
        let row: Option<(bool, i64, f64)> = self
            .conn()
            .query_row(
                "SELECT surge_active, surge_end, surge_multiplier
                 FROM guild_config WHERE guild_id = ?1",
                params![guild_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)? != 0,
                        row.get(1)?,
                        row.get(2)?,
                    ))
                },
            )
            .optional()?;
        match row {
            Some((true, end, multiplier)) if now < end => Ok(multiplier),
            _ => Ok(1.0),
        }
    }

    pub fn activate_surge(
        &self,
        guild_id: &str,
        end: EpochSecs,
        multiplier: f64,
    ) -> EconResult<()> {
        self.conn().execute(
            "INSERT INTO guild_config (guild_id, surge_active, surge_end, surge_multiplier)
             VALUES (?1, 1, ?2, ?3)
             ON CONFLICT(guild_id) DO UPDATE SET
                 surge_active = 1, surge_end = excluded.surge_end,
                 surge_multiplier = excluded.surge_multiplier",
            params![guild_id, end, multiplier],
        )?;
        Ok(())
    }

    /// Every guild the core has seen, for the surge sweep.
    pub fn all_guild_ids(&self) -> EconResult<Vec<GuildId>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT guild_id FROM guild_config ORDER BY guild_id")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
