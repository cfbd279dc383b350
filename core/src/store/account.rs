//! Account record persistence.

use super::EconStore;
use crate::{
    account::Account,
    error::EconResult,
    types::{UserId, Zentrons},
};
use rusqlite::{params, OptionalExtension};

impl EconStore {
    /// Fetch the account for `user_id`, creating and persisting a
    /// default record with the starting wallet when absent. Every
    /// caller sees a real account; there is no "missing user" state.
    pub fn account(&self, user_id: &str, starting_wallet: Zentrons) -> EconResult<Account> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT data FROM account WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => {
                let fresh = Account::fresh(starting_wallet);
                self.put_account(user_id, &fresh)?;
                log::debug!("created account for {user_id} with {starting_wallet} zentrons");
                Ok(fresh)
            }
        }
    }

    /// Full-record upsert. Callers round-trip the entire account.
    pub fn put_account(&self, user_id: &str, account: &Account) -> EconResult<()> {
        let json = serde_json::to_string(account)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO account (user_id, data) VALUES (?1, ?2)",
            params![user_id, json],
        )?;
        Ok(())
    }

    /// Leaderboard: top accounts by net worth (wallet + bank).
    pub fn top_accounts(&self, limit: usize) -> EconResult<Vec<(UserId, Account)>> {
        let mut stmt = self.conn().prepare(
            "SELECT user_id, data FROM account
             ORDER BY json_extract(data, '$.wallet') + json_extract(data, '$.bank') DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(id, json)| Ok((id, serde_json::from_str(&json)?)))
            .collect()
    }
}
