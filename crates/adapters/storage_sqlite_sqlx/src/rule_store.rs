//! `SQLite` implementation of [`RuleStore`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use rulekeeper_app::ports::RuleStore;
use rulekeeper_domain::error::RuleKeeperError;
use rulekeeper_domain::id::{RuleId, UserId};
use rulekeeper_domain::rule::{Action, Condition, Rule};

use crate::error::StorageError;

struct Wrapper(Rule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Rule> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let user_id: String = row.try_get("user_id")?;
        let id: String = row.try_get("id")?;
        let name: Option<String> = row.try_get("name")?;
        let conditions_json: String = row.try_get("conditions")?;
        let actions_json: String = row.try_get("actions")?;

        let owner_id =
            UserId::from_str(&user_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let id = RuleId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let conditions: Vec<Condition> = serde_json::from_str(&conditions_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let actions: Vec<Action> = serde_json::from_str(&actions_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Rule {
            id,
            owner_id,
            name,
            conditions,
            actions,
        }))
    }
}

/// `SQLite`-backed rule store.
///
/// Rows are keyed by `(user_id, id)`. Conditions and actions are stored as
/// JSON text, and listing follows insertion order.
#[derive(Clone)]
pub struct SqliteRuleStore {
    pool: SqlitePool,
}

impl SqliteRuleStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleStore for SqliteRuleStore {
    async fn save(&self, rule: Rule) -> Result<(), RuleKeeperError> {
        let conditions_json = serde_json::to_string(&rule.conditions)
            .map_err(|source| StorageError::Encode {
                part: "conditions",
                source,
            })?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(|source| {
            StorageError::Encode {
                part: "actions",
                source,
            }
        })?;

        sqlx::query(
                "INSERT INTO rules (user_id, id, name, conditions, actions) VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT (user_id, id) DO UPDATE SET name = excluded.name, conditions = excluded.conditions, actions = excluded.actions",
            )
            .bind(rule.owner_id.to_string())
            .bind(rule.id.to_string())
            .bind(&rule.name)
            .bind(&conditions_json)
            .bind(&actions_json)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn find_one(&self, owner: UserId, id: RuleId) -> Result<Option<Rule>, RuleKeeperError> {
        let row: Option<Wrapper> =
            sqlx::query_as("SELECT * FROM rules WHERE user_id = ? AND id = ?")
                .bind(owner.to_string())
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn find_all(&self, owner: UserId) -> Result<Vec<Rule>, RuleKeeperError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM rules WHERE user_id = ? ORDER BY rowid")
                .bind(owner.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn remove(&self, owner: UserId, id: RuleId) -> Result<(), RuleKeeperError> {
        sqlx::query("DELETE FROM rules WHERE user_id = ? AND id = ?")
            .bind(owner.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
