use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tier::Tier;

/// How the overall tier moved across one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Upgrade,
    Downgrade,
    Same,
}

impl ChangeType {
    pub fn classify(old: Option<Tier>, new: Tier) -> Self {
        match old {
            None => ChangeType::New,
            Some(old) if new.index() > old.index() => ChangeType::Upgrade,
            Some(old) if new.index() < old.index() => ChangeType::Downgrade,
            Some(_) => ChangeType::Same,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::New => "new",
            ChangeType::Upgrade => "upgrade",
            ChangeType::Downgrade => "downgrade",
            ChangeType::Same => "same",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ChangeType::New),
            "upgrade" => Ok(ChangeType::Upgrade),
            "downgrade" => Ok(ChangeType::Downgrade),
            "same" => Ok(ChangeType::Same),
            other => anyhow::bail!("Unknown change type: {}", other),
        }
    }
}

impl rusqlite::types::ToSql for ChangeType {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
    }
}

impl rusqlite::types::FromSql for ChangeType {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: anyhow::Error| rusqlite::types::FromSqlError::Other(e.into()))
    }
}

/// Snapshot taken before a record is overwritten. It only becomes a
/// history entry once the new overall tier is known.
#[derive(Debug, Clone)]
pub struct PendingHistory {
    player_id: i64,
    gamemode: String,
    old_overall_tier: Option<Tier>,
    created_at: NaiveDateTime,
}

impl PendingHistory {
    pub fn open(player_id: i64, gamemode: &str, old_overall_tier: Option<Tier>, created_at: NaiveDateTime) -> Self {
        Self {
            player_id,
            gamemode: gamemode.to_string(),
            old_overall_tier,
            created_at,
        }
    }

    pub fn finalize(self, new_overall_tier: Tier) -> NewHistoryEntry {
        NewHistoryEntry {
            change_type: ChangeType::classify(self.old_overall_tier, new_overall_tier),
            player_id: self.player_id,
            gamemode: self.gamemode,
            old_overall_tier: self.old_overall_tier,
            new_overall_tier,
            created_at: self.created_at,
        }
    }
}

/// Finalized entry waiting to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub player_id: i64,
    pub gamemode: String,
    pub old_overall_tier: Option<Tier>,
    pub new_overall_tier: Tier,
    pub change_type: ChangeType,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub player_id: i64,
    pub gamemode: String,
    pub old_overall_tier: Option<Tier>,
    pub new_overall_tier: Tier,
    pub change_type: ChangeType,
    pub created_at: NaiveDateTime,
}
