use anyhow::Context;
use chrono::{NaiveDateTime, Utc};
use log::info;
use rusqlite::{Connection, Transaction};
use serde::Serialize;
use serde_json::Value;

use crate::ascend::record::default_skill_names;
use crate::ascend::{
    global_rank, parse_import, standings, EvaluationRecord, EvaluationView, HistoryEntry,
    PendingHistory, Tier, SKILL_COUNT,
};
use crate::config::settings::AscendSettings;
use crate::database::{self, evaluations, game_modes, history, players, DbPool, GameMode, Player};
use crate::errors::{AscendError, AscendResult};

/// Values an evaluator submits. Absent scores fall back to the default
/// score, absent tiers are derived from the paired score.
#[derive(Debug, Clone, Default)]
pub struct EvaluationInput {
    pub scores: [Option<i64>; SKILL_COUNT],
    pub tiers: [Option<Tier>; SKILL_COUNT],
    pub overall_tier: Option<Tier>,
    pub comment: Option<String>,
    pub evaluator_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub record: EvaluationRecord,
    /// Parsed keys that matched one of the record's skills.
    pub imported_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i32,
    pub player: Player,
    pub ascend: EvaluationView,
    pub average_score: f64,
}

/// Owns every read-modify-write on evaluation records. Each operation runs
/// in a single transaction, so a history entry is never committed without
/// the record update it describes.
pub struct AscendService {
    pool: DbPool,
    settings: AscendSettings,
}

impl AscendService {
    pub fn new(pool: DbPool, settings: AscendSettings) -> Self {
        Self { pool, settings }
    }

    /// Drop and recreate the schema, then seed the built-in game modes.
    pub fn reset(&self) -> AscendResult<usize> {
        self.in_transaction(|tx| Ok(database::setup::setup_database(tx)?))
    }

    pub fn register_player(&self, nickname: &str, level: i32) -> AscendResult<Player> {
        self.in_transaction(|tx| Ok(players::insert_player(tx, nickname, level)?))
    }

    pub fn list_game_modes(&self) -> AscendResult<Vec<GameMode>> {
        let conn = database::get_connection(&self.pool)?;
        Ok(game_modes::list_active(&conn)?)
    }

    /// Read path: the stored record, or a freshly persisted default one.
    pub fn get_or_create(&self, player_id: i64, gamemode: &str) -> AscendResult<EvaluationRecord> {
        self.in_transaction(|tx| {
            require_player(tx, player_id)?;
            if let Some(record) = evaluations::find(tx, player_id, gamemode)? {
                return Ok(record);
            }

            let mut record = self.blank_record(tx, player_id, gamemode, Utc::now().naive_utc())?;
            record.global_rank = Some(rank_within_mode(tx, &record)?);
            evaluations::create(tx, &record)?;
            info!("Created default ASCEND record for player {} in {}", player_id, gamemode);
            Ok(record)
        })
    }

    pub fn upsert_evaluation(
        &self,
        player_id: i64,
        gamemode: &str,
        input: EvaluationInput,
    ) -> AscendResult<EvaluationRecord> {
        self.in_transaction(|tx| {
            require_player(tx, player_id)?;
            let now = Utc::now().naive_utc();
            let (mut record, pending) = self.open_for_update(tx, player_id, gamemode, now)?;

            for (idx, slot) in record.skills.iter_mut().enumerate() {
                let score = input.scores[idx].unwrap_or(i64::from(self.settings.default_score));
                slot.set(score, input.tiers[idx]);
            }
            record.overall_tier = input
                .overall_tier
                .unwrap_or_else(|| record.derived_overall_tier());
            record.comment = input.comment.unwrap_or_default();
            record.evaluator_name = input
                .evaluator_name
                .unwrap_or_else(|| self.settings.default_evaluator.to_string());
            record.updated_at = now;

            commit_update(tx, record, pending)
        })
    }

    pub fn import_scores(
        &self,
        player_id: i64,
        gamemode: &str,
        raw: &Value,
        evaluator_name: Option<String>,
        comment: Option<String>,
    ) -> AscendResult<ImportOutcome> {
        if is_empty_payload(raw) {
            return Err(AscendError::EmptyImport);
        }
        let parsed = parse_import(raw);

        self.in_transaction(|tx| {
            require_player(tx, player_id)?;
            let now = Utc::now().naive_utc();
            let (mut record, pending) = self.open_for_update(tx, player_id, gamemode, now)?;

            let imported_fields = record.apply_imported(&parsed);
            record.recompute_overall_tier();
            record.evaluator_name =
                evaluator_name.unwrap_or_else(|| self.settings.import_evaluator.to_string());
            record.comment = comment.unwrap_or_else(|| self.settings.import_comment.to_string());
            record.updated_at = now;

            let record = commit_update(tx, record, pending)?;
            Ok(ImportOutcome {
                record,
                imported_fields,
            })
        })
    }

    /// Newest first. `limit` is clamped to the configured bounds.
    pub fn history(&self, player_id: i64, gamemode: &str, limit: Option<usize>) -> AscendResult<Vec<HistoryEntry>> {
        let conn = database::get_connection(&self.pool)?;
        let limit = self.settings.history_limit(limit);
        Ok(history::list_recent(&conn, player_id, gamemode, limit)?)
    }

    pub fn leaderboard(&self, gamemode: &str, limit: Option<usize>) -> AscendResult<Vec<LeaderboardEntry>> {
        let conn = database::get_connection(&self.pool)?;
        let limit = self.settings.leaderboard_limit(limit);
        let rows = evaluations::list_leaderboard(&conn, gamemode, limit)?;

        let totals: Vec<i32> = rows.iter().map(|(record, _)| record.total_score()).collect();
        let entries = rows
            .into_iter()
            .zip(standings(&totals))
            .map(|((record, player), rank)| {
                let ascend = record.view();
                LeaderboardEntry {
                    rank,
                    player,
                    average_score: ascend.average_score,
                    ascend,
                }
            })
            .collect();

        Ok(entries)
    }

    fn in_transaction<T>(&self, work: impl FnOnce(&Transaction) -> AscendResult<T>) -> AscendResult<T> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn.transaction().context("Failed to begin transaction")?;
        // Dropping `tx` on the error path rolls everything back.
        let value = work(&tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }

    /// Existing record (or a blank one) plus a history snapshot of its
    /// current overall tier, taken before anything is changed.
    fn open_for_update(
        &self,
        conn: &Connection,
        player_id: i64,
        gamemode: &str,
        now: NaiveDateTime,
    ) -> AscendResult<(EvaluationRecord, PendingHistory)> {
        let (record, old_tier) = match evaluations::find(conn, player_id, gamemode)? {
            Some(record) => {
                let old_tier = record.overall_tier;
                (record, Some(old_tier))
            }
            None => (self.blank_record(conn, player_id, gamemode, now)?, None),
        };
        let pending = PendingHistory::open(player_id, gamemode, old_tier, now);
        Ok((record, pending))
    }

    fn blank_record(
        &self,
        conn: &Connection,
        player_id: i64,
        gamemode: &str,
        now: NaiveDateTime,
    ) -> AscendResult<EvaluationRecord> {
        let names = match game_modes::find_by_name(conn, gamemode)? {
            Some(mode) => mode.skill_names(),
            None => {
                log::debug!("Unknown game mode {}, using default skill names", gamemode);
                default_skill_names()
            }
        };
        Ok(EvaluationRecord::new(
            player_id,
            gamemode,
            names,
            self.settings.default_score,
            self.settings.default_evaluator,
            now,
        ))
    }
}

fn require_player(conn: &Connection, player_id: i64) -> AscendResult<Player> {
    players::find_by_id(conn, player_id)?.ok_or(AscendError::PlayerNotFound(player_id))
}

fn rank_within_mode(conn: &Connection, record: &EvaluationRecord) -> AscendResult<i32> {
    let peers = evaluations::find_all(conn, &record.gamemode)?;
    Ok(global_rank(record, &peers))
}

/// Finalize the history snapshot, refresh the rank and write both.
fn commit_update(
    conn: &Connection,
    mut record: EvaluationRecord,
    pending: PendingHistory,
) -> AscendResult<EvaluationRecord> {
    let is_new = evaluations::find(conn, record.player_id, &record.gamemode)?.is_none();
    let entry = history::append_history(conn, &pending.finalize(record.overall_tier))?;

    record.global_rank = Some(rank_within_mode(conn, &record)?);
    if is_new {
        evaluations::create(conn, &record)?;
    } else {
        evaluations::update(conn, &record)?;
    }

    info!(
        "ASCEND player {} in {}: {} -> {} ({}), rank #{}",
        record.player_id,
        record.gamemode,
        entry
            .old_overall_tier
            .map(|tier| tier.to_string())
            .unwrap_or_else(|| "-".to_string()),
        entry.new_overall_tier,
        entry.change_type,
        record.global_rank.unwrap_or_default()
    );
    Ok(record)
}

fn is_empty_payload(raw: &Value) -> bool {
    match raw {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
