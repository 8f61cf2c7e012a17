use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::ascend::{HistoryEntry, NewHistoryEntry};

pub fn append_history(conn: &Connection, entry: &NewHistoryEntry) -> Result<HistoryEntry> {
    let sql = "INSERT INTO ascend_history (player_id, gamemode, old_overall_tier, new_overall_tier, change_type, created_at) \
               VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
               RETURNING id, player_id, gamemode, old_overall_tier, new_overall_tier, change_type, created_at";

    conn.query_row(
        sql,
        params![
            entry.player_id,
            entry.gamemode,
            entry.old_overall_tier,
            entry.new_overall_tier,
            entry.change_type,
            entry.created_at
        ],
        parse_history_row,
    )
    .context("Failed to append history entry")
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
    Ok(HistoryEntry {
        id: row.get(0)?,
        player_id: row.get(1)?,
        gamemode: row.get(2)?,
        old_overall_tier: row.get(3)?,
        new_overall_tier: row.get(4)?,
        change_type: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Newest first; insertion order breaks timestamp ties.
pub fn list_recent(conn: &Connection, player_id: i64, gamemode: &str, limit: usize) -> Result<Vec<HistoryEntry>> {
    let sql = "SELECT id, player_id, gamemode, old_overall_tier, new_overall_tier, change_type, created_at \
               FROM ascend_history WHERE player_id = ?1 AND gamemode = ?2 \
               ORDER BY created_at DESC, id DESC LIMIT ?3";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id, gamemode, limit as i64], parse_history_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascend::{ChangeType, PendingHistory, Tier};
    use crate::database::{players, setup::apply_schema};
    use chrono::{Duration, Utc};

    #[test]
    fn test_append_and_list_newest_first() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        let player = players::insert_player(&conn, "Herobrine", 1).unwrap();
        let start = Utc::now().naive_utc();

        let first = PendingHistory::open(player.id, "bedwars", None, start).finalize(Tier::D);
        let second = PendingHistory::open(player.id, "bedwars", Some(Tier::D), start + Duration::seconds(1))
            .finalize(Tier::B);
        append_history(&conn, &first).unwrap();
        let stored = append_history(&conn, &second).unwrap();
        assert_eq!(stored.change_type, ChangeType::Upgrade);

        let listed = list_recent(&conn, player.id, "bedwars", 10).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].old_overall_tier, Some(Tier::D));
        assert_eq!(listed[1].old_overall_tier, None);
        assert_eq!(listed[1].change_type, ChangeType::New);

        assert_eq!(list_recent(&conn, player.id, "bedwars", 1).unwrap().len(), 1);
        assert!(list_recent(&conn, player.id, "sumo", 10).unwrap().is_empty());
    }

    #[test]
    fn test_equal_timestamps_fall_back_to_insertion_order() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        let player = players::insert_player(&conn, "Twin", 1).unwrap();
        let at = Utc::now().naive_utc();

        append_history(&conn, &PendingHistory::open(player.id, "sumo", None, at).finalize(Tier::C)).unwrap();
        append_history(&conn, &PendingHistory::open(player.id, "sumo", Some(Tier::C), at).finalize(Tier::C)).unwrap();

        let listed = list_recent(&conn, player.id, "sumo", 5).unwrap();
        assert_eq!(listed[0].change_type, ChangeType::Same);
        assert_eq!(listed[1].change_type, ChangeType::New);
    }
}
