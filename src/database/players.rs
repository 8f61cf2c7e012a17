use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;

pub fn insert_player(conn: &Connection, nickname: &str, level: i32) -> Result<Player> {
    let sql = "INSERT INTO players (nickname, level) VALUES (?1, ?2) RETURNING id, nickname, level, created_at";

    conn.query_row(sql, params![nickname, level], parse_player_row)
        .with_context(|| format!("Failed to insert player {}", nickname))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        nickname: row.get(1)?,
        level: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = "SELECT id, nickname, level, created_at FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}
