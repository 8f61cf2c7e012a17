use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::GameMode;

pub fn upsert_game_mode(conn: &Connection, name: &str, display_name: &str, skills: &[&str; 4]) -> Result<()> {
    let sql = "INSERT INTO game_modes (name, display_name, skill1_name, skill2_name, skill3_name, skill4_name, is_active) \
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1) \
               ON CONFLICT(name) DO UPDATE SET display_name = excluded.display_name, \
               skill1_name = excluded.skill1_name, skill2_name = excluded.skill2_name, \
               skill3_name = excluded.skill3_name, skill4_name = excluded.skill4_name";

    conn.execute(
        sql,
        params![name, display_name, skills[0], skills[1], skills[2], skills[3]],
    )
    .with_context(|| format!("Failed to upsert game mode {}", name))
    .map(|_| ())
}

fn parse_game_mode_row(row: &rusqlite::Row) -> rusqlite::Result<GameMode> {
    Ok(GameMode {
        name: row.get(0)?,
        display_name: row.get(1)?,
        skill1_name: row.get(2)?,
        skill2_name: row.get(3)?,
        skill3_name: row.get(4)?,
        skill4_name: row.get(5)?,
        is_active: row.get(6)?,
    })
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<GameMode>> {
    let sql = "SELECT name, display_name, skill1_name, skill2_name, skill3_name, skill4_name, is_active FROM game_modes WHERE name = ?1";

    conn.query_row(sql, params![name], parse_game_mode_row)
        .optional()
        .context("Failed to query game mode by name")
}

pub fn list_active(conn: &Connection) -> Result<Vec<GameMode>> {
    let sql = "SELECT name, display_name, skill1_name, skill2_name, skill3_name, skill4_name, is_active FROM game_modes WHERE is_active = 1 ORDER BY name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_mode_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup::{apply_schema, setup_database};

    #[test]
    fn test_seeded_modes_are_listed() {
        let conn = Connection::open_in_memory().unwrap();
        let seeded = setup_database(&conn).unwrap();

        let modes = list_active(&conn).unwrap();
        assert_eq!(modes.len(), seeded);

        let kitpvp = find_by_name(&conn, "kitpvp").unwrap().unwrap();
        assert_eq!(kitpvp.skill1_name, "Aim");
        assert!(find_by_name(&conn, "parkour").unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_skill_names() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        upsert_game_mode(&conn, "duels", "Duels", &["A", "B", "C", "D"]).unwrap();
        upsert_game_mode(&conn, "duels", "Duels", &["Aim", "B", "C", "D"]).unwrap();

        let duels = find_by_name(&conn, "duels").unwrap().unwrap();
        assert_eq!(duels.skill_names()[0], "Aim");
        assert_eq!(list_active(&conn).unwrap().len(), 1);
    }
}
