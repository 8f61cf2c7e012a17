use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::config::game_modes::get_game_modes;

use super::game_modes;

const SCHEMA: &str = include_str!("schema.sql");

/// Wipe the ASCEND tables, recreate them and seed the built-in game modes.
/// Returns the number of modes seeded.
pub fn setup_database(conn: &Connection) -> Result<usize> {
    apply_schema(conn)?;

    let modes = get_game_modes();
    for mode in &modes {
        game_modes::upsert_game_mode(conn, mode.name, mode.display_name, &mode.skills)
            .with_context(|| format!("Failed to seed game mode {}", mode.name))?;
    }

    log::info!("Database reset with {} game modes", modes.len());
    Ok(modes.len())
}

/// Drop and recreate every table without seeding anything.
pub(crate) fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Failed to apply database schema")
}
