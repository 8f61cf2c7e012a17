use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::ascend::{EvaluationRecord, SkillSlot};

use super::models::Player;

const COLUMNS: &str = "player_id, gamemode, \
    skill1_name, skill1_score, skill1_tier, \
    skill2_name, skill2_score, skill2_tier, \
    skill3_name, skill3_score, skill3_tier, \
    skill4_name, skill4_score, skill4_tier, \
    overall_tier, comment, evaluator_name, global_rank, created_at, updated_at";

const TOTAL_SCORE: &str = "(e.skill1_score + e.skill2_score + e.skill3_score + e.skill4_score)";

/// `COLUMNS` prefixed with a table alias, for joins where names collide.
fn qualified_columns(alias: &str) -> String {
    COLUMNS
        .split(',')
        .map(|column| format!("{}.{}", alias, column.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_slot(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<SkillSlot> {
    Ok(SkillSlot {
        name: row.get(offset)?,
        score: row.get(offset + 1)?,
        tier: row.get(offset + 2)?,
    })
}

fn parse_evaluation_row(row: &rusqlite::Row) -> rusqlite::Result<EvaluationRecord> {
    Ok(EvaluationRecord {
        player_id: row.get(0)?,
        gamemode: row.get(1)?,
        skills: [
            parse_slot(row, 2)?,
            parse_slot(row, 5)?,
            parse_slot(row, 8)?,
            parse_slot(row, 11)?,
        ],
        overall_tier: row.get(14)?,
        comment: row.get(15)?,
        evaluator_name: row.get(16)?,
        global_rank: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

pub fn find(conn: &Connection, player_id: i64, gamemode: &str) -> Result<Option<EvaluationRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM ascend_evaluations WHERE player_id = ?1 AND gamemode = ?2");

    conn.query_row(&sql, params![player_id, gamemode], parse_evaluation_row)
        .optional()
        .context("Failed to query evaluation")
}

pub fn find_all(conn: &Connection, gamemode: &str) -> Result<Vec<EvaluationRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM ascend_evaluations WHERE gamemode = ?1");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![gamemode], parse_evaluation_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn create(conn: &Connection, record: &EvaluationRecord) -> Result<()> {
    let sql = format!(
        "INSERT INTO ascend_evaluations ({COLUMNS}) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)"
    );
    let [s1, s2, s3, s4] = &record.skills;

    conn.execute(
        &sql,
        params![
            record.player_id,
            record.gamemode,
            s1.name, s1.score, s1.tier,
            s2.name, s2.score, s2.tier,
            s3.name, s3.score, s3.tier,
            s4.name, s4.score, s4.tier,
            record.overall_tier,
            record.comment,
            record.evaluator_name,
            record.global_rank,
            record.created_at,
            record.updated_at
        ],
    )
    .with_context(|| format!("Failed to create evaluation for player {} in {}", record.player_id, record.gamemode))
    .map(|_| ())
}

pub fn update(conn: &Connection, record: &EvaluationRecord) -> Result<()> {
    let sql = "UPDATE ascend_evaluations SET \
        skill1_name = ?3, skill1_score = ?4, skill1_tier = ?5, \
        skill2_name = ?6, skill2_score = ?7, skill2_tier = ?8, \
        skill3_name = ?9, skill3_score = ?10, skill3_tier = ?11, \
        skill4_name = ?12, skill4_score = ?13, skill4_tier = ?14, \
        overall_tier = ?15, comment = ?16, evaluator_name = ?17, global_rank = ?18, updated_at = ?19 \
        WHERE player_id = ?1 AND gamemode = ?2";
    let [s1, s2, s3, s4] = &record.skills;

    let changed = conn
        .execute(
            sql,
            params![
                record.player_id,
                record.gamemode,
                s1.name, s1.score, s1.tier,
                s2.name, s2.score, s2.tier,
                s3.name, s3.score, s3.tier,
                s4.name, s4.score, s4.tier,
                record.overall_tier,
                record.comment,
                record.evaluator_name,
                record.global_rank,
                record.updated_at
            ],
        )
        .with_context(|| format!("Failed to update evaluation for player {} in {}", record.player_id, record.gamemode))?;

    if changed == 0 {
        anyhow::bail!("No evaluation for player {} in {} to update", record.player_id, record.gamemode);
    }
    Ok(())
}

/// Records in a mode joined with their players, best average first.
pub fn list_leaderboard(conn: &Connection, gamemode: &str, limit: usize) -> Result<Vec<(EvaluationRecord, Player)>> {
    let sql = format!(
        "SELECT {}, p.id, p.nickname, p.level, p.created_at \
         FROM ascend_evaluations e JOIN players p ON e.player_id = p.id \
         WHERE e.gamemode = ?1 ORDER BY {TOTAL_SCORE} DESC, e.player_id ASC LIMIT ?2",
        qualified_columns("e")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![gamemode, limit as i64], |row| {
            let record = parse_evaluation_row(row)?;
            let player = Player {
                id: row.get(20)?,
                nickname: row.get(21)?,
                level: row.get(22)?,
                created_at: row.get(23)?,
            };
            Ok((record, player))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load leaderboard")?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascend::record::default_skill_names;
    use crate::ascend::Tier;
    use crate::database::{players, setup::apply_schema};
    use chrono::Utc;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn
    }

    fn record_for(player_id: i64, gamemode: &str, scores: [i32; 4]) -> EvaluationRecord {
        let mut record = EvaluationRecord::new(
            player_id,
            gamemode,
            default_skill_names(),
            25,
            "Elite Squad",
            Utc::now().naive_utc(),
        );
        for (slot, score) in record.skills.iter_mut().zip(scores) {
            slot.set(i64::from(score), None);
        }
        record.recompute_overall_tier();
        record
    }

    #[test]
    fn test_create_then_find_preserves_every_field() {
        let conn = setup();
        let player = players::insert_player(&conn, "Notch", 50).unwrap();
        let mut record = record_for(player.id, "bedwars", [95, 80, 61, 12]);
        record.comment = "solid".to_string();
        record.global_rank = Some(3);
        record.skills[3].tier = Tier::B;

        create(&conn, &record).unwrap();

        assert_eq!(find(&conn, player.id, "bedwars").unwrap(), Some(record));
        assert_eq!(find(&conn, player.id, "skywars").unwrap(), None);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let conn = setup();
        let player = players::insert_player(&conn, "Jeb", 1).unwrap();
        let record = record_for(player.id, "bedwars", [25; 4]);

        create(&conn, &record).unwrap();
        assert!(create(&conn, &record).is_err());
    }

    #[test]
    fn test_update_overwrites_scores() {
        let conn = setup();
        let player = players::insert_player(&conn, "Dinnerbone", 3).unwrap();
        let mut record = record_for(player.id, "sumo", [25; 4]);
        create(&conn, &record).unwrap();

        record.skills[1].set(77, None);
        record.overall_tier = Tier::A;
        update(&conn, &record).unwrap();

        let stored = find(&conn, player.id, "sumo").unwrap().unwrap();
        assert_eq!(stored.skills[1].score, 77);
        assert_eq!(stored.skills[1].tier, Tier::BPlus);
        assert_eq!(stored.overall_tier, Tier::A);
    }

    #[test]
    fn test_update_missing_record_fails() {
        let conn = setup();
        assert!(update(&conn, &record_for(99, "sumo", [25; 4])).is_err());
    }

    #[test]
    fn test_leaderboard_orders_by_total_then_player() {
        let conn = setup();
        let a = players::insert_player(&conn, "a", 1).unwrap();
        let b = players::insert_player(&conn, "b", 1).unwrap();
        let c = players::insert_player(&conn, "c", 1).unwrap();
        create(&conn, &record_for(a.id, "bedwars", [50; 4])).unwrap();
        create(&conn, &record_for(b.id, "bedwars", [90; 4])).unwrap();
        create(&conn, &record_for(c.id, "bedwars", [50; 4])).unwrap();
        create(&conn, &record_for(c.id, "kitpvp", [100; 4])).unwrap();

        let board = list_leaderboard(&conn, "bedwars", 10).unwrap();
        let order: Vec<i64> = board.iter().map(|(_, p)| p.id).collect();
        assert_eq!(order, vec![b.id, a.id, c.id]);

        assert_eq!(list_leaderboard(&conn, "bedwars", 1).unwrap().len(), 1);
        assert_eq!(find_all(&conn, "bedwars").unwrap().len(), 3);
    }
}
