use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use super::ranking::{average_score, round_one_decimal};
use super::tier::{tier_for, Tier};

pub const SKILL_COUNT: usize = 4;

/// Skill names used when a game mode has no definition of its own.
pub const DEFAULT_SKILL_NAMES: [&str; SKILL_COUNT] = ["PVP", "Clutching", "Block Placement", "Gamesense"];

pub type SkillNames = [String; SKILL_COUNT];

pub fn default_skill_names() -> SkillNames {
    DEFAULT_SKILL_NAMES.map(String::from)
}

pub fn clamp_score(score: i64) -> i32 {
    score.clamp(0, 100) as i32
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillSlot {
    pub name: String,
    pub score: i32,
    pub tier: Tier,
}

impl SkillSlot {
    fn new(name: String, score: i32) -> Self {
        Self {
            name,
            score,
            tier: Tier::from_score(score),
        }
    }

    /// Store a score, keeping an explicit tier or deriving one from the score.
    pub fn set(&mut self, score: i64, tier: Option<Tier>) {
        self.score = clamp_score(score);
        self.tier = tier.unwrap_or_else(|| Tier::from_score(self.score));
    }
}

/// ASCEND evaluation of one player in one game mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    pub player_id: i64,
    pub gamemode: String,
    pub skills: [SkillSlot; SKILL_COUNT],
    pub overall_tier: Tier,
    pub comment: String,
    pub evaluator_name: String,
    pub global_rank: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl EvaluationRecord {
    /// Fresh record with every skill at `default_score`.
    pub fn new(
        player_id: i64,
        gamemode: &str,
        names: SkillNames,
        default_score: i32,
        evaluator_name: &str,
        now: NaiveDateTime,
    ) -> Self {
        let score = clamp_score(default_score as i64);
        let skills = names.map(|name| SkillSlot::new(name, score));
        let mut record = Self {
            player_id,
            gamemode: gamemode.to_string(),
            skills,
            overall_tier: Tier::D,
            comment: String::new(),
            evaluator_name: evaluator_name.to_string(),
            global_rank: None,
            created_at: now,
            updated_at: now,
        };
        record.recompute_overall_tier();
        record
    }

    pub fn scores(&self) -> [i32; SKILL_COUNT] {
        [
            self.skills[0].score,
            self.skills[1].score,
            self.skills[2].score,
            self.skills[3].score,
        ]
    }

    pub fn total_score(&self) -> i32 {
        self.scores().iter().sum()
    }

    pub fn average(&self) -> f64 {
        average_score(&self.scores())
    }

    /// Classify the unrounded mean of the four skill scores.
    pub fn derived_overall_tier(&self) -> Tier {
        tier_for(self.average())
    }

    pub fn recompute_overall_tier(&mut self) {
        self.overall_tier = self.derived_overall_tier();
    }

    /// Index of the slot whose name matches `key`, ignoring case.
    pub fn slot_index(&self, key: &str) -> Option<usize> {
        let key = key.trim().to_lowercase();
        self.skills
            .iter()
            .position(|slot| slot.name.to_lowercase() == key)
    }

    /// Apply parsed import scores to matching slots, returning the keys
    /// that hit a slot. Tiers are always derived from the imported score.
    pub fn apply_imported(&mut self, scores: &BTreeMap<String, i32>) -> Vec<String> {
        let mut applied = Vec::new();
        for (key, score) in scores {
            if let Some(idx) = self.slot_index(key) {
                self.skills[idx].set(i64::from(*score), None);
                applied.push(key.clone());
            }
        }
        applied
    }

    pub fn view(&self) -> EvaluationView {
        let [s1, s2, s3, s4] = &self.skills;
        EvaluationView {
            player_id: self.player_id,
            gamemode: self.gamemode.clone(),
            skill1_name: s1.name.clone(),
            skill1_score: s1.score,
            skill1_tier: s1.tier,
            skill2_name: s2.name.clone(),
            skill2_score: s2.score,
            skill2_tier: s2.tier,
            skill3_name: s3.name.clone(),
            skill3_score: s3.score,
            skill3_tier: s3.tier,
            skill4_name: s4.name.clone(),
            skill4_score: s4.score,
            skill4_tier: s4.tier,
            pvp_score: s1.score,
            pvp_tier: s1.tier,
            clutching_score: s2.score,
            clutching_tier: s2.tier,
            block_placement_score: s3.score,
            block_placement_tier: s3.tier,
            gamesense_score: s4.score,
            gamesense_tier: s4.tier,
            overall_tier: self.overall_tier,
            average_score: round_one_decimal(self.average()),
            comment: self.comment.clone(),
            evaluator_name: self.evaluator_name.clone(),
            global_rank: self.global_rank,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Stable machine-readable shape of a record. The pvp/clutching/
/// block_placement/gamesense fields mirror slots 1-4 positionally and are
/// never stored on their own.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub player_id: i64,
    pub gamemode: String,
    pub skill1_name: String,
    pub skill1_score: i32,
    pub skill1_tier: Tier,
    pub skill2_name: String,
    pub skill2_score: i32,
    pub skill2_tier: Tier,
    pub skill3_name: String,
    pub skill3_score: i32,
    pub skill3_tier: Tier,
    pub skill4_name: String,
    pub skill4_score: i32,
    pub skill4_tier: Tier,
    pub pvp_score: i32,
    pub pvp_tier: Tier,
    pub clutching_score: i32,
    pub clutching_tier: Tier,
    pub block_placement_score: i32,
    pub block_placement_tier: Tier,
    pub gamesense_score: i32,
    pub gamesense_tier: Tier,
    pub overall_tier: Tier,
    pub average_score: f64,
    pub comment: String,
    pub evaluator_name: String,
    pub global_rank: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(names: SkillNames) -> EvaluationRecord {
        EvaluationRecord::new(7, "bedwars", names, 25, "Elite Squad", Utc::now().naive_utc())
    }

    #[test]
    fn test_new_record_defaults_to_floor() {
        let record = sample(default_skill_names());
        assert_eq!(record.scores(), [25; 4]);
        assert!(record.skills.iter().all(|s| s.tier == Tier::D));
        assert_eq!(record.overall_tier, Tier::D);
        assert_eq!(record.global_rank, None);
    }

    #[test]
    fn test_set_clamps_and_derives_tier() {
        let mut record = sample(default_skill_names());
        record.skills[0].set(150, None);
        record.skills[1].set(-4, None);
        assert_eq!(record.skills[0].score, 100);
        assert_eq!(record.skills[0].tier, Tier::SPlus);
        assert_eq!(record.skills[1].score, 0);
        assert_eq!(record.skills[1].tier, Tier::D);
    }

    #[test]
    fn test_explicit_tier_wins_over_score() {
        let mut record = sample(default_skill_names());
        record.skills[2].set(40, Some(Tier::A));
        assert_eq!(record.skills[2].tier, Tier::A);
    }

    #[test]
    fn test_overall_tier_uses_unrounded_mean() {
        let mut record = sample(default_skill_names());
        for (slot, score) in record.skills.iter_mut().zip([75, 75, 75, 74]) {
            slot.set(score, None);
        }
        record.recompute_overall_tier();
        assert_eq!(record.average(), 74.75);
        assert_eq!(record.overall_tier, Tier::B);
    }

    #[test]
    fn test_apply_imported_matches_case_insensitively() {
        let mut record = sample(default_skill_names());
        let mut scores = BTreeMap::new();
        scores.insert("block placement".to_string(), 88);
        scores.insert("unknown".to_string(), 50);

        let applied = record.apply_imported(&scores);

        assert_eq!(applied, vec!["block placement".to_string()]);
        assert_eq!(record.skills[2].score, 88);
        assert_eq!(record.skills[2].tier, Tier::APlus);
        assert_eq!(record.skills[0].score, 25);
    }

    #[test]
    fn test_view_mirrors_slots_into_legacy_fields() {
        let names = ["Aim", "Survival", "Movement", "Spacing"].map(String::from);
        let mut record = sample(names);
        record.gamemode = "kitpvp".to_string();
        record.skills[0].set(91, None);
        record.skills[3].set(66, None);

        let view = record.view();

        assert_eq!(view.skill1_name, "Aim");
        assert_eq!(view.pvp_score, view.skill1_score);
        assert_eq!(view.pvp_tier, Tier::S);
        assert_eq!(view.gamesense_score, 66);
        assert_eq!(view.gamesense_tier, view.skill4_tier);
        assert_eq!(view.clutching_score, view.skill2_score);
        assert_eq!(view.block_placement_tier, view.skill3_tier);
    }

    #[test]
    fn test_view_serializes_tier_labels() {
        let mut record = sample(default_skill_names());
        record.skills[0].set(96, None);
        let json = serde_json::to_value(record.view()).unwrap();
        assert_eq!(json["skill1_tier"], "S+");
        assert_eq!(json["pvp_tier"], "S+");
        assert_eq!(json["overall_tier"], "D");
        assert_eq!(json["average_score"], 42.8);
    }
}
