use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ascend::import::score_from_value;
use crate::ascend::{EvaluationView, HistoryEntry, Tier};
use crate::database::GameMode;
use crate::services::ascend::{EvaluationInput, LeaderboardEntry};

#[derive(Deserialize, Default)]
pub struct ModeParams {
    pub gamemode: Option<String>,
    pub limit: Option<String>,
}

impl ModeParams {
    /// Unparseable limits fall back to the default. Negative limits count
    /// as zero and are clamped up by the service.
    pub fn limit(&self) -> Option<usize> {
        let limit: i64 = self.limit.as_deref()?.trim().parse().ok()?;
        Some(limit.max(0) as usize)
    }
}

/// Body of a manual evaluation. Every field is loosely typed so a single
/// malformed value falls back to its default instead of rejecting the request.
#[derive(Deserialize, Default)]
pub struct SaveEvaluationRequest {
    pub gamemode: Option<Value>,
    pub skill1_score: Option<Value>,
    pub skill2_score: Option<Value>,
    pub skill3_score: Option<Value>,
    pub skill4_score: Option<Value>,
    pub skill1_tier: Option<Value>,
    pub skill2_tier: Option<Value>,
    pub skill3_tier: Option<Value>,
    pub skill4_tier: Option<Value>,
    pub overall_tier: Option<Value>,
    pub comment: Option<Value>,
    pub evaluator_name: Option<Value>,
}

impl SaveEvaluationRequest {
    pub fn gamemode(&self) -> Option<String> {
        text_field(&self.gamemode)
    }

    pub fn to_input(&self) -> EvaluationInput {
        let scores = [
            &self.skill1_score,
            &self.skill2_score,
            &self.skill3_score,
            &self.skill4_score,
        ];
        let tiers = [
            &self.skill1_tier,
            &self.skill2_tier,
            &self.skill3_tier,
            &self.skill4_tier,
        ];

        EvaluationInput {
            scores: scores.map(|v| v.as_ref().and_then(score_from_value)),
            tiers: tiers.map(tier_field),
            overall_tier: tier_field(&self.overall_tier),
            comment: text_field(&self.comment),
            evaluator_name: text_field(&self.evaluator_name),
        }
    }
}

fn tier_field(value: &Option<Value>) -> Option<Tier> {
    value.as_ref()?.as_str()?.parse().ok()
}

fn text_field(value: &Option<Value>) -> Option<String> {
    value.as_ref()?.as_str().map(String::from)
}

#[derive(Deserialize, Default)]
pub struct ImportRequest {
    #[serde(default)]
    pub import_data: Value,
    pub gamemode: Option<Value>,
    pub evaluator_name: Option<Value>,
    pub comment: Option<Value>,
}

impl ImportRequest {
    pub fn gamemode(&self) -> Option<String> {
        text_field(&self.gamemode)
    }

    pub fn evaluator_name(&self) -> Option<String> {
        text_field(&self.evaluator_name)
    }

    pub fn comment(&self) -> Option<String> {
        text_field(&self.comment)
    }
}

#[derive(Serialize)]
pub struct AscendResponse {
    pub success: bool,
    pub ascend: EvaluationView,
}

impl AscendResponse {
    pub fn new(ascend: EvaluationView) -> Self {
        Self {
            success: true,
            ascend,
        }
    }
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub ascend: EvaluationView,
    pub imported_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub success: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub gamemode: String,
}

#[derive(Serialize)]
pub struct GameModesResponse {
    pub success: bool,
    pub gamemodes: Vec<GameMode>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
