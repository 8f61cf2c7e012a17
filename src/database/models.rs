use chrono::NaiveDateTime;
use serde::Serialize;

use crate::ascend::SkillNames;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: i64,
    pub nickname: String,
    pub level: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameMode {
    pub name: String,
    pub display_name: String,
    pub skill1_name: String,
    pub skill2_name: String,
    pub skill3_name: String,
    pub skill4_name: String,
    pub is_active: bool,
}

impl GameMode {
    pub fn skill_names(&self) -> SkillNames {
        [
            self.skill1_name.clone(),
            self.skill2_name.clone(),
            self.skill3_name.clone(),
            self.skill4_name.clone(),
        ]
    }
}
