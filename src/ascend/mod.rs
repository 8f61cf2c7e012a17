pub mod history;
pub mod import;
pub mod ranking;
pub mod record;
pub mod tier;

pub use history::{ChangeType, HistoryEntry, NewHistoryEntry, PendingHistory};
pub use import::parse_import;
pub use ranking::{average_score, global_rank, standings};
pub use record::{EvaluationRecord, EvaluationView, SkillNames, SkillSlot, DEFAULT_SKILL_NAMES, SKILL_COUNT};
pub use tier::{tier_for, Tier};
