use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter-grade band, declared lowest first so the derived ordering
/// matches the band index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "S+")]
    SPlus,
}

/// Inclusive lower bounds, highest band first.
const BANDS: [(f64, Tier); 8] = [
    (95.0, Tier::SPlus),
    (90.0, Tier::S),
    (85.0, Tier::APlus),
    (80.0, Tier::A),
    (75.0, Tier::BPlus),
    (70.0, Tier::B),
    (65.0, Tier::CPlus),
    (60.0, Tier::C),
];

/// Classify a score. Fractional averages are accepted as-is; callers must
/// not round before classifying.
pub fn tier_for(score: f64) -> Tier {
    BANDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::D)
}

impl Tier {
    pub const ALL: [Tier; 9] = [
        Tier::D,
        Tier::C,
        Tier::CPlus,
        Tier::B,
        Tier::BPlus,
        Tier::A,
        Tier::APlus,
        Tier::S,
        Tier::SPlus,
    ];

    pub fn from_score(score: i32) -> Self {
        tier_for(score as f64)
    }

    /// Position in the band table, D = 0 up to S+ = 8.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::SPlus => "S+",
            Tier::S => "S",
            Tier::APlus => "A+",
            Tier::A => "A",
            Tier::BPlus => "B+",
            Tier::B => "B",
            Tier::CPlus => "C+",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        Tier::ALL
            .iter()
            .find(|tier| tier.as_str() == label)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown tier label: {}", s))
    }
}

impl rusqlite::types::ToSql for Tier {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
    }
}

impl rusqlite::types::FromSql for Tier {
    fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
        let label = value.as_str()?;
        label
            .parse()
            .map_err(|e: anyhow::Error| rusqlite::types::FromSqlError::Other(e.into()))
    }
}
