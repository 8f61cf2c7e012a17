use crate::ascend::record::{SkillNames, DEFAULT_SKILL_NAMES};

/// Built-in game mode and the four skills evaluators grade in it.
#[derive(Debug, Clone)]
pub struct GameModeConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    pub skills: [&'static str; 4],
}

impl GameModeConfig {
    pub fn new(name: &'static str, display_name: &'static str, skills: [&'static str; 4]) -> Self {
        Self {
            name,
            display_name,
            skills,
        }
    }

    pub fn skill_names(&self) -> SkillNames {
        self.skills.map(String::from)
    }
}

/// Catalogue seeded into the `game_modes` table by `setup`
pub fn get_game_modes() -> Vec<GameModeConfig> {
    vec![
        GameModeConfig::new("bedwars", "BedWars", DEFAULT_SKILL_NAMES),
        GameModeConfig::new("kitpvp", "KitPvP", ["Aim", "Survival", "Movement", "Spacing"]),
        GameModeConfig::new("skywars", "SkyWars", ["Scouting", "Potions", "Void Play", "Combat"]),
        GameModeConfig::new("bridgefight", "Bridge Fight", ["Building", "Bridging", "Gamesense", "PVP"]),
        GameModeConfig::new("sumo", "Sumo", ["Gamesense", "Knockback", "Mechanics", "Movement"]),
        GameModeConfig::new("fireball_fight", "Fireball Fight", ["Defense", "Fireballs", "Gamesense", "PVP"]),
        GameModeConfig::new("bridge", "The Bridge", ["Speed", "Defense", "Gamesense", "PVP"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bedwars_uses_default_skill_set() {
        let modes = get_game_modes();
        let bedwars = modes.iter().find(|m| m.name == "bedwars").unwrap();
        assert_eq!(bedwars.skills, DEFAULT_SKILL_NAMES);
    }

    #[test]
    fn test_skill_names_unique_within_each_mode() {
        for mode in get_game_modes() {
            let mut lowered: Vec<String> = mode.skills.iter().map(|s| s.to_lowercase()).collect();
            lowered.sort();
            lowered.dedup();
            assert_eq!(lowered.len(), 4, "duplicate skill in {}", mode.name);
        }
    }
}
