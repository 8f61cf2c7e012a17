#[derive(Debug, Clone)]
pub struct AscendSettings {
    pub default_score: i32,
    pub default_game_mode: &'static str,
    pub history_default_limit: usize,
    pub history_max_limit: usize,
    pub leaderboard_default_limit: usize,
    pub leaderboard_max_limit: usize,
    pub default_evaluator: &'static str,
    pub import_evaluator: &'static str,
    pub import_comment: &'static str,
}

impl Default for AscendSettings {
    fn default() -> Self {
        Self {
            default_score: 25, // lands in tier D
            default_game_mode: "bedwars",
            history_default_limit: 20,
            history_max_limit: 100,
            leaderboard_default_limit: 50,
            leaderboard_max_limit: 100,
            default_evaluator: "Elite Squad",
            import_evaluator: "Elite Squad AI (Import)",
            import_comment: "Imported data",
        }
    }
}

impl AscendSettings {
    pub fn history_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.history_default_limit)
            .clamp(1, self.history_max_limit)
    }

    pub fn leaderboard_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.leaderboard_default_limit)
            .clamp(1, self.leaderboard_max_limit)
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
    pub admin_token: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "elite_squad.db".to_string()),
            admin_token: std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "secret".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ascend: AscendSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ascend: AscendSettings::default(),
            server: ServerSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_clamped() {
        let settings = AscendSettings::default();
        assert_eq!(settings.history_limit(None), 20);
        assert_eq!(settings.history_limit(Some(0)), 1);
        assert_eq!(settings.history_limit(Some(500)), 100);
        assert_eq!(settings.history_limit(Some(7)), 7);
    }

    #[test]
    fn test_leaderboard_limit_clamped() {
        let settings = AscendSettings::default();
        assert_eq!(settings.leaderboard_limit(None), 50);
        assert_eq!(settings.leaderboard_limit(Some(1000)), 100);
    }
}
