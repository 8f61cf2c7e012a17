pub mod game_modes;
pub mod settings;
