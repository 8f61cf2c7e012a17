pub mod connection;
pub mod evaluations;
pub mod game_modes;
pub mod history;
pub mod models;
pub mod players;
pub mod setup;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
