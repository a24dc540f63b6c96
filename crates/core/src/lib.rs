pub mod config;
pub mod content;
pub mod game;
pub mod mapgen;
pub mod motion;
pub mod pursuit;
pub mod rng;
pub mod spatial;
pub mod state;
pub mod tuning;
pub mod types;

pub use config::{ConfigError, SessionConfig};
pub use game::{Game, GameSnapshot, SessionSummary, ShopError};
pub use mapgen::{GeneratedMap, MapGenerator, StaffRoom, TileGrid, generate_map};
pub use rng::SimRng;
pub use state::GameState;
pub use types::*;
