// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;
pub mod utils;

// Model / controller split as in the engine
pub mod model;
pub mod controller;

pub use config::{ConfigError, TerrainConfig, WorldConfig};
pub use controller::{BlockEditor, EditAction};
pub use model::{Block, Chunk, Selection, StreamingReport, World, WorldStats, CHUNK_SIZE, WORLD_HEIGHT};
pub use utils::{BlockCoord, ChunkCoord, WorldCoord};
