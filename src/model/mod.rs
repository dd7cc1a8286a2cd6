// MODEL: voxel data, terrain and the streamed world
pub mod world;
pub mod world_index;
pub mod raycast;

pub use world::{Block, Chunk, CHUNK_SIZE, WORLD_HEIGHT};
pub use world_index::{StreamingReport, World, WorldStats};
pub use raycast::Selection;
