pub mod block;
pub mod chunk;
pub mod face;
pub mod material;
pub mod mesh;
pub mod noise;
pub mod terrain;

pub use block::Block;
pub use chunk::{BlockLookup, Chunk, CHUNK_SIZE, WORLD_HEIGHT};
pub use face::Face;
pub use material::{BlockPalette, FaceTexture, MaterialProvider};
pub use mesh::{BatchKey, ChunkMesh, FaceBatch};
pub use self::noise::{CoherentNoise, ConstantNoise, NoiseSource};
pub use terrain::TerrainGenerator;
