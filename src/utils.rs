use crate::model::world::{CHUNK_SIZE, WORLD_HEIGHT};
use bytemuck::NoUninit;
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// coordinates of a block in world space
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy, PartialOrd, Ord)]
pub struct WorldCoord(pub isize, pub isize, pub isize);

impl WorldCoord {
    /// The block containing a (possibly fractional) world position.
    pub fn from_position(pos: Vec3) -> Self {
        WorldCoord(
            pos.x.floor() as isize,
            pos.y.floor() as isize,
            pos.z.floor() as isize,
        )
    }

    pub fn offset(&self, dx: isize, dy: isize, dz: isize) -> Self {
        WorldCoord(self.0 + dx, self.1 + dy, self.2 + dz)
    }

    pub fn is_within_height(&self) -> bool {
        (0..WORLD_HEIGHT as isize).contains(&self.1)
    }

    /// Convert to the column containing this block (floored, so negative coordinates work)
    pub fn to_chunk_coord(&self) -> ChunkCoord {
        ChunkCoord(
            self.0.div_euclid(CHUNK_SIZE as isize),
            self.2.div_euclid(CHUNK_SIZE as isize),
        )
    }

    /// Convert to chunk-local coordinates, or `None` if `y` is outside the world height
    pub fn to_block_coord(&self) -> Option<BlockCoord> {
        if !self.is_within_height() {
            return None;
        }
        Some(BlockCoord(
            self.0.rem_euclid(CHUNK_SIZE as isize) as usize,
            self.1 as usize,
            self.2.rem_euclid(CHUNK_SIZE as isize) as usize,
        ))
    }
}

/// coordinates of a column in chunk space (x, z)
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy, PartialOrd, Ord)]
pub struct ChunkCoord(pub isize, pub isize);

impl ChunkCoord {
    /// World coordinate of the column's (0, 0, 0) corner
    pub fn to_world_coord(&self) -> WorldCoord {
        WorldCoord(self.0 * CHUNK_SIZE as isize, 0, self.1 * CHUNK_SIZE as isize)
    }

    /// Recompose a world coordinate from this column and a local block coordinate
    pub fn block_to_world(&self, block: &BlockCoord) -> WorldCoord {
        let base = self.to_world_coord();
        WorldCoord(
            base.0 + block.0 as isize,
            block.1 as isize,
            base.2 + block.2 as isize,
        )
    }

    pub fn offset(&self, dx: isize, dz: isize) -> Self {
        ChunkCoord(self.0 + dx, self.1 + dz)
    }

    /// Chebyshev distance in chunk units
    pub fn chebyshev_distance(&self, other: &ChunkCoord) -> isize {
        (self.0 - other.0).abs().max((self.1 - other.1).abs())
    }

    /// The four horizontally adjacent columns
    pub fn neighbors(&self) -> [ChunkCoord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

/// Chunk-local block coordinates (x, z in 0..CHUNK_SIZE, y in 0..WORLD_HEIGHT)
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BlockCoord(pub usize, pub usize, pub usize);

impl BlockCoord {
    /// Local coordinate from signed components, `None` when outside the chunk
    pub fn checked(x: isize, y: isize, z: isize) -> Option<Self> {
        let in_range = |v: isize, max: usize| v >= 0 && (v as usize) < max;
        if in_range(x, CHUNK_SIZE) && in_range(y, WORLD_HEIGHT) && in_range(z, CHUNK_SIZE) {
            Some(BlockCoord(x as usize, y as usize, z as usize))
        } else {
            None
        }
    }

    pub fn get_block_idx(&self) -> usize {
        self.0 + self.1 * CHUNK_SIZE + self.2 * CHUNK_SIZE * WORLD_HEIGHT
    }

    /// True when the block touches one of the four vertical chunk walls
    pub fn is_on_chunk_edge(&self) -> bool {
        self.0 == 0 || self.0 == CHUNK_SIZE - 1 || self.2 == 0 || self.2 == CHUNK_SIZE - 1
    }
}
