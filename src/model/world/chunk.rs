use glam::Vec3;

use super::block::Block;
use super::face::Face;
use super::material::MaterialProvider;
use super::mesh::ChunkMesh;
use super::terrain::TerrainGenerator;
use crate::utils::{BlockCoord, ChunkCoord, WorldCoord};

pub const CHUNK_SIZE: usize = 16;
pub const WORLD_HEIGHT: usize = 64;
const N_BLOCKS_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE * WORLD_HEIGHT;

/// Read access to blocks by world coordinate, used for faces on the chunk border.
pub trait BlockLookup {
    fn block_at(&self, coord: &WorldCoord) -> Block;
}

/// One column of `CHUNK_SIZE x WORLD_HEIGHT x CHUNK_SIZE` blocks and its geometry.
///
/// The mesh is derived data. Every mutating call that goes through `set_voxel`
/// rebuilds it before returning; `write_block` leaves that to the caller.
#[derive(Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Box<[Block]>,

    mesh: Option<ChunkMesh>,
    /// bumped on every mesh rebuild
    mesh_revision: u64,

    // tracks number of blocks that are Block::Empty
    n_empty_blocks: usize,
    disposed: bool,
}

impl Chunk {
    /// creates a new empty chunk
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![Block::Empty; N_BLOCKS_PER_CHUNK].into_boxed_slice(),
            mesh: None,
            mesh_revision: 0,
            n_empty_blocks: N_BLOCKS_PER_CHUNK,
            disposed: false,
        }
    }

    /// creates a chunk filled with generated terrain (no mesh yet)
    pub fn generated(coord: ChunkCoord, terrain: &TerrainGenerator) -> Self {
        let mut chunk = Self::new(coord);
        chunk.generate(terrain);
        chunk
    }

    pub fn generate(&mut self, terrain: &TerrainGenerator) {
        terrain.populate_chunk(self);
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn is_empty(&self) -> bool {
        self.n_empty_blocks == N_BLOCKS_PER_CHUNK
    }

    pub(crate) fn get_block(&self, coord: &BlockCoord) -> Block {
        self.blocks[coord.get_block_idx()]
    }

    /// Bounds-checked read; anything outside the chunk is air.
    pub fn get_voxel(&self, x: isize, y: isize, z: isize) -> Block {
        BlockCoord::checked(x, y, z)
            .map(|coord| self.get_block(&coord))
            .unwrap_or(Block::Empty)
    }

    /// Store a block without touching the mesh.
    pub(crate) fn write_block(&mut self, coord: &BlockCoord, new: Block) {
        let target = &mut self.blocks[coord.get_block_idx()];

        // keep track of empty blocks count
        if target.is_empty() && !new.is_empty() {
            self.n_empty_blocks -= 1;
        } else if !target.is_empty() && new.is_empty() {
            self.n_empty_blocks += 1;
        }

        *target = new;
    }

    /// Bounds-checked write followed by a full mesh rebuild.
    /// Out-of-range writes change nothing and return `false`.
    pub fn set_voxel(
        &mut self,
        x: isize,
        y: isize,
        z: isize,
        block: Block,
        world: Option<&dyn BlockLookup>,
        materials: &dyn MaterialProvider,
    ) -> bool {
        let Some(coord) = BlockCoord::checked(x, y, z) else {
            return false;
        };
        self.write_block(&coord, block);
        self.build_mesh(world, materials);
        true
    }

    /// Whether the `face` of the block at `coord` is visible.
    ///
    /// Neighbours outside this chunk are read through `world`; without one the
    /// face is kept.
    pub fn is_face_visible(&self, coord: &BlockCoord, face: Face, world: Option<&dyn BlockLookup>) -> bool {
        let block = self.get_block(coord);
        let offset = face.offset();
        let (nx, ny, nz) = (
            coord.0 as isize + offset.x as isize,
            coord.1 as isize + offset.y as isize,
            coord.2 as isize + offset.z as isize,
        );

        let neighbor = match BlockCoord::checked(nx, ny, nz) {
            Some(local) => self.get_block(&local),
            None => match world {
                Some(world) => {
                    let base = self.coord.to_world_coord();
                    world.block_at(&WorldCoord(base.0 + nx, ny, base.2 + nz))
                }
                None => return !block.is_empty(),
            },
        };

        block.shows_face_towards(neighbor)
    }

    /// Build the geometry for the current blocks without storing it.
    pub fn compute_mesh(&self, world: Option<&dyn BlockLookup>, materials: &dyn MaterialProvider) -> ChunkMesh {
        let mut mesh = ChunkMesh::empty(self.coord);
        if self.is_empty() {
            return mesh;
        }

        for z in 0..CHUNK_SIZE {
            for y in 0..WORLD_HEIGHT {
                for x in 0..CHUNK_SIZE {
                    let coord = BlockCoord(x, y, z);
                    let block = self.get_block(&coord);
                    if block.is_empty() {
                        continue;
                    }

                    let pos = Vec3::new(x as f32, y as f32, z as f32);
                    for face in Face::ALL {
                        if self.is_face_visible(&coord, face, world) {
                            mesh.push_face(block, face, pos, materials);
                        }
                    }
                }
            }
        }
        mesh
    }

    /// Discard the current geometry and replace it with `mesh`.
    pub fn replace_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
        self.mesh_revision += 1;
        self.disposed = false;
    }

    pub fn build_mesh(&mut self, world: Option<&dyn BlockLookup>, materials: &dyn MaterialProvider) {
        let mesh = self.compute_mesh(world, materials);
        self.replace_mesh(mesh);
    }

    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    pub fn face_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, ChunkMesh::face_count)
    }

    /// Release the geometry. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.mesh = None;
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Raw voxel data, one byte per block
    pub fn voxel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks[..])
    }
}
