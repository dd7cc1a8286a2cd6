use glam::Vec3;

use crate::model::raycast::Selection;
use crate::model::world::Block;
use crate::model::World;
use crate::utils::WorldCoord;

/// Blocks the player can cycle through, in wheel order
pub const PLACEABLE: [Block; 11] = [
    Block::Grass,
    Block::Dirt,
    Block::Stone,
    Block::Sand,
    Block::Cobblestone,
    Block::Brick,
    Block::Planks,
    Block::Wood,
    Block::Leaves,
    Block::Glass,
    Block::Water,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// remove the targeted block
    Break,
    /// put the selected block in front of the targeted face
    Place,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEditor {
    pub selected: Block,
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self { selected: Block::Grass }
    }
}

impl BlockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, block: Block) {
        self.selected = block;
    }

    pub fn cycle_selected(&mut self, forward: bool) {
        let current_idx = PLACEABLE.iter().position(|&b| b == self.selected).unwrap_or(0);
        let next_idx = if forward {
            (current_idx + 1) % PLACEABLE.len()
        } else {
            (current_idx + PLACEABLE.len() - 1) % PLACEABLE.len()
        };
        self.selected = PLACEABLE[next_idx];
    }

    /// Remove the targeted block. Bedrock stays.
    pub fn break_block(&self, world: &mut World, target: &Selection) -> Option<WorldCoord> {
        if target.block == Block::Bedrock {
            tracing::debug!(coord = ?target.coord, "refusing to break bedrock");
            return None;
        }

        if world.set_block(&target.coord, Block::Empty) {
            tracing::info!(coord = ?target.coord, block = target.block.name(), "removed block");
            Some(target.coord)
        } else {
            None
        }
    }

    /// Place the selected block against the targeted face, only into air.
    pub fn place_block(&self, world: &mut World, target: &Selection) -> Option<WorldCoord> {
        let coord = target.adjacent();
        if !coord.is_within_height() || !world.get_block(&coord).is_empty() {
            return None;
        }

        if world.set_block(&coord, self.selected) {
            tracing::info!(?coord, block = self.selected.name(), "placed block");
            Some(coord)
        } else {
            None
        }
    }

    /// Cast a ray of the configured reach and apply `action` to whatever it hits.
    /// Returns the coordinate that changed.
    pub fn apply(&self, world: &mut World, origin: Vec3, direction: Vec3, action: EditAction) -> Option<WorldCoord> {
        let reach = world.config().reach;
        let target = world.raycast(origin, direction, reach)?;

        match action {
            EditAction::Break => self.break_block(world, &target),
            EditAction::Place => self.place_block(world, &target),
        }
    }
}
