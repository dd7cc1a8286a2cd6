use glam::{IVec3, Vec3};

use crate::model::world::Block;
use crate::utils::WorldCoord;

/// Distance between two samples along the ray
pub const RAY_STEP: f32 = 0.1;

/// Block hit by a ray: where, which side, and what it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub coord: WorldCoord,
    /// outward normal of the face the ray entered through
    pub normal: IVec3,
    pub block: Block,
}

impl Selection {
    /// The block in front of the hit face, where a placed block goes
    pub fn adjacent(&self) -> WorldCoord {
        self.coord.offset(self.normal.x as isize, self.normal.y as isize, self.normal.z as isize)
    }
}

/// Fixed-step ray march to find the first non-air block.
/// Returns None if nothing is hit within max_distance.
///
/// Sample positions are origin + dir * (i * RAY_STEP) for i = 1..=n; the block
/// containing the origin itself is never reported.
pub fn raycast<F>(origin: Vec3, direction: Vec3, max_distance: f32, block_at: F) -> Option<Selection>
where
    F: Fn(&WorldCoord) -> Block,
{
    let dir = direction.try_normalize()?;
    if !origin.is_finite() || !max_distance.is_finite() || max_distance <= 0.0 {
        return None;
    }

    let steps = (max_distance / RAY_STEP + 1e-4).floor() as usize;
    let mut previous = WorldCoord::from_position(origin);

    for i in 1..=steps {
        let pos = origin + dir * (i as f32 * RAY_STEP);
        let coord = WorldCoord::from_position(pos);

        // still inside the block of the previous sample, which was air
        if coord == previous {
            continue;
        }

        let block = block_at(&coord);
        if !block.is_empty() {
            let normal = face_normal(&previous, &coord, dir);
            tracing::trace!(?coord, ?normal, block = block.name(), "ray hit");
            return Some(Selection { coord, normal, block });
        }

        previous = coord;
    }

    None
}

/// Normal of the face between the last air sample and the hit block.
///
/// If the step crossed more than one axis at once (edges and corners), only the
/// axis along which the ray travels fastest is kept, X before Y before Z on ties.
pub fn face_normal(previous: &WorldCoord, hit: &WorldCoord, dir: Vec3) -> IVec3 {
    let diff = [previous.0 - hit.0, previous.1 - hit.1, previous.2 - hit.2];
    let speed = dir.abs().to_array();

    let mut axis = None;
    for i in 0..3 {
        if diff[i] == 0 {
            continue;
        }
        match axis {
            Some(best) if speed[best] >= speed[i] => {}
            _ => axis = Some(i),
        }
    }

    let mut normal = IVec3::ZERO;
    if let Some(i) = axis {
        normal[i] = diff[i].signum() as i32;
    }
    normal
}
