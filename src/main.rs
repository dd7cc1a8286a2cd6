use glam::Vec3;

use woxel_world::{logging, BlockEditor, EditAction, World, WorldConfig};

/// Path of an optional TOML config file
const CONFIG_ENV: &str = "WOXEL_CONFIG";

fn load_config() -> WorldConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return WorldConfig::default();
    };

    match WorldConfig::load(&path) {
        Ok(config) => {
            tracing::info!(%path, "loaded world config");
            config
        }
        Err(err) => {
            tracing::warn!(%path, %err, "falling back to default world config");
            WorldConfig::default()
        }
    }
}

fn main() {
    logging::init();

    let config = load_config();
    tracing::info!(
        seed = config.seed,
        render_distance = config.render_distance,
        reach = config.reach,
        "starting headless world"
    );

    let mut world = match World::new(config) {
        Ok(world) => world,
        Err(err) => {
            tracing::error!(%err, "cannot build world");
            return;
        }
    };
    let mut editor = BlockEditor::new();

    // walk east along z = 8, one chunk per step, looking straight down
    for step in 0..8 {
        let eye = Vec3::new(8.0 + step as f32 * 16.0, 0.0, 8.0);
        world.update(eye);

        // stand two blocks above the terrain at this column
        let surface = world.raycast(Vec3::new(eye.x, 63.5, eye.z), Vec3::NEG_Y, 64.0);
        let Some(surface) = surface else {
            tracing::warn!(x = eye.x, z = eye.z, "no ground below the observer");
            continue;
        };
        let eye = Vec3::new(eye.x, surface.coord.1 as f32 + 2.5, eye.z);

        match step % 3 {
            0 => {
                if let Some(coord) = editor.apply(&mut world, eye, Vec3::NEG_Y, EditAction::Break) {
                    tracing::info!(step, ?coord, "dug");
                }
            }
            1 => {
                if let Some(coord) = editor.apply(&mut world, eye, Vec3::NEG_Y, EditAction::Place) {
                    tracing::info!(step, ?coord, block = editor.selected.name(), "built");
                }
                editor.cycle_selected(true);
            }
            _ => {}
        }

        let stats = world.stats();
        tracing::info!(
            step,
            chunk = ?world.observer_chunk(),
            loaded = stats.loaded_chunks,
            faces = stats.total_faces,
            batches = stats.total_batches,
            "world stats"
        );
    }
}
