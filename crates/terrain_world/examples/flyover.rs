//! Headless flyover: streams terrain along a straight path and prints the
//! residency stats after each boundary crossing.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example flyover
//! ```

use glam::{Vec2, Vec3};
use terrain_world::{ConfigError, MesherKind, NullScene, TerrainConfig, TerrainWorld};

fn main() -> Result<(), ConfigError> {
  env_logger::init();

  let config = TerrainConfig {
    mesher: MesherKind::Adaptive,
    fractal: true,
    ..Default::default()
  };
  let chunk = config.chunk_world_size();
  let mut world = TerrainWorld::new(config, 1337)?;
  let mut scene = NullScene;

  for step in 0..12 {
    let player = Vec2::new(step as f32 * chunk * 0.75, step as f32 * chunk * 0.25);
    let camera = Vec3::new(player.x, player.y - 60.0, 120.0);
    world.update(&mut scene, player, Some(camera));

    let stats = world.stats();
    let height = world.height_at(player).unwrap_or(0.0);
    println!(
      "step {step:2}: player ({:7.1}, {:7.1})  height {height:6.2}  {} chunks, {} vertices",
      player.x, player.y, stats.loaded_chunks, stats.total_vertices
    );
  }

  world.dispose(&mut scene);
  Ok(())
}
