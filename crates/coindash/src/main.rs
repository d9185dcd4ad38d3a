//! Coindash: a small coin-collecting platformer driving the simulation
//! core headlessly with a scripted input track. A renderer would replace
//! the [`NullSurface`] and the script with real devices; everything else
//! stays as-is.

mod factory;
mod levels;

use std::path::Path;

use platform_engine::foundation::logging;
use platform_engine::prelude::*;

const CONFIG_PATH: &str = "coindash.toml";
const FRAME: f32 = 1.0 / 60.0;
const DEMO_FRAMES: u32 = 1800;

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    let levels = levels::builtin(&config);
    let mut world = World::new(config, Box::new(levels), Box::new(factory::CoindashFactory))?;

    let mut surface = NullSurface;
    for frame in 0..DEMO_FRAMES {
        world.update(FRAME, scripted_input(frame))?;
        world.draw(&mut surface);

        if frame % 60 == 0 {
            report(&world, frame);
        }
    }
    Ok(())
}

fn load_config() -> SimConfig {
    if !Path::new(CONFIG_PATH).exists() {
        return SimConfig::default();
    }
    match SimConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to load {CONFIG_PATH}: {e}; using defaults");
            SimConfig::default()
        }
    }
}

// A fixed input track: drop in, run right, hop onto the ledges, double
// jump across the gap, then push on toward the portal.
fn scripted_input(frame: u32) -> InputIntents {
    let second = frame / 60;
    let jump = matches!(frame % 180, 30 | 90);
    match second {
        0..=1 => InputIntents::none(),
        2..=12 => InputIntents {
            right: true,
            jump,
            ..InputIntents::none()
        },
        13..=16 => InputIntents {
            left: true,
            ..InputIntents::none()
        },
        _ => InputIntents {
            right: true,
            jump,
            ..InputIntents::none()
        },
    }
}

fn report(world: &World, frame: u32) {
    let player = world.store().iter().find(|(_, entity)| {
        entity
            .entity_type
            .as_ref()
            .is_some_and(|t| t.kind() == EntityType::Player)
    });
    match player {
        Some((_, entity)) => {
            let position = entity
                .movement
                .as_ref()
                .map_or(Vec2::zeros(), |movement| movement.position);
            let state = entity.state.as_ref();
            log::info!(
                "t={}s level={} player=({:.1}, {:.1}) {:?}/{:?}",
                frame / 60,
                world.current_level().0,
                position.x,
                position.y,
                state.map(StateComponent::state),
                state.map(StateComponent::super_state),
            );
        }
        None => log::info!("t={}s level={} (no player)", frame / 60, world.current_level().0),
    }
}
