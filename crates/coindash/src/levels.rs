//! Built-in level layouts
//!
//! Geometry is authored directly in code: layers of static rectangles
//! plus the spawn list. Ground and bounding walls are derived from the
//! configured playfield size; platforms use absolute coordinates.

use platform_engine::prelude::*;

const GROUND_THICKNESS: f32 = 32.0;
const WALL_THICKNESS: f32 = 16.0;

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
    Rect::new(x, y, w, h)
}

fn spawn(kind: EntityType, x: f32, y: f32) -> SpawnDescriptor {
    SpawnDescriptor {
        kind,
        position: Vec2::new(x, y),
        patrol: None,
        respawn_delay: None,
    }
}

fn walls(config: &SimConfig) -> Vec<Rect> {
    vec![
        rect(-WALL_THICKNESS, 0.0, WALL_THICKNESS, config.screen_height),
        rect(config.screen_width, 0.0, WALL_THICKNESS, config.screen_height),
    ]
}

fn first_level(config: &SimConfig) -> LevelData {
    let ground_top = config.screen_height - GROUND_THICKNESS;
    let mut solid = walls(config);
    solid.push(rect(0.0, ground_top, config.screen_width, GROUND_THICKNESS));
    solid.push(rect(96.0, 256.0, 128.0, 16.0));
    solid.push(rect(416.0, 256.0, 128.0, 16.0));

    let mut level = LevelData::default();
    level.obstacles.insert("solid".into(), solid);
    level
        .obstacles
        .insert(FLOAT_LAYER.into(), vec![rect(256.0, 192.0, 128.0, 16.0)]);

    level.spawns = vec![
        spawn(EntityType::Player, 48.0, 200.0),
        spawn(EntityType::Coin, 144.0, 224.0),
        spawn(EntityType::Coin, 464.0, 224.0),
        spawn(EntityType::Coin, 304.0, 160.0),
        SpawnDescriptor {
            kind: EntityType::RegularEnemy,
            position: Vec2::new(320.0, ground_top - 32.0),
            patrol: Some(PatrolRange {
                left: 96.0,
                right: 96.0,
            }),
            respawn_delay: None,
        },
        spawn(EntityType::PortalToNextLevel, 600.0, ground_top - 32.0),
    ];
    level
}

fn second_level(config: &SimConfig) -> LevelData {
    let ground_top = config.screen_height - GROUND_THICKNESS;
    let mut solid = walls(config);
    // Ground with a pit in the middle.
    solid.push(rect(0.0, ground_top, 256.0, GROUND_THICKNESS));
    solid.push(rect(384.0, ground_top, 256.0, GROUND_THICKNESS));
    // Stepped climb toward the portal.
    solid.push(rect(448.0, 272.0, 96.0, 16.0));
    solid.push(rect(320.0, 208.0, 96.0, 16.0));
    solid.push(rect(192.0, 144.0, 96.0, 16.0));

    let mut level = LevelData::default();
    level.obstacles.insert("solid".into(), solid);
    level
        .obstacles
        .insert(FLOAT_LAYER.into(), vec![rect(64.0, 208.0, 96.0, 16.0)]);

    level.spawns = vec![
        spawn(EntityType::Player, 32.0, 200.0),
        spawn(EntityType::Coin, 96.0, 176.0),
        spawn(EntityType::Coin, 352.0, 176.0),
        spawn(EntityType::Coin, 224.0, 112.0),
        SpawnDescriptor {
            kind: EntityType::RegularEnemy,
            position: Vec2::new(480.0, ground_top - 32.0),
            patrol: Some(PatrolRange {
                left: 64.0,
                right: 96.0,
            }),
            respawn_delay: Some(3.0),
        },
        spawn(EntityType::PortalToNextLevel, 232.0, 112.0),
    ];
    level
}

/// The game's fixed level sequence
pub fn builtin(config: &SimConfig) -> StaticLevels {
    StaticLevels::new(vec![first_level(config), second_level(config)])
}
