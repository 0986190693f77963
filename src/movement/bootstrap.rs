//! Movement domain: player spawn and the test room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{ActorBody, DEFAULT_BODY_SIZE, GameLayer, Ground, MovementState, Player};

pub(crate) fn spawn_player(mut commands: Commands) {
    let size = DEFAULT_BODY_SIZE;

    commands.spawn((
        // Identity & Movement
        (Player, ActorBody { size }, MovementState::default()),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 1.0),
        // Physics: positioned by the motor, the collider only makes it queryable
        (
            RigidBody::Kinematic,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));

    info!("Spawned player: body={:?}", size);
}

/// Solid block of the test room, as centre and size.
struct Block {
    center: Vec2,
    size: Vec2,
    color: Color,
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let blocks = [
        // Floor
        Block {
            center: Vec2::new(0.0, -0.5),
            size: Vec2::new(60.0, 1.0),
            color: ground_color,
        },
        // Left wall
        Block {
            center: Vec2::new(-30.5, 12.0),
            size: Vec2::new(1.0, 26.0),
            color: wall_color,
        },
        // Right wall
        Block {
            center: Vec2::new(30.5, 12.0),
            size: Vec2::new(1.0, 26.0),
            color: wall_color,
        },
        // Low ledge to clip a corner on
        Block {
            center: Vec2::new(-6.0, 4.5),
            size: Vec2::new(6.0, 1.0),
            color: platform_color,
        },
        // Stepping platforms
        Block {
            center: Vec2::new(8.0, 5.0),
            size: Vec2::new(5.0, 0.5),
            color: platform_color,
        },
        Block {
            center: Vec2::new(16.0, 10.0),
            size: Vec2::new(5.0, 0.5),
            color: platform_color,
        },
        // Wall-jump shaft
        Block {
            center: Vec2::new(24.0, 9.0),
            size: Vec2::new(1.0, 12.0),
            color: wall_color,
        },
    ];

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    for block in &blocks {
        commands.spawn((
            Ground,
            Sprite {
                color: block.color,
                custom_size: Some(block.size),
                ..default()
            },
            Transform::from_translation(block.center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            ground_layers,
        ));
    }

    info!("Spawned test room: {} blocks", blocks.len());
}
