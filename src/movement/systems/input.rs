//! Movement domain: keyboard sampling into the latched movement input.

use bevy::prelude::*;

use crate::movement::MovementInput;

const LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const DOWN: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const UP: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const JUMP: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];
const DASH: [KeyCode; 2] = [KeyCode::KeyJ, KeyCode::KeyX];
const SPRINT: KeyCode = KeyCode::ShiftLeft;

/// -1, 0 or +1; opposing keys cancel out.
fn digital_axis(keyboard: &ButtonInput<KeyCode>, negative: [KeyCode; 2], positive: [KeyCode; 2]) -> f32 {
    let mut value = 0.0;
    if keyboard.any_pressed(negative) {
        value -= 1.0;
    }
    if keyboard.any_pressed(positive) {
        value += 1.0;
    }
    value
}

/// Runs every frame. Edges are latched so a fixed tick never misses a tap.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    input.move_axis = Vec2::new(
        digital_axis(&keyboard, LEFT, RIGHT),
        digital_axis(&keyboard, DOWN, UP),
    );
    input.sprint_held = keyboard.pressed(SPRINT);
    input.jump_held = keyboard.any_pressed(JUMP);
    input.latch(
        keyboard.any_just_pressed(JUMP),
        keyboard.any_just_released(JUMP),
        keyboard.any_just_pressed(DASH),
    );
}
