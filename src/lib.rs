pub mod camera;
pub mod content;
pub mod math;
pub mod movement;
