use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid, in cells
    pub grid_width: usize,
    /// Height of the game grid, in cells
    pub grid_height: usize,
    /// Size of one cell, in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed ramp
    /// Starting speed, in ticks per second
    pub initial_speed: f32,
    /// Speed gained per food eaten
    pub speed_increment: f32,
    /// Upper bound on speed
    pub max_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            cell_size: 32,
            initial_snake_length: 3,
            initial_speed: 5.0,
            speed_increment: 0.4,
            max_speed: 10.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }
}
