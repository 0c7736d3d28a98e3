//! Core game logic
//!
//! Everything in here is pure state and math with no I/O: the grid
//! geometry, the snake, the food spawner and the per-tick state machine.
//! The terminal front end (render/input/audio) lives in sibling modules.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{desired_food_count, GameEngine, GameEvent, GameState, GameStatus};
pub use food::{spawn_food, Food, FoodVariant, GridExhausted};
pub use grid::{Grid, Position};
pub use snake::{Rotation, SegmentSprite, Snake};
