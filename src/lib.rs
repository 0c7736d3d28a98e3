//! Rattler - a terminal snake arcade game
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - TUI rendering (render module)
//! - Keyboard handling (input module)
//! - Synthesized sound effects and music (audio module)
//! - The async arcade loop tying them together (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
