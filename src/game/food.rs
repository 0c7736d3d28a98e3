use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::grid::{Grid, Position};

/// No free cell is left to place food on; the caller treats this as the
/// win/terminal condition, not a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell left on the grid")]
pub struct GridExhausted;

/// Cosmetic food variant; affects the sprite only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodVariant {
    White,
    Gray,
    Brown,
}

impl FoodVariant {
    /// Pick a variant with weights 2/5/8 (white rats are rare)
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..15) {
            0..=1 => FoodVariant::White,
            2..=6 => FoodVariant::Gray,
            _ => FoodVariant::Brown,
        }
    }
}

/// A food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub variant: FoodVariant,
}

/// Place a new food item on a uniformly random free cell.
///
/// `occupied` must contain the snake's cells and the cells of all active
/// food items, so a fresh spawn never lands on either.
pub fn spawn_food(
    grid: &Grid,
    occupied: &HashSet<Position>,
    rng: &mut impl Rng,
) -> Result<Food, GridExhausted> {
    let free: Vec<Position> = grid.cells().filter(|c| !occupied.contains(c)).collect();
    let position = *free.choose(rng).ok_or(GridExhausted)?;

    Ok(Food {
        position,
        variant: FoodVariant::random(rng),
    })
}
