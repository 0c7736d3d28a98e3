use super::action::Direction;

/// A position on the game grid, in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The playing field: cell/pixel conversion and bounds checks.
///
/// All conversions are pure; pixel coordinates of grid-aligned positions
/// are always multiples of `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cell_size: u32,
}

impl Grid {
    pub fn new(width: usize, height: usize, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Check if a cell position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Convert a cell position to its top-left pixel coordinate
    pub fn to_pixel(&self, pos: Position) -> (i32, i32) {
        let size = self.cell_size as i32;
        (pos.x * size, pos.y * size)
    }

    /// Convert a pixel coordinate to the cell containing it
    pub fn from_pixel(&self, px: i32, py: i32) -> Position {
        let size = self.cell_size as i32;
        Position::new(px.div_euclid(size), py.div_euclid(size))
    }

    /// Check if a pixel coordinate lies inside the playing field
    pub fn pixel_in_bounds(&self, px: i32, py: i32) -> bool {
        let size = self.cell_size as i32;
        px >= 0 && px < self.width as i32 * size && py >= 0 && py < self.height as i32 * size
    }

    /// Iterate over every cell of the grid
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}
