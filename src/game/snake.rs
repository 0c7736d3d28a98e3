use std::collections::HashSet;

use super::action::Direction;
use super::grid::Position;

/// Counter-clockwise quarter-turn rotation applied to a segment sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotation for a sprite whose connector points in `direction`.
    ///
    /// Used for the head (pointing where it is going) and the tail
    /// (pointing at the segment before it).
    pub fn facing(direction: Direction) -> Self {
        match direction {
            Direction::Up => Rotation::R0,
            Direction::Left => Rotation::R90,
            Direction::Down => Rotation::R180,
            Direction::Right => Rotation::R270,
        }
    }
}

/// How a single body segment should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSprite {
    Head(Rotation),
    /// Straight body piece; R0 vertical, R90 horizontal
    Straight(Rotation),
    /// Corner piece; rotation from `curve_rotation`
    Curve(Rotation),
    Tail(Rotation),
}

/// The snake: ordered segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub segments: Vec<Position>,
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` segments trailing behind `head`,
    /// opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut segments = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = segments[i - 1];
            segments.push(prev.moved_by(-dx, -dy));
        }

        Self {
            segments,
            direction,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        *self.segments.last().unwrap()
    }

    /// Segments excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Steer the snake; a 180-degree reversal is silently ignored
    pub fn set_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.direction) {
            self.direction = direction;
        }
    }

    /// Shift every segment to its predecessor's position, then move the
    /// head one cell in the current direction.
    ///
    /// Performs no bounds checking; the caller checks for wall and self
    /// collision afterwards.
    pub fn advance(&mut self) {
        for i in (1..self.segments.len()).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = self.segments[0].moved_in_direction(self.direction);
    }

    /// Append a new tail segment coincident with the current tail; it gets
    /// pulled apart on the next `advance`
    pub fn grow(&mut self) {
        self.segments.push(self.tail());
    }

    /// Check if a position collides with any non-head segment
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// The deduplicated set of cells covered by all segments
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.segments.iter().copied().collect()
    }

    /// Compute the sprite and rotation for every segment.
    ///
    /// Interior segments are classified by where their two neighbors lie:
    /// collinear neighbors give a straight piece, a direction change gives
    /// one of four corner pieces. Immediately after `grow` the last two
    /// segments coincide; those fall back to a straight/tail piece until
    /// the next `advance` separates them.
    pub fn sprites(&self) -> Vec<SegmentSprite> {
        let n = self.segments.len();
        let mut sprites = Vec::with_capacity(n);

        for i in 0..n {
            let sprite = if i == 0 {
                SegmentSprite::Head(Rotation::facing(self.direction))
            } else if i == n - 1 {
                match direction_to(self.segments[i], self.segments[i - 1]) {
                    Some(to_body) => SegmentSprite::Tail(Rotation::facing(to_body)),
                    None => SegmentSprite::Tail(Rotation::facing(self.direction)),
                }
            } else {
                let to_prev = direction_to(self.segments[i], self.segments[i - 1]);
                let to_next = direction_to(self.segments[i], self.segments[i + 1]);

                match (to_prev, to_next) {
                    (Some(p), Some(s)) if p.is_opposite(s) => {
                        SegmentSprite::Straight(axis_rotation(p))
                    }
                    (Some(p), Some(s)) => match curve_rotation(p, s) {
                        Some(rotation) => SegmentSprite::Curve(rotation),
                        None => SegmentSprite::Straight(axis_rotation(p)),
                    },
                    (Some(d), None) | (None, Some(d)) => {
                        SegmentSprite::Straight(axis_rotation(d))
                    }
                    (None, None) => SegmentSprite::Straight(Rotation::R0),
                }
            };

            sprites.push(sprite);
        }

        sprites
    }
}

/// Direction from one cell to an adjacent cell, None if not orthogonally
/// adjacent (including coincident cells)
fn direction_to(from: Position, to: Position) -> Option<Direction> {
    match ((to.x - from.x).signum(), (to.y - from.y).signum()) {
        (0, -1) => Some(Direction::Up),
        (0, 1) => Some(Direction::Down),
        (-1, 0) => Some(Direction::Left),
        (1, 0) => Some(Direction::Right),
        _ => None,
    }
}

/// Rotation for a straight piece running along the given direction's axis
fn axis_rotation(direction: Direction) -> Rotation {
    if direction.is_vertical() {
        Rotation::R0
    } else {
        Rotation::R90
    }
}

/// Rotation for a corner piece, keyed by which directions the two
/// neighbors lie in relative to the segment.
///
/// All eight ordered combinations reduce to four rotations by symmetry:
/// the corner connecting left+up is R0, left+down R90, right+down R180,
/// right+up R270. Returns None for the non-corner combinations.
pub fn curve_rotation(to_prev: Direction, to_next: Direction) -> Option<Rotation> {
    use Direction::*;

    match (to_prev, to_next) {
        (Left, Up) | (Up, Left) => Some(Rotation::R0),
        (Left, Down) | (Down, Left) => Some(Rotation::R90),
        (Right, Down) | (Down, Right) => Some(Rotation::R180),
        (Right, Up) | (Up, Right) => Some(Rotation::R270),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(cells: &[(i32, i32)], direction: Direction) -> Snake {
        Snake {
            segments: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
        }
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(1, 3), Direction::Down, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(1, 3));
        assert_eq!(snake.segments[1], Position::new(1, 2));
        assert_eq!(snake.segments[2], Position::new(1, 1));
    }

    #[test]
    fn test_advance_moves_whole_body() {
        // Length 3 at (1,3),(1,2),(1,1) facing down advances to
        // (1,4),(1,3),(1,2)
        let mut snake = snake_at(&[(1, 3), (1, 2), (1, 1)], Direction::Down);
        snake.advance();

        assert_eq!(
            snake.segments,
            vec![Position::new(1, 4), Position::new(1, 3), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_advance_preserves_contiguity() {
        let mut snake = snake_at(&[(5, 5), (4, 5), (4, 4), (3, 4)], Direction::Down);
        let before = snake.segments.clone();

        snake.advance();

        assert_eq!(snake.len(), before.len());
        for i in 1..snake.len() {
            assert_eq!(snake.segments[i], before[i - 1]);
        }
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Left, 3);

        snake.set_direction(Direction::Right);
        assert_eq!(snake.direction, Direction::Left);

        snake.set_direction(Direction::Up);
        assert_eq!(snake.direction, Direction::Up);
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let old_tail = snake.tail();

        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), old_tail);

        // The duplicate is pulled apart on the next advance
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.occupied_cells().len(), 4);
    }

    #[test]
    fn test_occupied_cells_deduplicates() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        snake.grow();

        assert_eq!(snake.len(), 4);
        assert!(snake.occupied_cells().len() <= snake.len());
        assert_eq!(snake.occupied_cells().len(), 3);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_head_rotations() {
        for (direction, rotation) in [
            (Direction::Up, Rotation::R0),
            (Direction::Left, Rotation::R90),
            (Direction::Down, Rotation::R180),
            (Direction::Right, Rotation::R270),
        ] {
            let snake = Snake::new(Position::new(5, 5), direction, 3);
            assert_eq!(snake.sprites()[0], SegmentSprite::Head(rotation));
        }
    }

    #[test]
    fn test_curve_rotation_table() {
        use Direction::*;

        // All eight ordered neighbor combinations, four rotations
        let cases = [
            ((Left, Up), Rotation::R0),
            ((Up, Left), Rotation::R0),
            ((Left, Down), Rotation::R90),
            ((Down, Left), Rotation::R90),
            ((Right, Down), Rotation::R180),
            ((Down, Right), Rotation::R180),
            ((Right, Up), Rotation::R270),
            ((Up, Right), Rotation::R270),
        ];

        for ((to_prev, to_next), expected) in cases {
            assert_eq!(
                curve_rotation(to_prev, to_next),
                Some(expected),
                "curve ({to_prev:?}, {to_next:?})"
            );
        }

        // Collinear neighbors are not corners
        assert_eq!(curve_rotation(Left, Right), None);
        assert_eq!(curve_rotation(Up, Down), None);
    }

    #[test]
    fn test_straight_segment_sprites() {
        let vertical = snake_at(&[(1, 3), (1, 2), (1, 1)], Direction::Down);
        assert_eq!(
            vertical.sprites()[1],
            SegmentSprite::Straight(Rotation::R0)
        );

        let horizontal = snake_at(&[(3, 1), (2, 1), (1, 1)], Direction::Right);
        assert_eq!(
            horizontal.sprites()[1],
            SegmentSprite::Straight(Rotation::R90)
        );
    }

    #[test]
    fn test_l_shaped_snake_sprites() {
        // Head right of the corner, tail above it: the corner connects
        // right (toward head) and up (toward tail)
        let snake = snake_at(&[(3, 2), (2, 2), (2, 1)], Direction::Right);
        let sprites = snake.sprites();

        assert_eq!(sprites[0], SegmentSprite::Head(Rotation::R270));
        assert_eq!(sprites[1], SegmentSprite::Curve(Rotation::R270));
        // Body lies below the tail
        assert_eq!(sprites[2], SegmentSprite::Tail(Rotation::R180));
    }

    #[test]
    fn test_tail_rotations() {
        // Body above the tail
        let snake = snake_at(&[(1, 1), (1, 2), (1, 3)], Direction::Up);
        assert_eq!(
            *snake.sprites().last().unwrap(),
            SegmentSprite::Tail(Rotation::R0)
        );

        // Body right of the tail
        let snake = snake_at(&[(3, 1), (2, 1), (1, 1)], Direction::Right);
        assert_eq!(
            *snake.sprites().last().unwrap(),
            SegmentSprite::Tail(Rotation::R270)
        );
    }

    #[test]
    fn test_length_matches_segments() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        for _ in 0..5 {
            snake.advance();
            assert_eq!(snake.len(), snake.segments.len());
            snake.grow();
            assert_eq!(snake.len(), snake.segments.len());
        }
        assert_eq!(snake.len(), 8);
    }
}
