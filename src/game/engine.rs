use rand::rngs::ThreadRng;
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::{spawn_food, Food, GridExhausted},
    grid::{Grid, Position},
    snake::Snake,
};

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Events raised during a tick, for sound effects and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate a food item
    Ate,
    /// The snake hit a wall or itself
    Crashed,
    /// No free cell left to spawn food on
    Won,
}

/// Complete game state, owned by the engine's caller
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub foods: Vec<Food>,
    pub grid: Grid,
    pub score: u32,
    pub speed: f32,
    pub status: GameStatus,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

/// Number of simultaneous food items for a snake of the given length:
/// one more for every ten segments
pub fn desired_food_count(length: usize) -> usize {
    (length.saturating_sub(1)) / 10 + 1
}

/// The game engine: advances the state machine one tick at a time
pub struct GameEngine {
    config: GameConfig,
    rng: ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Build a fresh game: short vertical snake heading down, one food,
    /// score zero, starting speed
    pub fn reset(&mut self) -> GameState {
        let length = self.config.initial_snake_length;
        let snake = Snake::new(Position::new(1, length as i32), Direction::Down, length);

        let mut state = GameState {
            snake,
            foods: Vec::new(),
            grid: Grid::new(
                self.config.grid_width,
                self.config.grid_height,
                self.config.cell_size,
            ),
            score: 0,
            speed: self.config.initial_speed,
            status: GameStatus::Running,
        };

        self.top_up_food(&mut state, &mut Vec::new());
        state
    }

    /// Execute one tick: steer, advance, check collisions, top up food,
    /// handle eating, check walls.
    ///
    /// Does nothing once the game is over; only a `reset` restarts it.
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if !state.is_running() {
            return events;
        }

        if let Action::Move(direction) = action {
            state.snake.set_direction(direction);
        }

        state.snake.advance();
        let head = state.snake.head();

        if state.snake.collides_with_body(head) {
            info!(score = state.score, "snake ran into itself");
            state.status = GameStatus::GameOver;
            events.push(GameEvent::Crashed);
            return events;
        }

        if !self.top_up_food(state, &mut events) {
            return events;
        }

        if let Some(idx) = state.foods.iter().position(|f| f.position == head) {
            let food = state.foods.remove(idx);
            state.snake.grow();
            state.score += 1;
            state.speed =
                (state.speed + self.config.speed_increment).min(self.config.max_speed);
            debug!(
                score = state.score,
                speed = state.speed,
                variant = ?food.variant,
                "food eaten"
            );
            events.push(GameEvent::Ate);

            // Growth can leave a food item under the body; drop it so the
            // next tick's top-up respawns it on a free cell
            let occupied = state.snake.occupied_cells();
            state.foods.retain(|f| !occupied.contains(&f.position));
        }

        if !state.grid.contains(head) {
            info!(score = state.score, "snake hit the wall");
            state.status = GameStatus::GameOver;
            events.push(GameEvent::Crashed);
            return events;
        }

        events
    }

    /// Spawn food until the active count matches the desired count.
    ///
    /// Returns false when the grid is exhausted, which ends the game as a
    /// win (no crash event).
    fn top_up_food(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
        let desired = desired_food_count(state.snake.len());

        while state.foods.len() < desired {
            let mut occupied = state.snake.occupied_cells();
            occupied.extend(state.foods.iter().map(|f| f.position));

            match spawn_food(&state.grid, &occupied, &mut self.rng) {
                Ok(food) => {
                    debug!(x = food.position.x, y = food.position.y, "food spawned");
                    state.foods.push(food);
                }
                Err(GridExhausted) => {
                    info!(score = state.score, "grid exhausted, game won");
                    state.status = GameStatus::GameOver;
                    events.push(GameEvent::Won);
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FoodVariant;

    fn state_with(
        engine: &mut GameEngine,
        segments: &[(i32, i32)],
        direction: Direction,
        foods: &[(i32, i32)],
    ) -> GameState {
        let mut state = engine.reset();
        state.snake = Snake {
            segments: segments
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
            direction,
        };
        state.foods = foods
            .iter()
            .map(|&(x, y)| Food {
                position: Position::new(x, y),
                variant: FoodVariant::Brown,
            })
            .collect();
        state
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 5.0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.foods.len(), 1);

        // Starting position: vertical, head at (1,3), facing down
        assert_eq!(state.snake.head(), Position::new(1, 3));
        assert_eq!(state.snake.segments[1], Position::new(1, 2));
        assert_eq!(state.snake.segments[2], Position::new(1, 1));
        assert_eq!(state.snake.direction, Direction::Down);
    }

    #[test]
    fn test_desired_food_count() {
        assert_eq!(desired_food_count(1), 1);
        assert_eq!(desired_food_count(3), 1);
        assert_eq!(desired_food_count(10), 1);
        assert_eq!(desired_food_count(11), 2);
        assert_eq!(desired_food_count(20), 2);
        assert_eq!(desired_food_count(21), 3);
    }

    #[test]
    fn test_eating_food() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = state_with(
            &mut engine,
            &[(2, 2), (2, 1), (2, 0)],
            Direction::Down,
            &[(2, 3)],
        );

        let events = engine.tick(&mut state, Action::Continue);

        assert!(events.contains(&GameEvent::Ate));
        assert!(state.is_running());
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
        assert!((state.speed - 5.4).abs() < 1e-5);
        assert!(!state.foods.iter().any(|f| f.position == Position::new(2, 3)));
    }

    #[test]
    fn test_speed_is_capped() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = state_with(
            &mut engine,
            &[(2, 2), (2, 1), (2, 0)],
            Direction::Down,
            &[(2, 3)],
        );
        state.speed = 9.9;

        engine.tick(&mut state, Action::Continue);

        assert_eq!(state.speed, 10.0);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut engine = GameEngine::new(GameConfig::small());
        // Length 5 so the bitten cell is still occupied after the shift;
        // a length-4 loop would step into the freshly vacated tail cell
        let mut state = state_with(
            &mut engine,
            &[(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)],
            Direction::Right,
            &[(8, 8)],
        );

        // Right, down, left, then up runs the head back into the body
        engine.tick(&mut state, Action::Continue);
        engine.tick(&mut state, Action::Move(Direction::Down));
        engine.tick(&mut state, Action::Move(Direction::Left));
        let events = engine.tick(&mut state, Action::Move(Direction::Up));

        assert_eq!(events, vec![GameEvent::Crashed]);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = state_with(
            &mut engine,
            &[(0, 5), (1, 5), (2, 5)],
            Direction::Left,
            &[(8, 8)],
        );

        let events = engine.tick(&mut state, Action::Continue);

        assert_eq!(events, vec![GameEvent::Crashed]);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_right_wall_collision() {
        let config = GameConfig::small();
        let width = config.grid_width as i32;
        let mut engine = GameEngine::new(config);
        let mut state = state_with(
            &mut engine,
            &[(width - 1, 5), (width - 2, 5), (width - 3, 5)],
            Direction::Right,
            &[(8, 8)],
        );

        let events = engine.tick(&mut state, Action::Continue);

        assert_eq!(events, vec![GameEvent::Crashed]);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_full_grid_is_a_win() {
        // A 2x2 grid with a length-4 snake cycling around it: after the
        // advance every cell is covered and no food can spawn
        let mut engine = GameEngine::new(GameConfig::new(2, 2));
        let mut state = state_with(
            &mut engine,
            &[(0, 0), (0, 1), (1, 1), (1, 0)],
            Direction::Right,
            &[],
        );

        let events = engine.tick(&mut state, Action::Continue);

        assert_eq!(events, vec![GameEvent::Won]);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn test_buried_food_is_removed_after_growth() {
        let mut engine = GameEngine::new(GameConfig::small());
        // Second food placed where the grown tail will sit after the tick
        let mut state = state_with(
            &mut engine,
            &[(2, 2), (2, 1), (2, 0)],
            Direction::Down,
            &[(2, 3), (2, 1)],
        );

        let events = engine.tick(&mut state, Action::Continue);

        assert!(events.contains(&GameEvent::Ate));
        assert!(!state.foods.iter().any(|f| f.position == Position::new(2, 1)));
    }

    #[test]
    fn test_reversal_is_ignored_by_tick() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = state_with(
            &mut engine,
            &[(5, 5), (4, 5), (3, 5)],
            Direction::Right,
            &[(8, 8)],
        );

        engine.tick(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_game_over_is_inert() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.status = GameStatus::GameOver;
        let snapshot = state.clone();

        let events = engine.tick(&mut state, Action::Continue);

        assert!(events.is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_food_topped_up_as_snake_grows() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        // Fake an eleven-segment snake; the next tick should bring the
        // active food count up to two
        for _ in 0..8 {
            state.snake.grow();
        }
        assert_eq!(state.snake.len(), 11);

        // Pin the existing food away from the snake's path
        state.foods[0].position = Position::new(8, 8);

        engine.tick(&mut state, Action::Continue);

        assert!(state.is_running());
        assert_eq!(state.foods.len(), 2);
    }
}
