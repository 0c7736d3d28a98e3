use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval};
use tracing::info;

use crate::audio::{AudioPlayer, SoundEffect};
use crate::game::{Action, Direction, GameConfig, GameEngine, GameEvent, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Integer tick rate for the current speed, clamped so the clock never
/// stops
fn tick_rate(speed: f32) -> u32 {
    (speed as u32).max(1)
}

fn tick_period(rate: u32) -> Duration {
    Duration::from_millis(1000 / rate as u64)
}

pub struct ArcadeMode {
    engine: GameEngine,
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Option<AudioPlayer>,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl ArcadeMode {
    pub fn new(config: GameConfig, mute: bool) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let audio = if mute { None } else { AudioPlayer::new().ok() };

        Self {
            engine,
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        if let Some(audio) = &mut self.audio {
            audio.start_music();
        }

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The game clock runs at the current speed in ticks per second;
        // the interval is rebuilt whenever the integer rate changes
        let mut current_rate = tick_rate(self.state.speed);
        let mut tick_timer: Interval = interval(tick_period(current_rate));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.state.is_running() {
                        self.update_game();
                    }

                    let rate = tick_rate(self.state.speed);
                    if rate != current_rate {
                        current_rate = rate;
                        let period = tick_period(rate);
                        tick_timer = interval_at(Instant::now() + period, period);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.is_running() {
                        self.stats.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(Action::Move(direction)) => {
                    // Last direction change this frame wins
                    self.pending_direction = Some(direction);
                }
                KeyAction::GameAction(Action::Continue) => {}
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let events = self.engine.tick(&mut self.state, action);

        for event in events {
            match event {
                GameEvent::Ate => self.play_sound(SoundEffect::Ding),
                GameEvent::Crashed => {
                    self.play_sound(SoundEffect::Crash);
                    self.on_game_over();
                }
                GameEvent::Won => self.on_game_over(),
            }
        }
    }

    fn on_game_over(&mut self) {
        self.stats
            .on_game_over(self.state.score, self.state.snake.len());
        if let Some(audio) = &self.audio {
            audio.pause_music();
        }
    }

    fn reset_game(&mut self) {
        info!(games_played = self.stats.games_played, "game restarted");
        self.state = self.engine.reset();
        self.stats.on_game_start();
        self.pending_direction = None;
        if let Some(audio) = &self.audio {
            audio.resume_music();
        }
    }

    fn play_sound(&self, effect: SoundEffect) {
        if let Some(audio) = &self.audio {
            audio.play(effect);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
