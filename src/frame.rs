//! Frame driver
//!
//! Owns the game state and its two collaborators. Each frame runs the tick,
//! forwards the tick's sounds to the audio sink and flushes it, then renders
//! once.

use crate::audio::AudioSink;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::SimError;
use crate::renderer::{self, Renderer};
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct FrameDriver<A: AudioSink, R: Renderer> {
    state: GameState,
    audio: A,
    renderer: R,
    accumulator: f32,
    /// Key edges not yet consumed by a tick
    pending: TickInput,
}

impl<A: AudioSink, R: Renderer> FrameDriver<A, R> {
    pub fn new(state: GameState, audio: A, renderer: R) -> Self {
        Self {
            state,
            audio,
            renderer,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Exactly one tick, then audio and rendering
    pub fn frame(&mut self, input: &TickInput) -> Result<(), SimError> {
        tick(&mut self.state, input)?;
        self.dispatch_events();
        self.audio.flush();
        renderer::draw_frame(&self.state, &mut self.renderer);
        Ok(())
    }

    /// Wall-clock driven update: run as many fixed ticks as `dt` covers
    ///
    /// Input edges are applied on the first tick that runs; if `dt` is too
    /// short for any tick they wait for the next call. After a stall long
    /// enough to hit the substep cap, the remaining time is discarded.
    /// Returns the number of ticks run. Renders only when at least one tick
    /// ran.
    pub fn update(&mut self, dt: f32, input: &TickInput) -> Result<u32, SimError> {
        self.accumulator += dt.min(0.1);
        if !input.is_empty() {
            self.pending.events.extend_from_slice(&input.events);
        }

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            tick(&mut self.state, &input)?;
            self.dispatch_events();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Capped: drop the backlog instead of fast-forwarding later
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        if substeps > 0 {
            self.audio.flush();
            renderer::draw_frame(&self.state, &mut self.renderer);
        }
        Ok(substeps)
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(sound) => self.audio.play(sound),
                GameEvent::LevelStarted { level } => log::debug!("Entered level {}", level),
                GameEvent::LevelCleared { level } => log::debug!("Left level {}", level),
                GameEvent::PlayerDestroyed => log::debug!("Player lost"),
                GameEvent::GameOver { score } => log::debug!("Final score {}", score),
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioManager, Sound};
    use crate::renderer::HeadlessRenderer;
    use crate::sim::{GamePhase, Key, KeyEvent};
    use crate::tuning::Tuning;

    fn driver() -> FrameDriver<Vec<Sound>, HeadlessRenderer> {
        FrameDriver::new(
            GameState::new(Tuning::bb8(), 3),
            Vec::new(),
            HeadlessRenderer::default(),
        )
    }

    #[test]
    fn test_frame_ticks_plays_and_draws() {
        let mut driver = driver();
        let input = TickInput::press(Key::Digit(1)).then(KeyEvent::Press(Key::Space));
        driver.frame(&input).unwrap();

        assert_eq!(driver.state().phase(), GamePhase::Level(1));
        assert_eq!(driver.audio().first(), Some(&Sound::Laser));
        assert!(driver.state().events().is_empty());
        assert_eq!(driver.renderer().frames, 1);
        assert_eq!(driver.renderer().background.as_deref(), Some("sky1"));
    }

    #[test]
    fn test_frame_on_instructions_still_renders() {
        let mut driver = driver();
        driver.frame(&TickInput::default()).unwrap();
        assert_eq!(driver.state().time_ticks, 0);
        assert_eq!(driver.renderer().frames, 1);
    }

    #[test]
    fn test_update_runs_fixed_ticks() {
        let mut driver = driver();
        assert_eq!(driver.update(SIM_DT, &TickInput::press(Key::Digit(2))).unwrap(), 1);
        assert_eq!(driver.state().phase(), GamePhase::Level(2));
        assert_eq!(driver.state().time_ticks, 1);

        // Long stalls are capped
        assert_eq!(driver.update(1.0, &TickInput::default()).unwrap(), MAX_SUBSTEPS);
    }

    #[test]
    fn test_audio_queue_drained_every_frame() {
        let mut driver = FrameDriver::new(
            GameState::new(Tuning::bb8(), 3),
            AudioManager::new(),
            HeadlessRenderer::default(),
        );
        driver.frame(&TickInput::press(Key::Digit(1))).unwrap();
        for _ in 0..200 {
            let fire = TickInput::press(Key::Space).then(KeyEvent::Release(Key::Space));
            driver.frame(&fire).unwrap();
            assert!(driver.audio().queued().is_empty());
            driver.update(SIM_DT, &fire).unwrap();
            assert!(driver.audio().queued().is_empty());
        }
        // At least the first shot reached the output
        assert!(driver.audio().voices_flushed() >= 2);
    }

    #[test]
    fn test_stall_does_not_fast_forward_afterwards() {
        let mut driver = driver();
        driver.update(SIM_DT, &TickInput::press(Key::Digit(1))).unwrap();
        for _ in 0..600 {
            assert_eq!(driver.update(1.0, &TickInput::default()).unwrap(), MAX_SUBSTEPS);
        }
        for _ in 0..20 {
            assert_eq!(driver.update(SIM_DT, &TickInput::default()).unwrap(), 1);
        }
    }

    #[test]
    fn test_update_keeps_input_until_a_tick_runs() {
        let mut driver = driver();
        assert_eq!(driver.update(0.0, &TickInput::press(Key::Digit(3))).unwrap(), 0);
        assert_eq!(driver.state().phase(), GamePhase::Instructions);
        assert_eq!(driver.renderer().frames, 0);

        driver.update(SIM_DT, &TickInput::default()).unwrap();
        assert_eq!(driver.state().phase(), GamePhase::Level(3));
    }
}
