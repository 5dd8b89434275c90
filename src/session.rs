//! One play session
//!
//! Owns the drill, the RNG and the pre-rendered scene, and exposes the
//! actions the page's controls map to. Drivers either call `tick` once per
//! frame or feed wall-clock frame times to `advance`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::scene::SceneBitmap;
use crate::settings::{Settings, clamp_randomness};
use crate::sim::{Bias, DrillMode, DrillState, DrillStatus, Evaluator, Terrain, tick};

/// Something the UI may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Paused,
    /// The run ended; the start control should now offer a retry
    Finished {
        status: DrillStatus,
        pipe_length: usize,
    },
    /// A finished run was replaced by a fresh one
    Reset,
    ModeChanged(DrillMode),
    BiasFlipped(Bias),
}

/// Read-only view for the render layer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub position: Vec2,
    pub heading: Vec2,
    pub bit_angle: f32,
    pub bias: Bias,
    pub mode: DrillMode,
    pub status: DrillStatus,
    pub pipe_length: usize,
    /// Hard mode only: radius of the clearance ring
    pub clearance: Option<f32>,
    pub control_label: &'static str,
}

/// A drilling session
#[derive(Debug, Clone)]
pub struct Session {
    state: DrillState,
    evaluator: Evaluator<SceneBitmap>,
    rng: Pcg32,
    seed: u64,
    randomness: f32,
    accumulator: f32,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let terrain = Terrain::STANDARD;
        let scene = SceneBitmap::render(&terrain);

        let mut state = DrillState::reset();
        state.mode = settings.mode;

        log::info!("New drilling session (seed {}, mode {})", seed, state.mode.as_str());
        Self {
            state,
            evaluator: Evaluator::new(scene, terrain, settings.hard_win_tolerance),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            randomness: settings.effective_randomness(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scene(&self) -> &SceneBitmap {
        self.evaluator.easy.source()
    }

    pub fn randomness(&self) -> f32 {
        self.randomness
    }

    // === Controls ===

    /// The start/pause/retry button
    pub fn press_start(&mut self) -> GameEvent {
        let event = match self.state.status {
            DrillStatus::Paused => {
                self.state.status = DrillStatus::Drilling;
                GameEvent::Started
            }
            DrillStatus::Drilling => {
                self.state.status = DrillStatus::Paused;
                self.accumulator = 0.0;
                GameEvent::Paused
            }
            DrillStatus::Win | DrillStatus::Lose => {
                self.restart();
                GameEvent::Reset
            }
        };
        log::debug!("Start control: {:?}", event);
        event
    }

    pub fn toggle_mode(&mut self) -> GameEvent {
        self.state.toggle_mode();
        log::debug!("Mode: {}", self.state.mode.as_str());
        GameEvent::ModeChanged(self.state.mode)
    }

    pub fn toggle_bias(&mut self) -> GameEvent {
        self.state.flip_bias();
        log::debug!("Bias: {:?}", self.state.bias);
        GameEvent::BiasFlipped(self.state.bias)
    }

    /// Set the randomness slider (clamped to `[0, MAX_RANDOMNESS]`)
    pub fn set_randomness(&mut self, randomness: f32) {
        self.randomness = clamp_randomness(randomness);
    }

    /// What the start control should say right now
    pub fn control_label(&self) -> &'static str {
        match self.state.status {
            DrillStatus::Paused => "start",
            DrillStatus::Drilling => "pause",
            DrillStatus::Win | DrillStatus::Lose => "try again",
        }
    }

    // === Simulation ===

    /// Advance one logical tick
    pub fn tick(&mut self) -> Option<GameEvent> {
        let finished = tick(&mut self.state, &self.evaluator, self.randomness, &mut self.rng)?;
        let pipe_length = self.state.pipe_length();

        match finished {
            DrillStatus::Win => log::info!("Reached the goal! Pipe length: {}", pipe_length),
            _ => log::info!("Drill lost at ({:.1}, {:.1})", self.state.position.x, self.state.position.y),
        }
        Some(GameEvent::Finished {
            status: finished,
            pipe_length,
        })
    }

    /// Feed one frame's elapsed time; runs as many fixed ticks as fit
    pub fn advance(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.status != DrillStatus::Drilling {
            self.accumulator = 0.0;
            return events;
        }

        self.accumulator += sanitize_frame_dt(frame_dt);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;

            if let Some(event) = self.tick() {
                events.push(event);
                self.accumulator = 0.0;
                break;
            }
        }
        events
    }

    /// Hard-mode clearance ring radius at the bit
    pub fn clearance(&self) -> f32 {
        self.evaluator.hard.clearance(self.state.position)
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            position: state.position,
            heading: state.heading,
            bit_angle: state.bit_angle(),
            bias: state.bias,
            mode: state.mode,
            status: state.status,
            pipe_length: state.pipe_length(),
            clearance: (state.mode == DrillMode::Hard).then(|| self.clearance()),
            control_label: self.control_label(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    fn restart(&mut self) {
        let previous = self.state.pipe_length();
        self.state = DrillState::reset();
        self.accumulator = 0.0;
        log::info!("Drill reset (previous pipe length {})", previous);
    }
}

/// Frame time the accumulator may absorb: non-finite reads as 0, capped at `MAX_FRAME_DT`
fn sanitize_frame_dt(frame_dt: f32) -> f32 {
    if frame_dt.is_finite() {
        frame_dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(1, &Settings::default())
    }

    /// Tick until the run ends (or give up)
    fn run_to_end(s: &mut Session, limit: usize) -> Option<GameEvent> {
        (0..limit).find_map(|_| s.tick())
    }

    #[test]
    fn test_start_pause_cycle() {
        let mut s = session();
        assert_eq!(s.control_label(), "start");

        assert_eq!(s.press_start(), GameEvent::Started);
        assert_eq!(s.state().status, DrillStatus::Drilling);
        assert_eq!(s.control_label(), "pause");

        assert_eq!(s.press_start(), GameEvent::Paused);
        assert_eq!(s.state().status, DrillStatus::Paused);
        assert_eq!(s.control_label(), "start");
    }

    #[test]
    fn test_paused_session_does_not_drill() {
        let mut s = session();
        assert_eq!(s.tick(), None);
        assert!(s.state().path.is_empty());
        assert!(s.advance(0.05).is_empty());
        assert!(s.state().path.is_empty());
    }

    #[test]
    fn test_path_grows_once_per_tick() {
        let mut s = session();
        s.press_start();
        for _ in 0..30 {
            s.tick();
        }
        assert_eq!(s.state().pipe_length(), 30);
    }

    #[test]
    fn test_finish_then_retry() {
        let mut s = session();
        s.toggle_mode();
        s.toggle_bias();
        s.press_start();

        let event = run_to_end(&mut s, 5_000);
        assert!(matches!(
            event,
            Some(GameEvent::Finished {
                status: DrillStatus::Lose,
                ..
            })
        ));
        assert_eq!(s.control_label(), "try again");

        // Finished runs do not step
        let len = s.state().pipe_length();
        assert_eq!(s.tick(), None);
        assert_eq!(s.state().pipe_length(), len);

        assert_eq!(s.press_start(), GameEvent::Reset);
        assert_eq!(s.state(), &DrillState::reset());
        assert_eq!(s.control_label(), "start");
    }

    #[test]
    fn test_finished_event_reports_pipe_length() {
        let mut s = session();
        s.press_start();
        match run_to_end(&mut s, 5_000) {
            Some(GameEvent::Finished { pipe_length, .. }) => {
                assert_eq!(pipe_length, s.state().path.len());
                assert!(pipe_length > 0);
            }
            other => panic!("expected a finished run, got {other:?}"),
        }
    }

    #[test]
    fn test_randomness_is_clamped() {
        let mut s = session();
        s.set_randomness(25.0);
        assert_eq!(s.randomness(), MAX_RANDOMNESS);
        s.set_randomness(-3.0);
        assert_eq!(s.randomness(), 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let settings = Settings {
            randomness: 6.0,
            ..Default::default()
        };
        let mut a = Session::new(77, &settings);
        let mut b = Session::new(77, &settings);
        a.press_start();
        b.press_start();

        let ea = run_to_end(&mut a, 5_000);
        let eb = run_to_end(&mut b, 5_000);
        assert_eq!(ea, eb);
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_settings_pick_first_mode() {
        let settings = Settings {
            mode: DrillMode::Hard,
            ..Default::default()
        };
        let s = Session::new(1, &settings);
        assert_eq!(s.state().mode, DrillMode::Hard);
        assert!(s.snapshot().clearance.is_some());
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut s = session();
        s.press_start();

        // A long stall fills the accumulator past the cap every frame
        let mut before = 0;
        for _ in 0..20 {
            s.advance(10.0);
            let len = s.state().pipe_length();
            assert_eq!(len - before, MAX_SUBSTEPS as usize);
            before = len;
        }
    }

    #[test]
    fn test_non_finite_frame_time_does_not_stall() {
        let mut s = session();
        s.press_start();

        s.advance(f32::NAN);
        s.advance(f32::INFINITY);
        assert_eq!(s.state().pipe_length(), 0);

        for _ in 0..60 {
            s.advance(SIM_DT);
        }
        let len = s.state().pipe_length();
        assert!((59..=60).contains(&len), "len {len}");
    }

    #[test]
    fn test_sanitize_frame_dt() {
        assert_eq!(sanitize_frame_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_frame_dt(f32::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_frame_dt(-1.0), 0.0);
        assert_eq!(sanitize_frame_dt(5.0), MAX_FRAME_DT);
        assert_eq!(sanitize_frame_dt(SIM_DT), SIM_DT);
    }

    #[test]
    fn test_advance_one_tick_per_frame_at_sim_rate() {
        let mut s = session();
        s.press_start();
        for _ in 0..60 {
            s.advance(SIM_DT);
        }
        let len = s.state().pipe_length();
        assert!((59..=60).contains(&len), "len {len}");
    }

    #[test]
    fn test_snapshot_json() {
        let s = session();
        let json = s.snapshot_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["status"], "Paused");
        assert_eq!(v["mode"], "Easy");
        assert_eq!(v["pipe_length"], 0);
        assert_eq!(v["control_label"], "start");
        assert!(v["clearance"].is_null());
    }

    #[test]
    fn test_clearance_at_entry_point() {
        let s = session();
        // Bit starts on the surface line
        assert!(s.clearance().abs() < 1e-4);
    }
}
