//! # NIMBUS Game Loop
//!
//! One tick, driven by the host's timing source:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. CLAMP dt                                                         │
//! │    └─ Long pauses never reach the systems as one huge step          │
//! │                                                                     │
//! │ 2. SYSTEMS (World::update, registration order)                      │
//! │    ├─ input      player controllers ← provider snapshot             │
//! │    ├─ ai         AI controllers ← tiered policy                     │
//! │    ├─ physics    gravity, clamping, collision events                │
//! │    ├─ animation  clip selection, frame stepping                     │
//! │    └─ render     (registered by the host, if any)                   │
//! │                                                                     │
//! │ 3. STAGE                                                            │
//! │    └─ Script update, completion check                               │
//! │                                                                     │
//! │ 4. EVENTS                                                           │
//! │    └─ Drain the bus into the frame report                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use nimbus_core::World;

use crate::ai::AiSystem;
use crate::animation::AnimationSystem;
use crate::config::{GameLoopConfig, SimulationConfig};
use crate::error::NimbusResult;
use crate::events::{EventBus, EventReceiver, EventSender, GameEvent};
use crate::input::{InputProvider, InputSystem, KeyboardInput};
use crate::physics::PhysicsSystem;
use crate::stage::Stage;

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// `dt` handed to the systems, after clamping.
    pub dt: f32,
    /// Total tick time in microseconds.
    pub total_us: u64,
    /// Time spent in `World::update`, in microseconds.
    pub systems_us: u64,
    /// Time spent in the stage update, in microseconds.
    pub stage_us: u64,
    /// Events drained this frame.
    pub events_processed: u32,
}

/// Result of one [`GameLoop::tick`].
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Timing for this frame.
    pub stats: FrameStats,
    /// Events raised during the frame, in send order.
    pub events: Vec<GameEvent>,
    /// The active stage reports completion.
    pub stage_complete: bool,
}

/// The main game loop orchestrator.
///
/// Owns the world, the event bus and the active stage.
pub struct GameLoop {
    world: World,
    events: EventBus,
    receiver: EventReceiver,
    stage: Option<Box<dyn Stage>>,
    config: GameLoopConfig,
    frame_count: u64,
    stats_accumulator: FrameStatsAccumulator,
}

impl GameLoop {
    /// Creates a loop with an empty world and no systems.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        let events = EventBus::new(config.events.capacity);
        let receiver = events.receiver();

        Self {
            world: World::new(),
            events,
            receiver,
            stage: None,
            config: config.game_loop.clone(),
            frame_count: 0,
            stats_accumulator: FrameStatsAccumulator::new(config.game_loop.target_fps),
        }
    }

    /// Creates a loop with input, AI, physics and animation registered in
    /// that order.
    ///
    /// # Errors
    ///
    /// Never fails on a fresh world; the `Result` covers name clashes.
    pub fn with_default_systems<P>(config: &SimulationConfig, input: P) -> NimbusResult<Self>
    where
        P: InputProvider + 'static,
    {
        let mut game_loop = Self::new(config);
        let sender = game_loop.sender();
        let world = &mut game_loop.world;

        world.add_system(InputSystem::new(input))?;
        world.add_system(AiSystem::new(&config.ai))?;
        world.add_system(PhysicsSystem::new(config.physics.clone(), sender.clone()))?;
        world.add_system(AnimationSystem::new(&config.animation, sender))?;

        Ok(game_loop)
    }

    /// [`GameLoop::with_default_systems`] over a keyboard using the
    /// configured bindings. The host feeds key events into the returned
    /// handle.
    ///
    /// # Errors
    ///
    /// As [`GameLoop::with_default_systems`].
    pub fn with_keyboard(
        config: &SimulationConfig,
    ) -> NimbusResult<(Self, Rc<RefCell<KeyboardInput>>)> {
        let keyboard = KeyboardInput::new(config.input.clone()).shared();
        let game_loop = Self::with_default_systems(config, Rc::clone(&keyboard))?;
        Ok((game_loop, keyboard))
    }

    /// The simulation world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulation world, mutably (for registering extra systems).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// A sender on the loop's event bus.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.events.sender()
    }

    // =========================================================================
    // Stages
    // =========================================================================

    /// Tears down the current stage (if any) and starts `stage`.
    pub fn set_stage(&mut self, mut stage: Box<dyn Stage>) {
        self.clear_stage();

        stage.roster().attach(self.events.sender());
        stage.init(&mut self.world);
        let spawned = stage.roster().entities().len();
        tracing::info!("stage `{}` started with {} entities", stage.name(), spawned);
        self.stage = Some(stage);
    }

    /// Tears down and returns the current stage.
    pub fn clear_stage(&mut self) -> Option<Box<dyn Stage>> {
        let mut stage = self.stage.take()?;
        stage.destroy(&mut self.world);
        tracing::info!("stage `{}` destroyed", stage.name());
        Some(stage)
    }

    /// Name of the active stage.
    #[must_use]
    pub fn stage_name(&self) -> Option<&str> {
        self.stage.as_deref().map(|stage| stage.name())
    }

    // =========================================================================
    // Ticking
    // =========================================================================

    /// Runs one frame with the host-measured `dt` in seconds.
    pub fn tick(&mut self, dt: f32) -> FrameReport {
        let start = Instant::now();
        let dt = self.clamp_dt(dt);

        self.world.update(dt);
        let systems_done = Instant::now();

        let mut stage_complete = false;
        if let Some(stage) = self.stage.as_mut() {
            stage.update(&mut self.world, dt);
            stage_complete = stage.is_complete(&self.world);
            if stage_complete {
                tracing::debug!("stage `{}` complete", stage.name());
            }
        }
        let stage_done = Instant::now();

        let events = self.receiver.drain();
        let stats = FrameStats {
            frame: self.frame_count,
            dt,
            total_us: micros(start.elapsed()),
            systems_us: micros(systems_done - start),
            stage_us: micros(stage_done - systems_done),
            events_processed: u32::try_from(events.len()).unwrap_or(u32::MAX),
        };
        self.end_frame(stats);

        FrameReport {
            stats,
            events,
            stage_complete,
        }
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.config.max_delta)
        } else {
            0.0
        }
    }

    fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats_accumulator.record(stats);

        let budget = self.stats_accumulator.budget_us();
        if self.config.log_slow_frames && stats.total_us > budget {
            tracing::warn!(
                "frame {} exceeded budget: {:.2}ms (target: {:.2}ms)",
                stats.frame,
                stats.total_us as f64 / 1000.0,
                budget as f64 / 1000.0
            );
        }
    }

    /// Returns the current frame count.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats_accumulator
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Per-frame budget in microseconds.
    budget_us: u64,
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of system times.
    pub systems_us_sum: u64,
    /// Sum of stage times.
    pub stage_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Events drained across all frames.
    pub events_processed: u64,
}

impl FrameStatsAccumulator {
    /// Creates an accumulator budgeting for `target_fps`.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget_us: 1_000_000 / u64::from(target_fps.max(1)),
            frames_recorded: 0,
            total_us_sum: 0,
            systems_us_sum: 0,
            stage_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            events_processed: 0,
        }
    }

    /// Per-frame budget in microseconds.
    #[must_use]
    pub fn budget_us(&self) -> u64 {
        self.budget_us
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.systems_us_sum += stats.systems_us;
        self.stage_us_sum += stats.stage_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.events_processed += u64::from(stats.events_processed);

        if stats.total_us > self.budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::InputState;

    #[test]
    fn test_default_systems_order() {
        let game_loop =
            GameLoop::with_default_systems(&SimulationConfig::default(), InputState::default())
                .unwrap();
        assert_eq!(
            game_loop.world().system_names(),
            vec!["input", "ai", "physics", "animation"]
        );
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut game_loop = GameLoop::new(&SimulationConfig::default());
        assert_eq!(game_loop.tick(5.0).stats.dt, 0.1);
        assert_eq!(game_loop.tick(-1.0).stats.dt, 0.0);
        assert_eq!(game_loop.tick(f32::NAN).stats.dt, 0.0);
        assert_eq!(game_loop.tick(0.016).stats.dt, 0.016);
        assert_eq!(game_loop.frame_count(), 4);
        assert_eq!(game_loop.world().tick(), 4);
    }

    #[test]
    fn test_stats_accumulator() {
        let mut acc = FrameStatsAccumulator::new(60);

        for i in 0..100 {
            acc.record(FrameStats {
                frame: i,
                total_us: 10_000 + (i * 100),
                systems_us: 5_000,
                events_processed: 2,
                ..FrameStats::default()
            });
        }

        assert_eq!(acc.frames_recorded, 100);
        assert_eq!(acc.events_processed, 200);
        assert!(acc.avg_fps() > 50.0);
        assert!(acc.avg_fps() < 100.0);
        assert!(acc.over_budget_ratio() > 0.0);
    }
}
