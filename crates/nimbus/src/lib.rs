//! # NIMBUS
//!
//! The simulation crate: the per-tick systems that run over the
//! [`nimbus_core`] world, and the loop that drives them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              GAME LOOP                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────┐  │
//! │  │  input   │──>│    ai    │──>│ physics  │──>│ animation │──>│render│  │
//! │  └──────────┘   └──────────┘   └────┬─────┘   └─────┬─────┘   └──────┘  │
//! │                                     │               │                   │
//! │                                     v               v                   │
//! │                               ┌──────────────────────────┐              │
//! │                               │        EVENT BUS         │──> host      │
//! │                               └──────────────────────────┘              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  STAGE: spawns entities, scripts progress, reports completion    │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `ai`: Tiered decision policy for AI controllers
//! - `animation`: Clip state machine
//! - `combat`: Damage routing and death events
//! - `config`: TOML configuration
//! - `events`: Bounded event bus
//! - `game_loop`: Frame orchestration and timing
//! - `input`: Key bindings and the player input system
//! - `physics`: Gravity, clamping and overlap detection
//! - `render`: Draw list and renderer boundary
//! - `stage`: Level script boundary

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ai;
pub mod animation;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod render;
pub mod stage;

pub use nimbus_core as core;

pub use ai::{AiSystem, AiTier};
pub use animation::AnimationSystem;
pub use combat::apply_damage;
pub use config::{
    AiConfig, AnimationConfig, EventConfig, GameLoopConfig, PhysicsConfig, SimulationConfig,
};
pub use error::{NimbusError, NimbusResult};
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use game_loop::{FrameReport, FrameStats, FrameStatsAccumulator, GameLoop};
pub use input::{InputProvider, InputSystem, KeyBindings, KeyboardInput};
pub use physics::PhysicsSystem;
pub use render::{draw_list, DrawItem, RenderSystem, Renderer, Viewport};
pub use stage::{Stage, StageRoster};
