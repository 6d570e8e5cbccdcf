//! # Animation State Machine
//!
//! Picks each entity's clip from its controller and steps frames on a fixed
//! tick stride.
//!
//! ## Clips
//!
//! Selection is by priority, highest first:
//!
//! - **skill**: one-shot, ×1.5
//! - **attack**: one-shot, ×1.2
//! - **jump**: one-shot, ×1.0
//! - **run** (left or right held): looping, ×1.0
//! - **idle**: looping, ×0.8
//!
//! A transition only fires when the selected clip differs from the active
//! one, so holding a button never restarts its clip. Paused and finished
//! animations are left alone until something resumes them.

use nimbus_core::{Animation, ComponentKind, ComponentStorages, InputState, System, World};

use crate::config::AnimationConfig;
use crate::events::{EventSender, GameEvent};

/// Registered name of [`AnimationSystem`].
pub const ANIMATION_SYSTEM: &str = "animation";

/// Playback parameters for one clip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipSpec {
    /// Clip name.
    pub name: &'static str,
    /// Wraps at the end.
    pub looping: bool,
    /// Frame speed multiplier.
    pub speed: f32,
}

/// Special skill.
pub const SKILL: ClipSpec = ClipSpec { name: "skill", looping: false, speed: 1.5 };
/// Basic attack.
pub const ATTACK: ClipSpec = ClipSpec { name: "attack", looping: false, speed: 1.2 };
/// Jump.
pub const JUMP: ClipSpec = ClipSpec { name: "jump", looping: false, speed: 1.0 };
/// Horizontal movement.
pub const RUN: ClipSpec = ClipSpec { name: "run", looping: true, speed: 1.0 };
/// No input.
pub const IDLE: ClipSpec = ClipSpec { name: "idle", looping: true, speed: 0.8 };

/// Highest-priority clip for an input snapshot.
#[must_use]
pub const fn select_clip(inputs: &InputState) -> ClipSpec {
    if inputs.skill {
        SKILL
    } else if inputs.attack {
        ATTACK
    } else if inputs.jump {
        JUMP
    } else if inputs.is_moving() {
        RUN
    } else {
        IDLE
    }
}

/// Switches `animation` to the clip `inputs` selects.
///
/// Returns `true` if a transition fired.
pub fn apply_transition(animation: &mut Animation, inputs: &InputState) -> bool {
    let clip = select_clip(inputs);
    animation.play(clip.name, clip.looping, clip.speed)
}

/// Clip selection and frame stepping.
pub struct AnimationSystem {
    stride: u64,
    tick: u64,
    events: EventSender,
}

impl AnimationSystem {
    /// Creates the system, reporting finished clips on `events`.
    #[must_use]
    pub fn new(config: &AnimationConfig, events: EventSender) -> Self {
        Self {
            stride: u64::from(config.stride.max(1)),
            tick: 0,
            events,
        }
    }

    /// Number of updates run so far.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether the current tick steps frames.
    fn advancing(&self) -> bool {
        self.tick % self.stride == 0
    }
}

impl System for AnimationSystem {
    fn name(&self) -> &str {
        ANIMATION_SYSTEM
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.tick += 1;
        let advancing = self.advancing();

        let ids = world.entities_with(&[ComponentKind::Animation]);
        let ComponentStorages {
            animations,
            controllers,
            ..
        } = world.storages_mut();

        for id in ids {
            let Some(animation) = animations.get_mut(id).filter(|a| a.playing) else {
                continue;
            };

            if let Some(controller) = controllers.get(id) {
                if apply_transition(animation, &controller.inputs) {
                    tracing::trace!("entity {} -> clip `{}`", id, animation.clip);
                }
            }

            if advancing && animation.advance_frame() && animation.notify_on_complete {
                tracing::debug!("entity {} finished clip `{}`", id, animation.clip);
                self.events.send(GameEvent::AnimationCompleted {
                    entity: id,
                    clip: animation.clip.clone(),
                });
            }
        }
    }
}
