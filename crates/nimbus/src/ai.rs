//! # AI Decision System
//!
//! Writes the input snapshot of every AI-controlled entity from a tiered
//! policy keyed on its offset to the player.
//!
//! ## Tiers
//!
//! | Tier | Movement                          | Attack / skill                       | Jump                        |
//! |------|-----------------------------------|--------------------------------------|-----------------------------|
//! | 1    | 10% chance per tick to re-roll    | 50% when \|dx\| < 100                | re-rolled with movement     |
//! | 2    | chase with a 50-unit dead zone    | 30% when \|dx\| < 100                | 5% every tick               |
//! | 3    | chase with an 80-unit dead zone   | 40% / 10% when \|dx\| < 120, \|dy\| < 50 | 20% when player is above |
//!
//! The policies are memoryless functions over any [`Rng`], so they can be
//! driven by a seeded generator in production and a mock one in tests.

use nimbus_core::{ComponentKind, ComponentStorages, ControllerKind, EntityId, InputState, System, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::AiConfig;

/// Registered name of [`AiSystem`].
pub const AI_SYSTEM: &str = "ai";

// ============================================================================
// POLICY
// ============================================================================

/// Policy selected by a controller's difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiTier {
    /// Random wandering with opportunistic attacks.
    Easy,
    /// Chases the player and attacks in range.
    Medium,
    /// Chases, uses skills and jumps toward a higher player.
    Hard,
}

impl AiTier {
    /// Maps a difficulty value to a tier; unknown values fall back to easy.
    #[must_use]
    pub const fn from_difficulty(difficulty: u8) -> Self {
        match difficulty {
            2 => Self::Medium,
            3 => Self::Hard,
            _ => Self::Easy,
        }
    }
}

/// Offset from the player to the AI entity (`self - player`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    /// Horizontal offset; positive when the player is to the left.
    pub dx: f32,
    /// Vertical offset; positive when the player is above.
    pub dy: f32,
}

/// Applies one tick of `tier`'s policy to `inputs`.
pub fn decide<R: Rng + ?Sized>(tier: AiTier, offset: Offset, inputs: &mut InputState, rng: &mut R) {
    match tier {
        AiTier::Easy => easy(offset, inputs, rng),
        AiTier::Medium => medium(offset, inputs, rng),
        AiTier::Hard => hard(offset, inputs, rng),
    }
}

fn easy<R: Rng + ?Sized>(offset: Offset, inputs: &mut InputState, rng: &mut R) {
    if rng.gen_bool(0.1) {
        inputs.left = rng.gen_bool(0.5);
        inputs.right = !inputs.left;
        inputs.attack = rng.gen_bool(0.3);
        inputs.jump = rng.gen_bool(0.1);
    }

    if offset.dx.abs() < 100.0 {
        inputs.attack = rng.gen_bool(0.5);
    }
}

fn medium<R: Rng + ?Sized>(offset: Offset, inputs: &mut InputState, rng: &mut R) {
    chase(offset.dx, 50.0, inputs);
    inputs.attack = offset.dx.abs() < 100.0 && rng.gen_bool(0.3);
    inputs.jump = rng.gen_bool(0.05);
}

fn hard<R: Rng + ?Sized>(offset: Offset, inputs: &mut InputState, rng: &mut R) {
    chase(offset.dx, 80.0, inputs);

    if offset.dx.abs() < 120.0 && offset.dy.abs() < 50.0 {
        inputs.attack = rng.gen_bool(0.4);
        inputs.skill = rng.gen_bool(0.1);
    } else {
        inputs.attack = false;
        inputs.skill = false;
    }

    inputs.jump = offset.dy > 100.0 && offset.dx.abs() < 200.0 && rng.gen_bool(0.2);
}

/// Steers toward the player outside a dead zone of `reach` units.
fn chase(dx: f32, reach: f32, inputs: &mut InputState) {
    inputs.left = dx > reach;
    inputs.right = dx < -reach;
}

// ============================================================================
// SYSTEM
// ============================================================================

/// Drives every AI controller toward the player.
pub struct AiSystem<R = ChaCha8Rng> {
    rng: R,
}

impl AiSystem<ChaCha8Rng> {
    /// Creates the system with a generator seeded from `config`.
    #[must_use]
    pub fn new(config: &AiConfig) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> AiSystem<R> {
    /// Creates the system over an arbitrary generator.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

/// The first player in column order, with its position.
///
/// Returns `None` if there is no player or that first player has no
/// transform; later players are never considered.
fn find_player(world: &World) -> Option<(EntityId, [f32; 2])> {
    let storages = world.storages();
    let (id, _) = storages
        .controllers
        .iter()
        .find(|(_, controller)| controller.kind == ControllerKind::Player)?;
    let position = storages.transforms.get(id)?.position;
    Some((id, [position.x, position.y]))
}

impl<R: Rng> System for AiSystem<R> {
    fn name(&self) -> &str {
        AI_SYSTEM
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let Some((player, [px, py])) = find_player(world) else {
            return;
        };

        let ids = world.entities_with(&[ComponentKind::Controller, ComponentKind::Transform]);
        let ComponentStorages {
            transforms,
            controllers,
            healths,
            ..
        } = world.storages_mut();

        for id in ids {
            if id == player || healths.get(id).is_some_and(|health| health.is_dead()) {
                continue;
            }
            let (Some(controller), Some(transform)) = (controllers.get_mut(id), transforms.get(id))
            else {
                continue;
            };
            if controller.kind != ControllerKind::Ai {
                continue;
            }

            let offset = Offset {
                dx: transform.position.x - px,
                dy: transform.position.y - py,
            };
            let tier = AiTier::from_difficulty(controller.ai_difficulty);
            decide(tier, offset, &mut controller.inputs, &mut self.rng);
        }
    }
}
