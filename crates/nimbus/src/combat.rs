//! # Combat
//!
//! Routes damage through an entity's [`Health`] and reports deaths on the
//! event bus.

use nimbus_core::{DamageOutcome, EntityId, Health, Transform, World};

use crate::events::{EventSender, GameEvent};

/// Hits `target` for `amount` at `now_ms`.
///
/// Returns `None` if the target has no health. A killing blow emits
/// [`GameEvent::EntityDied`].
pub fn apply_damage(
    world: &mut World,
    target: EntityId,
    amount: f32,
    now_ms: u64,
    events: &EventSender,
) -> Option<DamageOutcome> {
    let outcome = world.get_mut::<Health>(target)?.take_damage(amount, now_ms);

    if outcome == DamageOutcome::Killed {
        let position = world
            .get::<Transform>(target)
            .map_or([0.0; 3], |transform| transform.position.to_array());
        tracing::info!("entity {} died", target);
        events.send(GameEvent::EntityDied {
            entity: target,
            position,
        });
    }
    Some(outcome)
}
