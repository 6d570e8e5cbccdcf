//! # Health
//!
//! Hit points with a post-hit invulnerability window.
//!
//! Timestamps are supplied by the caller in milliseconds so the component
//! stays independent of any clock.

use serde::{Deserialize, Serialize};

/// Default invulnerability window after a hit, in milliseconds.
pub const DEFAULT_INVULNERABILITY_MS: u64 = 500;

/// What a call to [`Health::take_damage`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DamageOutcome {
    /// Dead, invulnerable, or inside the window since the last hit.
    Ignored,
    /// Health dropped but stayed above zero.
    Damaged,
    /// This hit brought health to zero.
    Killed,
}

impl DamageOutcome {
    /// Whether the hit was applied.
    #[must_use]
    pub const fn applied(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Hit points of a damageable entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    /// Current hit points, never below zero.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
    /// Ignores every hit while set.
    pub invulnerable: bool,
    /// Window after a hit during which further hits are ignored.
    pub invulnerability_ms: u64,
    /// Timestamp of the last applied hit.
    pub last_hit_ms: Option<u64>,
    /// Set once health reaches zero; cleared only by [`Health::reset`].
    pub dead: bool,
}

impl Health {
    /// Creates full health with the default window.
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
            invulnerability_ms: DEFAULT_INVULNERABILITY_MS,
            last_hit_ms: None,
            dead: false,
        }
    }

    /// Returns a copy with a different invulnerability window.
    #[must_use]
    pub const fn with_invulnerability_ms(mut self, window_ms: u64) -> Self {
        self.invulnerability_ms = window_ms;
        self
    }

    /// Applies a hit at `now_ms`.
    pub fn take_damage(&mut self, amount: f32, now_ms: u64) -> DamageOutcome {
        if self.dead || self.invulnerable || self.in_window(now_ms) {
            return DamageOutcome::Ignored;
        }

        self.current -= amount;
        self.last_hit_ms = Some(now_ms);

        if self.current <= 0.0 {
            self.current = 0.0;
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    fn in_window(&self, now_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.invulnerability_ms)
    }

    /// Restores up to `max`. Does nothing while dead.
    pub fn heal(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    /// Toggles blanket invulnerability.
    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    /// Whether health has reached zero.
    #[inline]
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Current health as a fraction of max.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    /// Full health, alive, vulnerable, no recorded hit.
    pub fn reset(&mut self) {
        self.current = self.max;
        self.dead = false;
        self.invulnerable = false;
        self.last_hit_ms = None;
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}
