//! # NIMBUS Event System
//!
//! Notifications raised by systems during a tick and read by the host after
//! it, over a bounded crossbeam channel.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  Systems    │─────>│   Event     │─────>│    Host     │
//! │ (physics,   │      │   Channel   │      │ (game loop, │
//! │  animation) │      │  (bounded)  │      │  stage)     │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Sends never block a tick: when the channel is full the event is dropped
//! and a warning is logged.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use nimbus_core::EntityId;

/// Events raised by systems.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    // =========================================================================
    // Physics
    // =========================================================================
    /// Two colliders overlap this tick.
    ///
    /// Emitted once per overlapping unordered pair, `a` before `b` in query
    /// order.
    Collision {
        /// First entity of the pair.
        a: EntityId,
        /// Second entity of the pair.
        b: EntityId,
        /// Either collider is a trigger.
        trigger: bool,
    },

    // =========================================================================
    // Animation
    // =========================================================================
    /// A non-looping clip reached its end.
    AnimationCompleted {
        /// Entity whose clip finished.
        entity: EntityId,
        /// Clip that finished.
        clip: String,
    },

    // =========================================================================
    // Lifecycle
    // =========================================================================
    /// An entity was registered by a stage.
    EntitySpawned {
        /// Entity ID.
        entity: EntityId,
        /// Initial position.
        position: [f32; 3],
    },

    /// An entity was removed by a stage.
    EntityDespawned {
        /// Entity ID.
        entity: EntityId,
    },

    /// An entity's health reached zero.
    EntityDied {
        /// Entity that died.
        entity: EntityId,
        /// Position of death.
        position: [f32; 3],
    },
}

/// Bounded event channel.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a bus that holds at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender/receiver pair on a fresh bus.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!("event bus full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("event bus has no receivers");
                false
            }
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
