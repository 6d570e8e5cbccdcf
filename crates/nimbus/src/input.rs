//! Player input.
//!
//! The host feeds raw key names into a [`KeyboardInput`]; once per tick the
//! [`InputSystem`] takes a snapshot from its [`InputProvider`] and copies it
//! onto every player controller.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use nimbus_core::{Action, ControllerKind, InputState, System, World};
use serde::{Deserialize, Serialize};

/// Registered name of [`InputSystem`].
pub const INPUT_SYSTEM: &str = "input";

/// Source of the per-tick player input snapshot.
pub trait InputProvider {
    /// Current state of every input channel.
    fn snapshot(&mut self) -> InputState;
}

impl InputProvider for InputState {
    fn snapshot(&mut self) -> InputState {
        *self
    }
}

impl<P: InputProvider> InputProvider for Rc<RefCell<P>> {
    fn snapshot(&mut self) -> InputState {
        self.borrow_mut().snapshot()
    }
}

// ============================================================================
// KEY BINDINGS
// ============================================================================

/// Key name → action table. Key names are matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Action>", into = "BTreeMap<String, Action>")]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl KeyBindings {
    /// A table with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Binds `key` to `action`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: &str, action: Action) {
        self.keys.insert(key.to_lowercase(), action);
    }

    /// Removes the binding for `key`.
    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.keys.remove(&key.to_lowercase())
    }

    /// Action bound to `key`.
    #[must_use]
    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(&key.to_lowercase()).copied()
    }

    /// Keys bound to `action`, in name order.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |&(_, &bound)| bound == action)
            .map(|(key, _)| key.as_str())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (key, action) in [
            ("w", Action::Up),
            ("arrowup", Action::Up),
            ("s", Action::Down),
            ("arrowdown", Action::Down),
            ("a", Action::Left),
            ("arrowleft", Action::Left),
            ("d", Action::Right),
            ("arrowright", Action::Right),
            ("j", Action::Attack),
            ("z", Action::Attack),
            ("k", Action::Jump),
            ("x", Action::Jump),
            ("l", Action::Skill),
            ("c", Action::Skill),
        ] {
            bindings.bind(key, action);
        }
        bindings
    }
}

impl From<BTreeMap<String, Action>> for KeyBindings {
    fn from(keys: BTreeMap<String, Action>) -> Self {
        let mut bindings = Self::empty();
        for (key, action) in keys {
            bindings.bind(&key, action);
        }
        bindings
    }
}

impl From<KeyBindings> for BTreeMap<String, Action> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.keys
    }
}

// ============================================================================
// KEYBOARD
// ============================================================================

/// Held-key tracker fed by the host's key events.
#[derive(Clone, Debug, Default)]
pub struct KeyboardInput {
    bindings: KeyBindings,
    pressed: HashSet<String>,
}

impl KeyboardInput {
    /// Creates a tracker over `bindings` with nothing held.
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    /// Wraps the tracker for sharing between the host and an [`InputSystem`].
    #[must_use]
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Call on key down.
    pub fn press(&mut self, key: &str) {
        self.pressed.insert(key.to_lowercase());
    }

    /// Call on key up.
    pub fn release(&mut self, key: &str) {
        self.pressed.remove(&key.to_lowercase());
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Returns `true` if the key is currently held down.
    #[must_use]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(&key.to_lowercase())
    }

    /// Active bindings.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

impl InputProvider for KeyboardInput {
    fn snapshot(&mut self) -> InputState {
        let mut state = InputState::default();
        for action in self.pressed.iter().filter_map(|key| self.bindings.action_for(key)) {
            state.set(action, true);
        }
        state
    }
}

// ============================================================================
// SYSTEM
// ============================================================================

/// Copies the provider's snapshot onto every player controller.
pub struct InputSystem<P> {
    provider: P,
}

impl<P: InputProvider> InputSystem<P> {
    /// Creates the system over `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: InputProvider> System for InputSystem<P> {
    fn name(&self) -> &str {
        INPUT_SYSTEM
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let snapshot = self.provider.snapshot();
        for (_, controller) in world.storages_mut().controllers.iter_mut() {
            if controller.kind == ControllerKind::Player {
                controller.inputs = snapshot;
            }
        }
    }
}
