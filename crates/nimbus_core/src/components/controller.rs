//! Input snapshots for player- and AI-driven entities.

use serde::{Deserialize, Serialize};

/// Who writes the controller's inputs each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Written by the input system from the host's input provider.
    Player,
    /// Written by the AI system.
    Ai,
    /// Nobody writes it.
    #[default]
    None,
}

/// One input channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Up.
    Up,
    /// Down.
    Down,
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Basic attack.
    Attack,
    /// Jump.
    Jump,
    /// Special skill.
    Skill,
}

impl Action {
    /// Every channel.
    pub const ALL: [Self; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Attack,
        Self::Jump,
        Self::Skill,
    ];
}

/// The 7-channel boolean input snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Up held.
    pub up: bool,
    /// Down held.
    pub down: bool,
    /// Left held.
    pub left: bool,
    /// Right held.
    pub right: bool,
    /// Attack held.
    pub attack: bool,
    /// Jump held.
    pub jump: bool,
    /// Skill held.
    pub skill: bool,
}

impl InputState {
    /// Reads one channel.
    #[must_use]
    pub const fn get(&self, action: Action) -> bool {
        match action {
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Attack => self.attack,
            Action::Jump => self.jump,
            Action::Skill => self.skill,
        }
    }

    /// Writes one channel.
    pub fn set(&mut self, action: Action, value: bool) {
        let channel = match action {
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Attack => &mut self.attack,
            Action::Jump => &mut self.jump,
            Action::Skill => &mut self.skill,
        };
        *channel = value;
    }

    /// Left or right held.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.left || self.right
    }
}

/// Drives an entity from player input or an AI policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controller {
    /// Who writes `inputs`.
    pub kind: ControllerKind,
    /// Current input snapshot.
    pub inputs: InputState,
    /// AI tier 1–3; anything else behaves as tier 1.
    pub ai_difficulty: u8,
}

impl Controller {
    /// Creates a controller of the given kind with tier-1 difficulty.
    #[must_use]
    pub const fn new(kind: ControllerKind) -> Self {
        Self {
            kind,
            inputs: InputState {
                up: false,
                down: false,
                left: false,
                right: false,
                attack: false,
                jump: false,
                skill: false,
            },
            ai_difficulty: 1,
        }
    }

    /// Creates a player controller.
    #[must_use]
    pub const fn player() -> Self {
        Self::new(ControllerKind::Player)
    }

    /// Creates an AI controller at the given tier.
    #[must_use]
    pub const fn ai(difficulty: u8) -> Self {
        let mut controller = Self::new(ControllerKind::Ai);
        controller.ai_difficulty = difficulty;
        controller
    }

    /// Sets one input channel.
    pub fn set_input(&mut self, action: Action, value: bool) {
        self.inputs.set(action, value);
    }

    /// Releases every input.
    pub fn reset(&mut self) {
        self.inputs = InputState::default();
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerKind::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_every_channel() {
        let mut inputs = InputState::default();
        for action in Action::ALL {
            assert!(!inputs.get(action));
            inputs.set(action, true);
            assert!(inputs.get(action), "{action:?}");
        }
        assert!(inputs.is_moving());
    }

    #[test]
    fn test_reset_clears_inputs() {
        let mut controller = Controller::ai(3);
        controller.set_input(Action::Attack, true);
        controller.reset();
        assert_eq!(controller.inputs, InputState::default());
        assert_eq!(controller.ai_difficulty, 3);
        assert_eq!(controller.kind, ControllerKind::Ai);
    }
}
