use glam::Vec3;
use vislab_common::SceneId;

/// A high-level action produced by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Held to move faster.
    Boost,
    /// Switch to (or restart) a scene.
    SelectScene(SceneId),
    NextScene,
    TogglePanel,
    ReleaseMouse,
}

impl Action {
    /// Whether the action matters while held, as opposed to on press.
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Action::MoveForward
                | Action::MoveBackward
                | Action::MoveLeft
                | Action::MoveRight
                | Action::MoveUp
                | Action::MoveDown
                | Action::Boost
        )
    }
}

/// Continuous actions currently held down.
#[derive(Debug, Clone, Default)]
pub struct HeldActions {
    held: Vec<Action>,
}

impl HeldActions {
    pub const BOOST_FACTOR: f32 = 3.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. Returns `true` if the action is newly
    /// pressed and is a one-shot action the caller should handle now.
    pub fn set(&mut self, action: Action, pressed: bool) -> bool {
        let was_held = self.is_held(action);
        if pressed && !was_held {
            self.held.push(action);
        } else if !pressed {
            self.held.retain(|a| *a != action);
        }
        pressed && !was_held && !action.is_continuous()
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Camera-relative movement intent: x = right, y = up, z = forward.
    /// Each component is in [-1, 1].
    pub fn movement(&self) -> Vec3 {
        let axis = |pos: Action, neg: Action| {
            (self.is_held(pos) as i8 - self.is_held(neg) as i8) as f32
        };
        Vec3::new(
            axis(Action::MoveRight, Action::MoveLeft),
            axis(Action::MoveUp, Action::MoveDown),
            axis(Action::MoveForward, Action::MoveBackward),
        )
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.is_held(Action::Boost) {
            Self::BOOST_FACTOR
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_keys_cancel() {
        let mut held = HeldActions::new();
        held.set(Action::MoveLeft, true);
        held.set(Action::MoveRight, true);
        held.set(Action::MoveForward, true);
        assert_eq!(held.movement(), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn release_stops_movement() {
        let mut held = HeldActions::new();
        held.set(Action::MoveUp, true);
        assert_eq!(held.movement().y, 1.0);
        held.set(Action::MoveUp, false);
        assert_eq!(held.movement(), Vec3::ZERO);
    }

    #[test]
    fn one_shot_fires_once_per_press() {
        let mut held = HeldActions::new();
        let select = Action::SelectScene(SceneId::Cube);
        assert!(held.set(select, true));
        // Key repeat.
        assert!(!held.set(select, true));
        held.set(select, false);
        assert!(held.set(select, true));
    }

    #[test]
    fn continuous_actions_never_fire() {
        let mut held = HeldActions::new();
        assert!(!held.set(Action::MoveDown, true));
        assert!(held.is_held(Action::MoveDown));
    }

    #[test]
    fn boost_multiplies_speed() {
        let mut held = HeldActions::new();
        assert_eq!(held.speed_multiplier(), 1.0);
        held.set(Action::Boost, true);
        assert_eq!(held.speed_multiplier(), HeldActions::BOOST_FACTOR);
        held.clear();
        assert_eq!(held.speed_multiplier(), 1.0);
    }
}
