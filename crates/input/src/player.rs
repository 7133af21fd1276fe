use crate::action::Action;
use serde::{Deserialize, Serialize};

/// Upper bound for player energy.
pub const MAX_ENERGY: u32 = 100;

const INTERACT_COST: u32 = 10;
const DANCE_COST: u32 = 5;
const COLLECT_GAIN: u32 = 5;

/// Player stats shown in the overlay.
///
/// Fields are private so the clamping rules cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    energy: u32,
    offerings: u64,
    dialog_text: String,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            energy: MAX_ENERGY,
            offerings: 0,
            dialog_text: String::new(),
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from arbitrary stats. Energy above the maximum is clamped.
    pub fn with_stats(energy: u32, offerings: u64) -> Self {
        Self {
            energy: energy.min(MAX_ENERGY),
            offerings,
            dialog_text: String::new(),
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    /// Energy as a fraction in `[0, 1]`, for progress bars.
    pub fn energy_fraction(&self) -> f32 {
        self.energy as f32 / MAX_ENERGY as f32
    }

    pub fn offerings(&self) -> u64 {
        self.offerings
    }

    /// The last dialog line; empty until the first action.
    pub fn dialog_text(&self) -> &str {
        &self.dialog_text
    }

    pub fn interact(&mut self) {
        self.apply(Action::Interact);
    }

    pub fn collect(&mut self) {
        self.apply(Action::Collect);
    }

    pub fn dance(&mut self) {
        self.apply(Action::Dance);
    }

    /// Apply one action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Interact => {
                self.energy = self.energy.saturating_sub(INTERACT_COST);
            }
            Action::Collect => {
                self.offerings += 1;
                self.energy = (self.energy + COLLECT_GAIN).min(MAX_ENERGY);
            }
            Action::Dance => {
                self.energy = self.energy.saturating_sub(DANCE_COST);
                self.offerings += 2;
            }
        }
        self.dialog_text.clear();
        self.dialog_text.push_str(action.dialog());
        tracing::debug!(
            %action,
            energy = self.energy,
            offerings = self.offerings,
            "applied player action"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_with_no_dialog() {
        let p = PlayerState::new();
        assert_eq!(p.energy(), 100);
        assert_eq!(p.offerings(), 0);
        assert!(p.dialog_text().is_empty());
        assert_eq!(p.energy_fraction(), 1.0);
    }

    #[test]
    fn interact_at_low_energy_floors_at_zero() {
        let mut p = PlayerState::with_stats(5, 0);
        p.interact();
        assert_eq!(p.energy(), 0);
        assert_eq!(p.dialog_text(), "You've connected with the spirit world.");
    }

    #[test]
    fn interact_costs_ten() {
        let mut p = PlayerState::new();
        p.interact();
        assert_eq!(p.energy(), 90);
        assert_eq!(p.offerings(), 0);
    }

    #[test]
    fn collect_three_times() {
        let mut p = PlayerState::with_stats(50, 0);
        p.collect();
        p.collect();
        p.collect();
        assert_eq!(p.offerings(), 3);
        assert_eq!(p.energy(), 65);
        assert_eq!(p.dialog_text(), "You've collected an offering.");
    }

    #[test]
    fn collect_never_exceeds_max_energy() {
        let mut p = PlayerState::with_stats(98, 0);
        for _ in 0..10 {
            p.collect();
            assert!(p.energy() <= MAX_ENERGY);
        }
        assert_eq!(p.energy(), 100);
        assert_eq!(p.offerings(), 10);
    }

    #[test]
    fn dance_costs_five_and_earns_two() {
        let mut p = PlayerState::with_stats(7, 4);
        p.dance();
        assert_eq!(p.energy(), 2);
        assert_eq!(p.offerings(), 6);
        p.dance();
        assert_eq!(p.energy(), 0);
        assert_eq!(p.offerings(), 8);
        assert_eq!(p.dialog_text(), "You dance to honor the dead.");
    }

    #[test]
    fn with_stats_clamps_energy() {
        assert_eq!(PlayerState::with_stats(250, 1).energy(), 100);
    }

    #[test]
    fn mixed_sequence_keeps_invariants() {
        let mut p = PlayerState::new();
        let mut last_offerings = 0;
        let script = [
            Action::Dance,
            Action::Interact,
            Action::Collect,
            Action::Interact,
            Action::Dance,
            Action::Collect,
        ];
        for _ in 0..40 {
            for action in script {
                let before = p.energy();
                p.apply(action);
                assert!(p.energy() <= MAX_ENERGY);
                assert!(p.offerings() >= last_offerings);
                match action {
                    Action::Interact => assert_eq!(p.energy(), before.saturating_sub(10)),
                    Action::Dance => assert_eq!(p.energy(), before.saturating_sub(5)),
                    Action::Collect => assert_eq!(p.energy(), (before + 5).min(100)),
                }
                last_offerings = p.offerings();
            }
        }
        // Each round ends on a collect, so energy settles at 5.
        assert_eq!(p.energy(), 5);
        assert_eq!(p.offerings(), 40 * 6);
    }
}
