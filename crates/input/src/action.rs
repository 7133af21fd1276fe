use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete player action.
///
/// The overlay buttons, keyboard shortcuts and CLI scripts all produce
/// actions; only `PlayerState::apply` consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Commune with the spirits. Costs energy.
    Interact,
    /// Pick up an offering. Restores some energy.
    Collect,
    /// Dance for the dead. Costs energy, earns two offerings.
    Dance,
}

impl Action {
    pub const ALL: [Action; 3] = [Self::Interact, Self::Collect, Self::Dance];

    /// Button caption shown in the overlay.
    pub fn label(self) -> &'static str {
        match self {
            Self::Interact => "Interact",
            Self::Collect => "Collect",
            Self::Dance => "Dance",
        }
    }

    /// Dialog line shown after the action runs.
    pub fn dialog(self) -> &'static str {
        match self {
            Self::Interact => "You've connected with the spirit world.",
            Self::Collect => "You've collected an offering.",
            Self::Dance => "You dance to honor the dead.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interact => "interact",
            Self::Collect => "collect",
            Self::Dance => "dance",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action {0:?} (expected interact, collect or dance)")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interact" | "i" => Ok(Self::Interact),
            "collect" | "c" => Ok(Self::Collect),
            "dance" | "d" => Ok(Self::Dance),
            _ => Err(ActionParseError(s.to_string())),
        }
    }
}

/// Parse a comma-separated action script such as `"interact,collect,dance"`.
pub fn parse_script(script: &str) -> Result<Vec<Action>, ActionParseError> {
    script
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Keyboard shortcuts for the three actions, keyed by character.
///
/// Kept independent of the windowing crate so every front end can share it.
#[derive(Debug, Clone)]
pub struct ActionBindings {
    bindings: Vec<(char, Action)>,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                ('i', Action::Interact),
                ('c', Action::Collect),
                ('d', Action::Dance),
            ],
        }
    }
}

impl ActionBindings {
    /// Rebind `key` to `action`, replacing any previous binding for either.
    pub fn bind(&mut self, key: char, action: Action) {
        let key = key.to_ascii_lowercase();
        self.bindings.retain(|(k, a)| *k != key && *a != action);
        self.bindings.push((key, action));
        tracing::debug!(%key, %action, "bound action key");
    }

    /// Resolve a pressed key, case-insensitively.
    pub fn resolve(&self, key: char) -> Option<Action> {
        let key = key.to_ascii_lowercase();
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, a)| *a)
    }

    /// The key bound to `action`, used for button hints.
    pub fn key_for(&self, action: Action) -> Option<char> {
        self.bindings
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(k, _)| k.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_shorthands() {
        assert_eq!("interact".parse::<Action>(), Ok(Action::Interact));
        assert_eq!(" Collect ".parse::<Action>(), Ok(Action::Collect));
        assert_eq!("d".parse::<Action>(), Ok(Action::Dance));
        assert!("sing".parse::<Action>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for action in Action::ALL {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn script_skips_empty_entries() {
        let actions = parse_script("interact,,collect, dance,").unwrap();
        assert_eq!(
            actions,
            vec![Action::Interact, Action::Collect, Action::Dance]
        );
    }

    #[test]
    fn script_reports_bad_entry() {
        let err = parse_script("collect,sleep").unwrap_err();
        assert_eq!(err, ActionParseError("sleep".into()));
    }

    #[test]
    fn default_bindings_resolve_case_insensitively() {
        let b = ActionBindings::default();
        assert_eq!(b.resolve('I'), Some(Action::Interact));
        assert_eq!(b.resolve('c'), Some(Action::Collect));
        assert_eq!(b.resolve('x'), None);
        assert_eq!(b.key_for(Action::Dance), Some('D'));
    }

    #[test]
    fn rebinding_replaces_old_key() {
        let mut b = ActionBindings::default();
        b.bind('e', Action::Interact);
        assert_eq!(b.resolve('e'), Some(Action::Interact));
        assert_eq!(b.resolve('i'), None);
    }
}
