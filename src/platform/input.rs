//! Keyboard mapping
//!
//! Only two inputs exist: space flaps, Enter toggles the run.

use crate::sim::Action;

/// Map a `KeyboardEvent.key` value to a game action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        " " | "Spacebar" => Some(Action::Jump),
        "Enter" => Some(Action::ToggleRun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_jumps() {
        assert_eq!(action_for_key(" "), Some(Action::Jump));
        // Legacy IE/Edge value
        assert_eq!(action_for_key("Spacebar"), Some(Action::Jump));
    }

    #[test]
    fn test_enter_toggles() {
        assert_eq!(action_for_key("Enter"), Some(Action::ToggleRun));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(action_for_key("Escape"), None);
        assert_eq!(action_for_key("a"), None);
        assert_eq!(action_for_key(""), None);
    }
}
