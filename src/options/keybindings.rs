use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable character bindings mapping camera actions to keys.
pub struct KeybindingOptions {
    /// Maps action → key character (e.g. `FlyTo` → `"f"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key character → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<char, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::FlyTo, "f".into()),
            (KeyAction::ResetCamera, "r".into()),
            (KeyAction::Pick, "p".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key character → action).
    ///
    /// Bindings that are not exactly one character are ignored.
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            if let Some(ch) = single_char(key) {
                let _ = self.key_to_action.insert(ch, *action);
            }
        }
    }

    /// Look up the action for a key character.
    #[must_use]
    pub fn lookup(&self, key: char) -> Option<KeyAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Iterate over `(character, action)` pairs of the valid bindings.
    pub fn iter(&self) -> impl Iterator<Item = (char, KeyAction)> + '_ {
        self.key_to_action.iter().map(|(ch, action)| (*ch, *action))
    }

    /// Names of bindings whose key is not a single character.
    #[must_use]
    pub(crate) fn invalid_bindings(&self) -> Vec<String> {
        let mut bad: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, key)| single_char(key).is_none())
            .map(|(action, key)| format!("{action:?} = {key:?}"))
            .collect();
        bad.sort();
        bad
    }

    /// Characters bound to more than one action.
    #[must_use]
    pub(crate) fn duplicate_keys(&self) -> Vec<String> {
        let mut by_char: HashMap<char, Vec<String>> = HashMap::new();
        for (action, key) in &self.bindings {
            if let Some(ch) = single_char(key) {
                by_char.entry(ch).or_default().push(format!("{action:?}"));
            }
        }
        let mut clashes: Vec<String> = by_char
            .into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(ch, mut actions)| {
                actions.sort();
                format!("{ch:?} -> {}", actions.join(", "))
            })
            .collect();
        clashes.sort();
        clashes
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
