/**
 * Feature Toggle Store
 *
 * This module defines the feature-toggle slice of the application state:
 * a mapping from flag name to boolean plus the pure reducer that updates it.
 *
 * # Semantics
 *
 * - A toggle command without a value inverts the flag (absent reads as `false`)
 * - A toggle command with a value sets the flag to exactly that value
 * - Any other action leaves the slice untouched
 *
 * The map only ever contains flags that were toggled or set at least once.
 * Consumers read absent flags as `false` through [`ToggleState::is_on`].
 */
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::state::Action;

/// Action type tag kept for parity with the client bundle's toggle action.
pub const TOGGLE_ACTION: &str = "@@GOLANGCI/TOGGLE";

/// Flag name to boolean mapping
///
/// Backed by a `BTreeMap` so the serialized form is stable across renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ToggleState(BTreeMap<String, bool>);

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a flag, `false` when it was never set
    pub fn is_on(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Raw lookup that distinguishes "never set" from `false`
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, bool)> for ToggleState {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Request to invert or set a single flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleCommand {
    /// Flag name
    pub name: String,
    /// Explicit value; `None` means "invert"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

/// Build a toggle action
///
/// # Example
///
/// ```rust
/// use ssr_render::shared::toggle::{toggle, ToggleStore};
///
/// let store = ToggleStore::default();
/// let store = store.reduce(&toggle("dark_mode", None));
/// assert!(store.store.is_on("dark_mode"));
/// ```
pub fn toggle(name: impl Into<String>, value: Option<bool>) -> Action {
    Action::Toggle(ToggleCommand {
        name: name.into(),
        value,
    })
}

/// Pure update of the flag map
///
/// Returns a new map; the input is never mutated.
pub fn reduce_store(state: &ToggleState, action: &Action) -> ToggleState {
    match action {
        Action::Toggle(command) => {
            let value = command
                .value
                .unwrap_or_else(|| !state.is_on(&command.name));
            let mut next = state.0.clone();
            next.insert(command.name.clone(), value);
            ToggleState(next)
        }
        _ => state.clone(),
    }
}

/// The toggle slice as it appears in the serialized application state
///
/// The slice combines named sub-reducers; `store` is the only one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleStore {
    pub store: ToggleState,
}

impl ToggleStore {
    pub fn reduce(&self, action: &Action) -> Self {
        reduce(self, action)
    }
}

/// Slice reducer combining every toggle sub-reducer
pub fn reduce(state: &ToggleStore, action: &Action) -> ToggleStore {
    ToggleStore {
        store: reduce_store(&state.store, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(pairs: &[(&str, bool)]) -> ToggleState {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_toggle_absent_flag_turns_on() {
        let next = reduce_store(&ToggleState::new(), &toggle("beta", None));
        assert_eq!(next.get("beta"), Some(true));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_toggle_inverts_existing_flag() {
        let next = reduce_store(&state(&[("beta", true)]), &toggle("beta", None));
        assert_eq!(next.get("beta"), Some(false));
    }

    #[test]
    fn test_explicit_value_ignores_prior_state() {
        let prior = state(&[("beta", true)]);
        assert_eq!(reduce_store(&prior, &toggle("beta", Some(true))).get("beta"), Some(true));
        assert_eq!(reduce_store(&prior, &toggle("beta", Some(false))).get("beta"), Some(false));
        assert_eq!(
            reduce_store(&ToggleState::new(), &toggle("beta", Some(false))).get("beta"),
            Some(false)
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let prior = state(&[("beta", true), ("menu", false)]);
        let snapshot = prior.clone();
        let _ = reduce_store(&prior, &toggle("beta", None));
        assert_eq!(prior, snapshot);
    }

    #[test]
    fn test_other_action_is_identity() {
        let prior = state(&[("beta", true)]);
        assert_eq!(reduce_store(&prior, &Action::SetResult(404)), prior);
    }

    #[test]
    fn test_absent_reads_false() {
        let s = ToggleState::new();
        assert!(!s.is_on("anything"));
        assert_eq!(s.get("anything"), None);
    }

    #[test]
    fn test_slice_serializes_under_store_key() {
        let slice = ToggleStore::default().reduce(&toggle("menu", Some(true)));
        let json = serde_json::to_value(&slice).unwrap();
        assert_eq!(json, serde_json::json!({ "store": { "menu": true } }));
    }
}
