//! Property-based tests for the feature toggle store

use proptest::prelude::*;
use ssr_render::shared::state::{reduce, Action};
use ssr_render::shared::toggle::{reduce_store, toggle, ToggleState};
use ssr_render::shared::AppState;

fn toggle_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn toggle_state() -> impl Strategy<Value = ToggleState> {
    prop::collection::btree_map(toggle_name(), any::<bool>(), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn test_flip_twice_restores_value(state in toggle_state(), name in toggle_name()) {
        let once = reduce_store(&state, &toggle(name.clone(), None));
        let twice = reduce_store(&once, &toggle(name.clone(), None));

        prop_assert_eq!(once.is_on(&name), !state.is_on(&name));
        prop_assert_eq!(twice.is_on(&name), state.is_on(&name));
    }

    #[test]
    fn test_other_keys_are_untouched(
        state in toggle_state(),
        name in toggle_name(),
        value in proptest::option::of(any::<bool>()),
    ) {
        let next = reduce_store(&state, &toggle(name.clone(), value));
        for (key, on) in state.iter() {
            if key != name {
                prop_assert_eq!(next.get(key), Some(on));
            }
        }
        for (key, _) in next.iter() {
            prop_assert!(key == name || state.get(key).is_some());
        }
    }

    #[test]
    fn test_set_is_idempotent(state in toggle_state(), name in toggle_name(), value in any::<bool>()) {
        let once = reduce_store(&state, &toggle(name.clone(), Some(value)));
        let twice = reduce_store(&once, &toggle(name.clone(), Some(value)));

        prop_assert_eq!(once.get(&name), Some(value));
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn test_other_actions_leave_store_alone(state in toggle_state(), code in 100u16..600) {
        prop_assert_eq!(&reduce_store(&state, &Action::SetResult(code)), &state);
        prop_assert_eq!(&reduce_store(&state, &Action::Navigate("/x".to_string())), &state);
    }

    #[test]
    fn test_root_reducer_routes_toggles(name in toggle_name()) {
        let initial = AppState::for_request(None, "/");
        let next = reduce(&initial, &toggle(name.clone(), None));

        prop_assert!(next.toggle.store.is_on(&name));
        prop_assert_eq!(&next.result, &initial.result);
        prop_assert_eq!(&next.auth, &initial.auth);
    }
}
