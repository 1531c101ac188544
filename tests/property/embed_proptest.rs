//! Property-based tests for the embedded state encoding

use proptest::prelude::*;
use ssr_render::shared::embed::{decode_state, encode_state};
use ssr_render::shared::state::{reduce, Action};
use ssr_render::shared::{toggle, AppState};

proptest! {
    #[test]
    fn test_encoded_state_decodes_to_itself(
        cookie in ".{0,40}",
        location in "/[ -~]{0,30}",
        text in ".{0,60}",
        code in 100u16..600,
        name in "[a-z]{1,6}",
    ) {
        let mut state = AppState::for_request(Some(cookie.as_str()), location);
        state = reduce(&state, &Action::SetResult(code));
        state = reduce(&state, &toggle(name, None));
        state = reduce(&state, &Action::set_slice("note", serde_json::Value::String(text)));

        let encoded = encode_state(&state).unwrap();
        prop_assert_eq!(decode_state(&encoded).unwrap(), state);
    }

    #[test]
    fn test_encoded_state_cannot_leave_script(text in ".{0,60}") {
        let state = reduce(
            &AppState::for_request(None, "/"),
            &Action::set_slice("note", serde_json::Value::String(text)),
        );
        let encoded = encode_state(&state).unwrap();

        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)));
    }
}
