/**
 * Embedded State Encoding
 *
 * The page carries the final application state for the client bundle as
 *
 * ```text
 * JSON.parse(decodeURIComponent("<encoded>"))
 * ```
 *
 * where `<encoded>` is the percent-encoded JSON text of the state. The
 * encoded form contains only ASCII letters, digits, `-`, `_`, `.`, `~` and
 * `%XX` escapes, so it cannot close the string literal or the surrounding
 * `<script>` element whatever the state contains.
 */
use crate::shared::error::SharedError;
use crate::shared::state::{is_reserved_slice, AppState};

/// Serialize and percent-encode a state for embedding in a script body
///
/// Fails if an opaque slice shadows a fixed slice: the client would read
/// the slice in its place.
pub fn encode_state(state: &AppState) -> Result<String, SharedError> {
    if let Some(key) = state.slices.keys().find(|key| is_reserved_slice(key)) {
        return Err(SharedError::serialization(format!(
            "slice `{}` collides with a fixed state slice",
            key
        )));
    }
    let json = serde_json::to_string(state)?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Reverse of [`encode_state`], as the client bootstrap performs it
pub fn decode_state(encoded: &str) -> Result<AppState, SharedError> {
    let json = urlencoding::decode(encoded)
        .map_err(|e| SharedError::serialization(format!("invalid percent-encoding: {}", e)))?;
    Ok(serde_json::from_str(&json)?)
}
