/**
 * Application State
 *
 * This module defines the state object that a render builds up for one
 * request and finally serializes into the page for the client bundle.
 *
 * # Slices
 *
 * - `auth` - raw cookie text forwarded from the request
 * - `result` - HTTP status produced by data loading (unset until effects settle)
 * - `toggle` - feature toggles (see [`crate::shared::toggle`])
 * - `device` - user-agent classification
 * - `router` - the location being rendered
 * - any number of opaque slices owned by pages, flattened into the top level
 *
 * # Updates
 *
 * State only changes through [`Action`]s applied by [`reduce`], the root
 * reducer that delegates to one reducer per slice. [`Store`] is the
 * request-scoped container that owns a state value and applies actions.
 */
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::device::DeviceInfo;
use crate::shared::toggle::{self, ToggleCommand, ToggleStore};

/// HTTP status recorded when data loading succeeded
pub const SUCCESS_STATUS: u16 = 200;

/// Top-level keys owned by the fixed slices; opaque slices cannot use them
pub const RESERVED_SLICE_KEYS: &[&str] = &["auth", "result", "toggle", "device", "router"];

/// Whether `key` names one of the fixed slices
pub fn is_reserved_slice(key: &str) -> bool {
    RESERVED_SLICE_KEYS.contains(&key)
}

/// Every command the request store understands
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Invert or set a feature toggle
    Toggle(ToggleCommand),
    /// Record the client's device class
    SetDevice(DeviceInfo),
    /// Record the outcome of data loading as an HTTP status
    SetResult(u16),
    /// Replace an opaque slice
    SetSlice {
        key: String,
        value: serde_json::Value,
    },
    /// Change the rendered location
    Navigate(String),
}

impl Action {
    pub fn set_slice(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self::SetSlice {
            key: key.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthState {
    pub cookie: String,
}

/// Outcome of data loading
///
/// `None` until an effect reports a status or the pipeline resolves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultState {
    pub api_result_http_code: Option<u16>,
}

impl ResultState {
    pub fn is_unset(&self) -> bool {
        self.api_result_http_code.is_none()
    }

    pub fn is_success(&self) -> bool {
        self.api_result_http_code == Some(SUCCESS_STATUS)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouterState {
    pub location: String,
}

/// The full per-request application state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub result: ResultState,
    pub toggle: ToggleStore,
    pub device: DeviceInfo,
    pub router: RouterState,
    /// Opaque slices owned by pages and effects
    #[serde(flatten)]
    pub slices: BTreeMap<String, serde_json::Value>,
}

impl AppState {
    /// Initial state for a request: cookie and location known, result unset
    pub fn for_request(cookie: Option<&str>, location: impl Into<String>) -> Self {
        Self {
            auth: AuthState {
                cookie: cookie.unwrap_or_default().to_string(),
            },
            router: RouterState {
                location: location.into(),
            },
            ..Self::default()
        }
    }

    pub fn slice(&self, key: &str) -> Option<&serde_json::Value> {
        self.slices.get(key)
    }
}

fn reduce_result(state: &ResultState, action: &Action) -> ResultState {
    match action {
        Action::SetResult(code) => ResultState {
            api_result_http_code: Some(*code),
        },
        _ => state.clone(),
    }
}

fn reduce_device(state: &DeviceInfo, action: &Action) -> DeviceInfo {
    match action {
        Action::SetDevice(info) => *info,
        _ => *state,
    }
}

fn reduce_router(state: &RouterState, action: &Action) -> RouterState {
    match action {
        Action::Navigate(location) => RouterState {
            location: location.clone(),
        },
        _ => state.clone(),
    }
}

fn reduce_slices(
    state: &BTreeMap<String, serde_json::Value>,
    action: &Action,
) -> BTreeMap<String, serde_json::Value> {
    let mut next = state.clone();
    if let Action::SetSlice { key, value } = action {
        if is_reserved_slice(key) {
            tracing::warn!(key = %key, "ignoring slice with a reserved key");
        } else {
            next.insert(key.clone(), value.clone());
        }
    }
    next
}

/// Root reducer
///
/// Each slice reducer sees every action and passes through the ones it does
/// not handle. `auth` is only ever set when the state is created.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        auth: state.auth.clone(),
        result: reduce_result(&state.result, action),
        toggle: toggle::reduce(&state.toggle, action),
        device: reduce_device(&state.device, action),
        router: reduce_router(&state.router, action),
        slices: reduce_slices(&state.slices, action),
    }
}

/// Request-scoped state container
///
/// Owned by exactly one render; never shared between requests.
#[derive(Debug, Clone)]
pub struct Store {
    state: AppState,
    dispatched: usize,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: initial,
            dispatched: 0,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.state = reduce(&self.state, &action);
        self.dispatched += 1;
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of actions applied since creation
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn into_state(self) -> AppState {
        self.state
    }
}
