/**
 * Two-Phase Effect Execution
 *
 * Data loading for a render happens in two explicit phases:
 *
 * 1. The resolved page declares its effects into an [`EffectScope`]. Each
 *    effect is spawned on the runtime immediately and leaves a handle.
 * 2. The scope is closed into [`PendingEffects`], which owns the handles.
 *    Closing consumes the scope, so nothing can start another effect for
 *    this render; work already spawned keeps running.
 *
 * [`PendingEffects::settle`] waits for every handle. Partial completion is
 * never observed: the caller gets a [`Settlement`] only once all effects
 * succeeded, failed or panicked.
 *
 * # Failure
 *
 * Effects do not mutate state. They resolve to the actions that should be
 * dispatched, or to an [`EffectError`] whose status is dispatched as the
 * request's result code after all completed actions. A panicking effect
 * counts as a 500.
 */

use std::future::Future;
use std::time::Instant;

use futures_util::future::join_all;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::shared::Action;

/// Result every effect resolves to
pub type EffectResult = Result<Vec<Action>, EffectError>;

/// Ways an effect can fail
#[derive(Debug, Error)]
pub enum EffectError {
    /// The upstream answered with a non-success status
    #[error("upstream {url} returned {status}")]
    Upstream { status: u16, url: String },

    /// No usable response from the upstream
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream body was not the expected JSON
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The effect task panicked or was aborted
    #[error("effect {name} did not complete: {message}")]
    Aborted { name: String, message: String },
}

impl EffectError {
    /// Status recorded in the application state for this failure
    pub fn status(&self) -> u16 {
        match self {
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) => 502,
            Self::Decode(_) | Self::Aborted { .. } => 500,
        }
    }
}

struct Spawned {
    name: String,
    handle: JoinHandle<EffectResult>,
}

/// Collects the effects a page starts during phase 1
#[derive(Default)]
pub struct EffectScope {
    spawned: Vec<Spawned>,
}

impl EffectScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect now and keep its handle
    pub fn spawn<F>(&mut self, name: impl Into<String>, effect: F)
    where
        F: Future<Output = EffectResult> + Send + 'static,
    {
        let name = name.into();
        tracing::debug!(effect = %name, "effect started");
        self.spawned.push(Spawned {
            name,
            handle: tokio::spawn(effect),
        });
    }

    /// Start an effect that immediately yields the given actions
    pub fn dispatch_later(&mut self, name: impl Into<String>, actions: Vec<Action>) {
        self.spawn(name, async move { Ok::<_, EffectError>(actions) });
    }

    pub fn len(&self) -> usize {
        self.spawned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
    }

    /// End phase 1; no effect can be started for this render afterwards
    pub fn close(self) -> PendingEffects {
        PendingEffects {
            spawned: self.spawned,
        }
    }
}

/// Effects that were started and are still being awaited
pub struct PendingEffects {
    spawned: Vec<Spawned>,
}

impl PendingEffects {
    pub fn len(&self) -> usize {
        self.spawned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
    }

    /// Wait until every effect has settled
    pub async fn settle(self) -> Settlement {
        let started = Instant::now();
        let (names, handles): (Vec<_>, Vec<_>) = self
            .spawned
            .into_iter()
            .map(|spawned| (spawned.name, spawned.handle))
            .unzip();

        let joined = join_all(handles).await;

        let outcomes = names
            .into_iter()
            .zip(joined)
            .map(|(name, joined)| {
                let result = match joined {
                    Ok(result) => result,
                    Err(e) => Err(EffectError::Aborted {
                        name: name.clone(),
                        message: e.to_string(),
                    }),
                };
                match result {
                    Ok(actions) => EffectOutcome::Completed { name, actions },
                    Err(error) => {
                        tracing::warn!(effect = %name, status = error.status(), "effect failed: {}", error);
                        EffectOutcome::Failed { name, error }
                    }
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            effects = outcomes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "effects settled"
        );
        Settlement { outcomes }
    }
}

/// Final state of one effect
#[derive(Debug)]
pub enum EffectOutcome {
    Completed { name: String, actions: Vec<Action> },
    Failed { name: String, error: EffectError },
}

impl EffectOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Completed { name, .. } | Self::Failed { name, .. } => name,
        }
    }
}

/// Outcomes of all effects of a render, in declaration order
#[derive(Debug)]
pub struct Settlement {
    pub outcomes: Vec<EffectOutcome>,
}

impl Settlement {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, EffectOutcome::Failed { .. }))
            .count()
    }

    /// Actions to dispatch
    ///
    /// Actions of completed effects come first, in declaration order. If any
    /// effect failed, the status of the first failure is appended last so no
    /// completed effect can overwrite it.
    pub fn into_actions(self) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut failure = None;
        for outcome in self.outcomes {
            match outcome {
                EffectOutcome::Completed { actions: completed, .. } => actions.extend(completed),
                EffectOutcome::Failed { error, .. } => {
                    if failure.is_none() {
                        failure = Some(error.status());
                    }
                }
            }
        }
        actions.extend(failure.map(Action::SetResult));
        actions
    }
}
