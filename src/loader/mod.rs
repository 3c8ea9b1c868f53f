//! One-time loader for the YouTube IFrame player API
//!
//! Any number of callers may ask for the API. The first request injects the
//! bootstrap script; the API counts as loaded only once the script calls back
//! through the [`ReadinessPort`]. Every caller observes the same outcome and
//! a failed injection is never retried.

pub mod injector;

pub use injector::{HttpScriptInjector, ScriptInjector};

use crate::utils::error::{AutotubeError, Result};
use chrono::{DateTime, Utc};
use futures::future::{self, BoxFuture, FutureExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Handle to the ready player API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHandle {
    pub script_url: String,
    pub ready_at: DateTime<Utc>,
}

/// Lifecycle of the shared load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotRequested,
    Pending,
    Ready(ApiHandle),
    Failed(String),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }

    fn outcome(&self) -> Option<Result<ApiHandle>> {
        match self {
            LoadState::Ready(handle) => Some(Ok(handle.clone())),
            LoadState::Failed(reason) => Some(Err(AutotubeError::ApiLoadFailure(reason.clone()))),
            LoadState::NotRequested | LoadState::Pending => None,
        }
    }
}

type SharedState = Arc<watch::Sender<LoadState>>;

/// Settles a load state exactly once. Returns whether this call settled it.
fn settle(state: &SharedState, outcome: LoadState) -> bool {
    state.send_if_modified(|current| {
        if current.is_settled() {
            false
        } else {
            *current = outcome;
            true
        }
    })
}

/// Entry point the loaded script uses to announce the API is ready
#[derive(Clone)]
pub struct ReadinessPort {
    state: SharedState,
    script_url: Arc<str>,
}

impl ReadinessPort {
    /// Mark the API ready. Later signals, or signals after a failure, are
    /// ignored; returns whether this call changed the state.
    pub fn signal_ready(&self) -> bool {
        let handle = ApiHandle {
            script_url: self.script_url.to_string(),
            ready_at: Utc::now(),
        };
        let settled = settle(&self.state, LoadState::Ready(handle));
        if settled {
            info!("YouTube IFrame API ready");
        } else {
            debug!("Ignoring readiness signal, load already settled");
        }
        settled
    }

    /// The port as a plain callback for hosts that register a global hook
    pub fn as_callback(&self) -> Arc<dyn Fn() + Send + Sync> {
        let port = self.clone();
        Arc::new(move || {
            port.signal_ready();
        })
    }
}

/// Future returned by [`ApiLoader::load`]
pub type ApiLoad = BoxFuture<'static, Result<ApiHandle>>;

/// Shared, load-once access to the player API.
///
/// Construct one per process and hand it (behind an `Arc`) to whatever
/// needs the player.
pub struct ApiLoader {
    requested: AtomicBool,
    state: SharedState,
    script_url: String,
    injector: Arc<dyn ScriptInjector>,
}

impl ApiLoader {
    pub fn new(script_url: impl Into<String>, injector: Arc<dyn ScriptInjector>) -> Self {
        let (state, _) = watch::channel(LoadState::NotRequested);
        Self {
            requested: AtomicBool::new(false),
            state: Arc::new(state),
            script_url: script_url.into(),
            injector,
        }
    }

    pub fn readiness_port(&self) -> ReadinessPort {
        ReadinessPort {
            state: self.state.clone(),
            script_url: Arc::from(self.script_url.as_str()),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Request the API.
    ///
    /// Only the first call injects the script, even if a readiness signal
    /// already arrived. Injection proceeds in the background on the current
    /// Tokio runtime; called outside one, `load` fails with `ApiLoadFailure`
    /// and leaves the request open for a later call. Every returned future
    /// resolves with the same handle or fails with the same `ApiLoadFailure`.
    pub fn load(&self) -> ApiLoad {
        if !self.requested.load(Ordering::SeqCst) {
            let runtime = match Handle::try_current() {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!("Player API requested outside a Tokio runtime: {}", e);
                    let err = AutotubeError::ApiLoadFailure(format!("no Tokio runtime: {e}"));
                    return future::ready(Err(err)).boxed();
                }
            };

            if !self.requested.swap(true, Ordering::SeqCst) {
                self.state.send_if_modified(|current| {
                    if *current == LoadState::NotRequested {
                        *current = LoadState::Pending;
                        true
                    } else {
                        false
                    }
                });
                self.inject(&runtime);
            }
        }

        let mut rx = self.state.subscribe();
        async move {
            let outcome = rx
                .wait_for(LoadState::is_settled)
                .await
                .map(|state| state.outcome())
                .map_err(|_| {
                    AutotubeError::ApiLoadFailure("loader dropped before the API became ready".into())
                })?;
            outcome.unwrap_or_else(|| {
                Err(AutotubeError::ApiLoadFailure("load never settled".into()))
            })
        }
        .boxed()
    }

    fn inject(&self, runtime: &Handle) {
        let injector = self.injector.clone();
        let state = self.state.clone();
        let url = self.script_url.clone();

        info!("Injecting player API script {}", url);
        runtime.spawn(async move {
            match injector.inject(&url).await {
                Ok(()) => debug!("Player API script executed, waiting for readiness signal"),
                Err(e) => {
                    error!("Unable to load YouTube IFrame API: {}", e);
                    settle(&state, LoadState::Failed(e.to_string()));
                }
            }
        });
    }
}
