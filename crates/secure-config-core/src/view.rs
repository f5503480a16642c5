use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{error, info};

use crate::{ConfigSource, ProtectedConfig};

/// Snapshot of the single load operation driven by [`ViewStateHolder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub loading: bool,
    pub data: Option<ProtectedConfig>,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: true,
            data: None,
            error: None,
        }
    }
}

impl ViewState {
    fn started(&self) -> Self {
        Self {
            loading: true,
            data: self.data.clone(),
            error: None,
        }
    }

    fn succeeded(data: ProtectedConfig) -> Self {
        Self {
            loading: false,
            data: Some(data),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            loading: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Holds the view state and publishes every transition to subscribers.
pub struct ViewStateHolder {
    tx: watch::Sender<ViewState>,
    mounted: AtomicBool,
}

impl ViewStateHolder {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::default());
        Self {
            tx,
            mounted: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    /// Runs the load exactly once per holder. Later calls return the current state untouched.
    pub async fn load(&self, source: &dyn ConfigSource) -> ViewState {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return self.state();
        }

        self.set(self.state().started());
        info!("Starting to fetch config from API...");

        let next = match source.fetch_config().await {
            Ok(config) => {
                info!("Config loaded successfully");
                ViewState::succeeded(config)
            }
            Err(e) => {
                let message = e.to_string();
                error!("Error loading config: {}", message);
                ViewState::failed(format!("Failed to load configuration: {message}"))
            }
        };

        self.set(next.clone());
        next
    }

    fn set(&self, state: ViewState) {
        self.tx.send_replace(state);
    }
}

impl Default for ViewStateHolder {
    fn default() -> Self {
        Self::new()
    }
}
