//! Screen routing driven by the auth session

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

/// Top-level screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login screen, shown while no identity is held
    Login,
    /// Main tabs: product browsing and user management
    Main,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("login"),
            Route::Main => f.write_str("main"),
        }
    }
}

/// Navigation collaborator. Clones share the same current route.
#[derive(Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<Route>>,
}

impl Navigator {
    /// Starts unauthenticated, on the login screen
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Route::Login);
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the current screen
    pub fn replace(&self, route: Route) {
        let previous = self.tx.send_replace(route);
        info!(from = %previous, to = %route, "navigate");
    }

    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
