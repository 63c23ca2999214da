//! Authentication session

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use crate::api::models::{Credentials, TokenResponse};
use crate::api::{ApiClient, ApiError, Identity, NewDirectoryEntry};
use crate::app::navigation::{Navigator, Route};

use super::state::{StateCell, StoreState};
use super::OpError;

/// Holds at most one authenticated identity
#[derive(Clone)]
pub struct AuthSession {
    client: ApiClient,
    navigator: Navigator,
    avatar_base_url: Arc<str>,
    state: Arc<StateCell<Option<Identity>>>,
}

impl AuthSession {
    pub fn new(client: ApiClient, navigator: Navigator, avatar_base_url: &str) -> Self {
        Self {
            client,
            navigator,
            avatar_base_url: Arc::from(avatar_base_url),
            state: Arc::new(StateCell::new("auth", None)),
        }
    }

    pub fn snapshot(&self) -> StoreState<Option<Identity>> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<Option<Identity>>> {
        self.state.subscribe()
    }

    pub async fn settled(&self) -> StoreState<Option<Identity>> {
        self.state.settled().await
    }

    /// Currently authenticated identity, if any
    pub fn identity(&self) -> Option<Identity> {
        self.state.snapshot().data
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Exchanges credentials for a token, then the token for a profile.
    ///
    /// Every failure is reported as `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!(email, "login started");

        match self.authenticate(email, password).await {
            Ok(identity) => {
                info!(user_id = identity.id, "login succeeded");
                let held = identity.clone();
                guard.succeed(move |slot| *slot = Some(held));
                self.navigator.replace(Route::Main);
                Ok(identity)
            }
            Err(e) => {
                warn!(email, error = %e, status = ?e.status(), "login failed");
                Err(guard.fail(OpError::InvalidCredentials))
            }
        }
    }

    /// Creates an account with a generated avatar, then logs into it.
    ///
    /// An account that was created but could not be logged into is
    /// reported like any other failure.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Identity, OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!(email, name, "signup started");

        let avatar = match avatar_url(&self.avatar_base_url, name) {
            Ok(avatar) => avatar,
            Err(e) => {
                warn!(error = %e, "invalid avatar base URL");
                return Err(guard.fail(OpError::RegistrationFailed));
            }
        };

        let account = NewDirectoryEntry {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            avatar,
        };

        if let Err(e) = self.client.post_discard("users", &account).await {
            warn!(email, error = %e, "account creation failed");
            return Err(guard.fail(OpError::RegistrationFailed));
        }

        match self.authenticate(email, password).await {
            Ok(identity) => {
                info!(user_id = identity.id, "signup succeeded");
                let held = identity.clone();
                guard.succeed(move |slot| *slot = Some(held));
                self.navigator.replace(Route::Main);
                Ok(identity)
            }
            Err(e) => {
                warn!(email, error = %e, "login after signup failed");
                Err(guard.fail(OpError::RegistrationFailed))
            }
        }
    }

    /// Forgets the identity locally; the server is not contacted
    pub fn logout(&self) {
        self.state.update(|slot| *slot = None);
        info!("logged out");
        self.navigator.replace(Route::Login);
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        let token: TokenResponse = self
            .client
            .post("auth/login", &Credentials { email, password })
            .await?;

        self.client
            .get_authorized("auth/profile", &token.access_token)
            .await
    }
}

/// Placeholder avatar URL rendering the user's name.
///
/// Spaces in the name are sent as `%20`, never `+`.
pub fn avatar_url(base: &str, name: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base)?;
    let encoded = form_urlencoded::byte_serialize(name.as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&name={encoded}"),
        _ => format!("name={encoded}"),
    };
    url.set_query(Some(&query));
    Ok(url.into())
}
