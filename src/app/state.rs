//! Application state handed to the presentation layer

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::app::navigation::Navigator;
use crate::config::Config;
use crate::store::{AuthSession, ProductCatalog, UserDirectory};

/// One instance per client session; clones share every container
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub navigator: Navigator,
    pub auth: AuthSession,
    pub products: ProductCatalog,
    pub users: UserDirectory,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let config = Arc::new(config);

        // One HTTP client shared by all containers
        let api = ApiClient::new(&config)?;

        let navigator = Navigator::new();
        let auth = AuthSession::new(api.clone(), navigator.clone(), &config.avatar_base_url);
        let products = ProductCatalog::new(api.clone());
        let users = UserDirectory::new(api);

        Ok(Self {
            config,
            navigator,
            auth,
            products,
            users,
        })
    }
}
