//! Product catalog

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, CatalogItem};

use super::state::{StateCell, StoreState};
use super::OpError;

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Serialize)]
struct PageQuery {
    offset: u32,
    limit: u32,
}

/// Holds the most recently fetched page of products
#[derive(Clone)]
pub struct ProductCatalog {
    client: ApiClient,
    state: Arc<StateCell<Vec<CatalogItem>>>,
}

impl ProductCatalog {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(StateCell::new("products", Vec::new())),
        }
    }

    pub fn snapshot(&self) -> StoreState<Vec<CatalogItem>> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<Vec<CatalogItem>>> {
        self.state.subscribe()
    }

    pub async fn settled(&self) -> StoreState<Vec<CatalogItem>> {
        self.state.settled().await
    }

    /// `fetch_products` with the default page (offset 0, limit 10)
    pub async fn fetch_first_page(&self) -> Result<usize, OpError> {
        self.fetch_products(DEFAULT_OFFSET, DEFAULT_LIMIT).await
    }

    /// Replaces the held list with one page of products.
    ///
    /// Pages are not accumulated; on failure the previous list stays.
    /// Returns the number of items now held.
    pub async fn fetch_products(&self, offset: u32, limit: u32) -> Result<usize, OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!(offset, limit, "fetching products");

        let page: Vec<CatalogItem> = match self
            .client
            .get_with_query("products", &PageQuery { offset, limit })
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(offset, limit, error = %e, "product fetch failed");
                return Err(guard.fail(OpError::FetchProducts));
            }
        };

        let count = page.len();
        info!(offset, limit, count, "products fetched");
        guard.succeed(move |items| *items = page);
        Ok(count)
    }
}
