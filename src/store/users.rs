//! User directory management

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, DirectoryEntry, NewDirectoryEntry};

use super::state::{StateCell, StoreState};
use super::OpError;

/// Holds the directory of user accounts
#[derive(Clone)]
pub struct UserDirectory {
    client: ApiClient,
    state: Arc<StateCell<Vec<DirectoryEntry>>>,
}

impl UserDirectory {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(StateCell::new("users", Vec::new())),
        }
    }

    pub fn snapshot(&self) -> StoreState<Vec<DirectoryEntry>> {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<Vec<DirectoryEntry>>> {
        self.state.subscribe()
    }

    pub async fn settled(&self) -> StoreState<Vec<DirectoryEntry>> {
        self.state.settled().await
    }

    /// Replaces the held list with the server's
    pub async fn fetch_users(&self) -> Result<usize, OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!("fetching users");

        match self.load().await {
            Ok(users) => {
                let count = users.len();
                info!(count, "users fetched");
                guard.succeed(move |held| *held = users);
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "user fetch failed");
                Err(guard.fail(OpError::FetchUsers))
            }
        }
    }

    /// Creates a user, then re-fetches the whole list so that
    /// server-assigned fields show up. Nothing is inserted locally.
    pub async fn create_user(&self, user: &NewDirectoryEntry) -> Result<usize, OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!(email = %user.email, "creating user");

        if let Err(e) = self.client.post_discard("users", user).await {
            warn!(email = %user.email, error = %e, "user creation failed");
            return Err(guard.fail(OpError::CreateUser));
        }
        info!(email = %user.email, "user created");

        // The account exists from here on; only the refresh can still fail.
        match self.load().await {
            Ok(users) => {
                let count = users.len();
                guard.succeed(move |held| *held = users);
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "user refresh after creation failed");
                Err(guard.fail(OpError::FetchUsers))
            }
        }
    }

    /// Deletes a user remotely, then drops it from the local list
    pub async fn delete_user(&self, id: i64) -> Result<(), OpError> {
        let guard = self.state.begin().ok_or(OpError::Busy)?;
        debug!(user_id = id, "deleting user");

        if let Err(e) = self.client.delete(&format!("users/{id}")).await {
            warn!(user_id = id, error = %e, "user deletion failed");
            return Err(guard.fail(OpError::DeleteUser));
        }

        info!(user_id = id, "user deleted");
        guard.succeed(move |held| held.retain(|user| user.id != id));
        Ok(())
    }

    async fn load(&self) -> Result<Vec<DirectoryEntry>, ApiError> {
        self.client.get("users").await
    }
}
