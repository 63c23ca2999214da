//! State containers backed by the storefront API

pub mod auth;
pub mod products;
pub mod state;
pub mod users;

pub use auth::AuthSession;
pub use products::ProductCatalog;
pub use state::{StateCell, StoreState};
pub use users::UserDirectory;

/// User-facing failure of a container operation.
///
/// Each operation collapses every underlying failure into one fixed
/// message; the display text is what screens show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration failed")]
    RegistrationFailed,

    #[error("Failed to fetch products")]
    FetchProducts,

    #[error("Failed to fetch users")]
    FetchUsers,

    #[error("Failed to create user")]
    CreateUser,

    #[error("Failed to delete user")]
    DeleteUser,

    /// Another operation on the same container has not settled yet
    #[error("Another request is already in progress")]
    Busy,
}
