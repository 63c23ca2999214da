//! Storefront client - state-and-request layer
//!
//! Three state containers mediate between screens and the storefront
//! REST API:
//! - `AuthSession` for login, signup and logout
//! - `ProductCatalog` for paged product listing
//! - `UserDirectory` for user listing, creation and deletion
//!
//! `AppState` owns one of each and is passed to the presentation layer.

pub mod api;
pub mod app;
pub mod config;
pub mod store;

pub use app::{AppState, Navigator, Route};
pub use config::Config;
pub use store::{AuthSession, OpError, ProductCatalog, StoreState, UserDirectory};
