//! Storefront REST API access

pub mod client;
pub mod models;

pub use client::{ApiClient, ApiError};
pub use models::{CatalogItem, Category, DirectoryEntry, Identity, NewDirectoryEntry};
