//! Composition root and navigation

pub mod navigation;
pub mod state;

pub use navigation::{Navigator, Route};
pub use state::AppState;
