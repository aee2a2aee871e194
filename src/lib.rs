pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod selectors;
pub mod services;
pub mod state;

// Convenient re-exports (so call sites can do `setkeeper::Registry`, etc.)
pub use error::{AppResult, DomainError};
pub use selectors::{Selector, Shared};
pub use state::{
    registry::{Registry, View},
    store::{AppState, Store},
};
