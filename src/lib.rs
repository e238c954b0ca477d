//! Dormitory - a dormitory management back end
//!
//! Buildings, dorms and students with capacity-aware allocation, plus
//! session-based user management, served as a JSON API.

pub mod config;
pub mod dao;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
