//! Department service
//!
//! A REST CRUD service for managing departments, backed by a relational
//! table through SeaORM.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
