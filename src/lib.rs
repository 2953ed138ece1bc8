//! # shortly
//!
//! A small URL shortening service with pluggable storage.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - the mapping entity, the storage trait,
//!   and the background workers
//! - **Application Layer** ([`application`]) - the shortener orchestration
//!   service
//! - **Infrastructure Layer** ([`infrastructure`]) - storage backends
//!   (in-memory and PostgreSQL) and the backend factory
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random short codes over a 62-symbol alphabet, collision-retried on save
//! - Interchangeable volatile (in-memory) and durable (PostgreSQL) backends
//! - Asynchronous, best-effort click accounting off the redirect path
//! - Optional per-mapping expiry with a periodic cleanup pass
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3000"
//! export DB_TYPE="memory"            # or "postgres" + DATABASE_URL
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortenerService;
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::MappingStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{MemoryStore, PgMappingStore, create_store};
    pub use crate::state::AppState;
}
