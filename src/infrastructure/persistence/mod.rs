//! Concrete mapping store backends.
//!
//! # Backends
//!
//! - [`MemoryStore`] - volatile in-process map behind a reader-writer lock
//! - [`PgMappingStore`] - durable PostgreSQL store on a sqlx connection pool
//! - [`create_store`] - configuration-time factory selecting between them

pub mod factory;
pub mod memory_store;
pub mod pg_store;

pub use factory::create_store;
pub use memory_store::MemoryStore;
pub use pg_store::PgMappingStore;
