//! Repository trait definitions for the domain layer.
//!
//! The single trait here, [`MappingStore`], defines the contract both
//! storage backends implement. Concrete implementations live in
//! `crate::infrastructure::persistence`; a mock implementation is
//! auto-generated via `mockall` for testing.

pub mod mapping_store;

pub use mapping_store::MappingStore;

#[cfg(test)]
pub use mapping_store::MockMappingStore;
