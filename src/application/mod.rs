//! Application layer services implementing business logic.
//!
//! Orchestrates domain operations by coordinating store calls, validation,
//! and the asynchronous click accounting side effect.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - shorten, resolve,
//!   list, and delete operations over a [`crate::domain::repositories::MappingStore`]

pub mod services;
