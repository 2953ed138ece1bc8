//! HTTP request handlers.

pub mod health;
pub mod mappings;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use mappings::{delete_mapping_handler, list_mappings_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
