//! Domain layer - business error taxonomy and the external provider contract
//!
//! No Axum dependencies here; the API layer maps these types onto HTTP.

pub mod errors;
pub mod provider;

pub use errors::DomainError;
pub use provider::{BookDataProvider, ExternalBookData};
