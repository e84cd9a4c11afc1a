//! # Cardology Backend
//!
//! Backend for the "Decode Your Kid" card reading application. The core of
//! the crate is the pure lookup pipeline in [`domain::cards`]:
//! birthdate -> birth card -> (birth card, age) -> yearly forecast ->
//! seven dated planetary periods. Around it sit the child-profile and
//! reading services, a JSON-file storage layer behind trait seams, and an
//! axum REST surface.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod rest;
pub mod storage;

pub use storage::json::JsonConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub child_service: domain::child_service::ChildService,
    pub reading_service: domain::reading_service::ReadingService,
}

impl Backend {
    /// Create a new backend instance with all services, persisting under
    /// the given data directory.
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_directory)?);

        let child_service = domain::child_service::ChildService::new(connection.clone());
        let reading_service = domain::reading_service::ReadingService::new(connection);

        Ok(Backend {
            child_service,
            reading_service,
        })
    }
}
