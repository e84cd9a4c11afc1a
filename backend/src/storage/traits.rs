//! # Storage Traits
//!
//! Storage abstraction traits that allow different backends to be used
//! interchangeably by the domain layer. All operations are synchronous.

use anyhow::Result;

use crate::domain::models::child::Child as DomainChild;
use crate::domain::models::reading::Reading as DomainReading;

/// Trait defining the interface for child profile storage operations
pub trait ChildStorage: Send + Sync {
    /// Store a new child
    fn store_child(&self, child: &DomainChild) -> Result<()>;

    /// Retrieve a specific child by ID, including soft-deleted ones
    fn get_child(&self, child_id: &str) -> Result<Option<DomainChild>>;

    /// List all children ordered by name, including soft-deleted ones
    fn list_children(&self) -> Result<Vec<DomainChild>>;

    /// Update an existing child
    fn update_child(&self, child: &DomainChild) -> Result<()>;

    /// Get the currently active child ID
    fn get_active_child(&self) -> Result<Option<String>>;

    /// Set the currently active child
    fn set_active_child(&self, child_id: &str) -> Result<()>;

    /// Clear the active child selection
    fn clear_active_child(&self) -> Result<()>;
}

/// Trait defining the interface for saved-reading storage operations
pub trait ReadingStorage: Send + Sync {
    /// Store a reading snapshot
    fn store_reading(&self, reading: &DomainReading) -> Result<()>;

    /// List saved readings for a child, newest first
    fn list_readings(&self, child_id: &str) -> Result<Vec<DomainReading>>;

    /// Delete a reading by ID
    /// Returns true if the reading was found and deleted, false otherwise
    fn delete_reading(&self, reading_id: &str) -> Result<bool>;
}
