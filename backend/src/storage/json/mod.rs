//! JSON-file storage backend.
//!
//! Flat JSON documents under a base directory — the explicit-repository
//! replacement for the original app's ad hoc localStorage arrays.

pub mod child_repository;
pub mod connection;
pub mod reading_repository;

pub use child_repository::ChildRepository;
pub use connection::JsonConnection;
pub use reading_repository::ReadingRepository;
