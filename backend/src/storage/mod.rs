//! # Storage Module
//!
//! Persistence for child profiles and saved readings: trait seams in
//! [`traits`], with a JSON-file implementation in [`json`]. The lookup
//! core never touches this layer; only the services do.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
