//! # Domain Module
//!
//! Business logic for the card reading application.
//!
//! - **cards**: the pure lookup core (birth card, yearly forecast,
//!   planetary periods, age). No I/O, no clock reads, no shared mutable
//!   state; safe to call from any number of threads.
//! - **child_service**: child profile CRUD, validation, soft delete, and
//!   active-child selection.
//! - **reading_service**: composes the lookup core into complete readings
//!   and snapshots them through the storage layer.

pub mod cards;
pub mod child_service;
pub mod commands;
pub mod models;
pub mod reading_service;

pub use child_service::ChildService;
pub use reading_service::ReadingService;
