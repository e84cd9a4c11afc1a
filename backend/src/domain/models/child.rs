use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a child profile in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birthdate: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag: profiles are deactivated, never removed.
    pub is_active: bool,
}

impl Child {
    /// Generate a unique ID for a child
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("child::{}", timestamp_millis)
    }
}

/// Represents the active child, which could be None if no child is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveChild {
    pub child: Option<Child>,
}
