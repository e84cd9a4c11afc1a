use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::child::Child as DomainChild;
use crate::storage::traits::ChildStorage;

/// Intermediate struct for file serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonChild {
    id: String,
    name: String,
    birthdate: String,  // ISO 8601 date (YYYY-MM-DD)
    created_at: String, // RFC 3339 timestamp
    updated_at: String, // RFC 3339 timestamp
    is_active: bool,
}

impl JsonChild {
    fn from_domain(child: &DomainChild) -> Self {
        Self {
            id: child.id.clone(),
            name: child.name.clone(),
            birthdate: child.birthdate.format("%Y-%m-%d").to_string(),
            created_at: child.created_at.to_rfc3339(),
            updated_at: child.updated_at.to_rfc3339(),
            is_active: child.is_active,
        }
    }

    fn to_domain(&self) -> Result<DomainChild> {
        Ok(DomainChild {
            id: self.id.clone(),
            name: self.name.clone(),
            birthdate: NaiveDate::parse_from_str(&self.birthdate, "%Y-%m-%d")
                .with_context(|| format!("Invalid birthdate for child {}", self.id))?,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .with_context(|| format!("Invalid created_at for child {}", self.id))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&self.updated_at)
                .with_context(|| format!("Invalid updated_at for child {}", self.id))?
                .with_timezone(&Utc),
            is_active: self.is_active,
        })
    }
}

/// Marker file recording which child is currently selected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ActiveChildFile {
    child_id: Option<String>,
}

/// JSON-file child repository
#[derive(Clone)]
pub struct ChildRepository {
    connection: Arc<JsonConnection>,
}

impl ChildRepository {
    /// Create a new JSON child repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn load(&self) -> Result<Vec<JsonChild>> {
        self.connection.read_json(&self.connection.children_file())
    }

    fn save(&self, children: &[JsonChild]) -> Result<()> {
        self.connection
            .write_json(&self.connection.children_file(), &children)
    }
}

impl ChildStorage for ChildRepository {
    fn store_child(&self, child: &DomainChild) -> Result<()> {
        let _guard = self.connection.lock_mutations();
        let mut children = self.load()?;

        if children.iter().any(|existing| existing.id == child.id) {
            return Err(anyhow::anyhow!("Child already exists: {}", child.id));
        }

        children.push(JsonChild::from_domain(child));
        self.save(&children)?;

        debug!("Stored child {}", child.id);
        Ok(())
    }

    fn get_child(&self, child_id: &str) -> Result<Option<DomainChild>> {
        let children = self.load()?;
        children
            .iter()
            .find(|child| child.id == child_id)
            .map(JsonChild::to_domain)
            .transpose()
    }

    fn list_children(&self) -> Result<Vec<DomainChild>> {
        let mut children = self
            .load()?
            .iter()
            .map(JsonChild::to_domain)
            .collect::<Result<Vec<_>>>()?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn update_child(&self, child: &DomainChild) -> Result<()> {
        let _guard = self.connection.lock_mutations();
        let mut children = self.load()?;

        let slot = children
            .iter_mut()
            .find(|existing| existing.id == child.id)
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child.id))?;
        *slot = JsonChild::from_domain(child);

        self.save(&children)?;

        debug!("Updated child {}", child.id);
        Ok(())
    }

    fn get_active_child(&self) -> Result<Option<String>> {
        let marker: ActiveChildFile = self
            .connection
            .read_json(&self.connection.active_child_file())?;
        Ok(marker.child_id)
    }

    fn set_active_child(&self, child_id: &str) -> Result<()> {
        let _guard = self.connection.lock_mutations();
        self.connection.write_json(
            &self.connection.active_child_file(),
            &ActiveChildFile {
                child_id: Some(child_id.to_string()),
            },
        )
    }

    fn clear_active_child(&self) -> Result<()> {
        let _guard = self.connection.lock_mutations();
        self.connection.write_json(
            &self.connection.active_child_file(),
            &ActiveChildFile::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> (ChildRepository, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (ChildRepository::new(connection), temp_dir)
    }

    fn sample_child(id: &str, name: &str) -> DomainChild {
        let now = Utc::now();
        DomainChild {
            id: id.to_string(),
            name: name.to_string(),
            birthdate: NaiveDate::from_ymd_opt(2015, 5, 20).unwrap(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    #[test]
    fn test_store_and_get_round_trip() {
        let (repo, _dir) = setup_test();
        let child = sample_child("child::1", "Emma");

        repo.store_child(&child).unwrap();
        let loaded = repo.get_child("child::1").unwrap().unwrap();
        assert_eq!(loaded.id, child.id);
        assert_eq!(loaded.name, "Emma");
        assert_eq!(loaded.birthdate, child.birthdate);
        assert!(loaded.is_active);
    }

    #[test]
    fn test_store_duplicate_id_fails() {
        let (repo, _dir) = setup_test();
        let child = sample_child("child::1", "Emma");
        repo.store_child(&child).unwrap();
        assert!(repo.store_child(&child).is_err());
    }

    #[test]
    fn test_list_children_sorted_by_name() {
        let (repo, _dir) = setup_test();
        repo.store_child(&sample_child("child::1", "Zoe")).unwrap();
        repo.store_child(&sample_child("child::2", "Amy")).unwrap();

        let children = repo.list_children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Amy");
        assert_eq!(children[1].name, "Zoe");
    }

    #[test]
    fn test_update_child() {
        let (repo, _dir) = setup_test();
        let mut child = sample_child("child::1", "Emma");
        repo.store_child(&child).unwrap();

        child.name = "Emma Rose".to_string();
        child.is_active = false;
        repo.update_child(&child).unwrap();

        let loaded = repo.get_child("child::1").unwrap().unwrap();
        assert_eq!(loaded.name, "Emma Rose");
        assert!(!loaded.is_active);
    }

    #[test]
    fn test_update_missing_child_fails() {
        let (repo, _dir) = setup_test();
        assert!(repo.update_child(&sample_child("child::1", "Emma")).is_err());
    }

    #[test]
    fn test_concurrent_stores_do_not_lose_updates() {
        let (repo, _dir) = setup_test();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                std::thread::spawn(move || {
                    repo.store_child(&sample_child(&format!("child::{}", i), &format!("Kid {}", i)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.list_children().unwrap().len(), 8);
    }

    #[test]
    fn test_active_child_selection() {
        let (repo, _dir) = setup_test();
        assert_eq!(repo.get_active_child().unwrap(), None);

        repo.set_active_child("child::1").unwrap();
        assert_eq!(repo.get_active_child().unwrap(), Some("child::1".to_string()));

        repo.clear_active_child().unwrap();
        assert_eq!(repo.get_active_child().unwrap(), None);
    }
}
