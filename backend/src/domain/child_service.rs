use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::child::{
    CreateChildCommand, CreateChildResult, DeleteChildCommand, DeleteChildResult, GetActiveChildResult,
    GetChildCommand, GetChildResult, ListChildrenResult, SetActiveChildCommand, SetActiveChildResult,
    UpdateChildCommand, UpdateChildResult,
};
use crate::domain::models::child::{ActiveChild, Child as DomainChild};
use crate::storage::json::{ChildRepository, JsonConnection};
use crate::storage::traits::ChildStorage;

/// Service for managing child profiles
#[derive(Clone)]
pub struct ChildService {
    child_repository: ChildRepository,
}

impl ChildService {
    /// Create a new ChildService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let child_repository = ChildRepository::new(connection);
        Self { child_repository }
    }

    /// Create a new child profile
    pub fn create_child(&self, command: CreateChildCommand) -> Result<CreateChildResult> {
        info!("Creating child: name={}, birthdate={}", command.name, command.birthdate);

        self.validate_name(&command.name)?;
        let birthdate = self.validate_birthdate(&command.birthdate)?;

        let now = Utc::now();
        let child = DomainChild {
            id: DomainChild::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            birthdate,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        self.child_repository.store_child(&child)?;

        info!("Created child: {} with ID: {}", child.name, child.id);

        Ok(CreateChildResult { child })
    }

    /// Get a child by ID. Soft-deleted profiles are treated as not found.
    pub fn get_child(&self, command: GetChildCommand) -> Result<GetChildResult> {
        debug!("Getting child: {}", command.child_id);

        let child = self
            .child_repository
            .get_child(&command.child_id)?
            .filter(|child| child.is_active);

        if child.is_none() {
            warn!("Child not found: {}", command.child_id);
        }

        Ok(GetChildResult { child })
    }

    /// List all active child profiles
    pub fn list_children(&self) -> Result<ListChildrenResult> {
        debug!("Listing all children");

        let children: Vec<DomainChild> = self
            .child_repository
            .list_children()?
            .into_iter()
            .filter(|child| child.is_active)
            .collect();

        info!("Found {} active children", children.len());

        Ok(ListChildrenResult { children })
    }

    /// Update an existing child profile
    pub fn update_child(&self, command: UpdateChildCommand) -> Result<UpdateChildResult> {
        info!("Updating child: {}", command.child_id);

        let mut child = self
            .child_repository
            .get_child(&command.child_id)?
            .filter(|child| child.is_active)
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        if let Some(name) = command.name {
            self.validate_name(&name)?;
            child.name = name.trim().to_string();
        }
        if let Some(birthdate_str) = command.birthdate {
            child.birthdate = self.validate_birthdate(&birthdate_str)?;
        }
        child.updated_at = Utc::now();

        self.child_repository.update_child(&child)?;

        info!("Updated child: {} with ID: {}", child.name, child.id);

        Ok(UpdateChildResult { child })
    }

    /// Soft-delete a child profile by clearing its active flag. The data
    /// is retained; the profile disappears from listings and lookups.
    pub fn delete_child(&self, command: DeleteChildCommand) -> Result<DeleteChildResult> {
        info!("Soft-deleting child: {}", command.child_id);

        let mut child = self
            .child_repository
            .get_child(&command.child_id)?
            .filter(|child| child.is_active)
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        child.is_active = false;
        child.updated_at = Utc::now();
        self.child_repository.update_child(&child)?;

        // A deleted child cannot stay selected
        if self.child_repository.get_active_child()? == Some(child.id.clone()) {
            self.child_repository.clear_active_child()?;
        }

        info!("Soft-deleted child: {} with ID: {}", child.name, child.id);

        Ok(DeleteChildResult {
            success_message: format!("Child '{}' deleted successfully", child.name),
        })
    }

    /// Get the currently selected child
    pub fn get_active_child(&self) -> Result<GetActiveChildResult> {
        debug!("Getting active child");

        let active_child_id = self.child_repository.get_active_child()?;

        let active_child_model = if let Some(child_id) = active_child_id {
            match self.child_repository.get_child(&child_id)?.filter(|c| c.is_active) {
                Some(child) => {
                    debug!("Found active child: {}", child_id);
                    Some(child)
                }
                None => {
                    warn!("Active child ID exists but child not found: {}", child_id);
                    None
                }
            }
        } else {
            debug!("No active child set");
            None
        };

        Ok(GetActiveChildResult {
            active_child: ActiveChild {
                child: active_child_model,
            },
        })
    }

    /// Select the active child
    pub fn set_active_child(&self, command: SetActiveChildCommand) -> Result<SetActiveChildResult> {
        info!("Setting active child: {}", command.child_id);

        let child = self
            .child_repository
            .get_child(&command.child_id)?
            .filter(|child| child.is_active)
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        self.child_repository.set_active_child(&command.child_id)?;

        info!("Successfully set active child: {} ({})", child.name, child.id);

        Ok(SetActiveChildResult { child })
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Child name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Child name cannot exceed 100 characters"));
        }
        Ok(())
    }

    /// Validate and parse a birthdate in ISO 8601 format (YYYY-MM-DD)
    fn validate_birthdate(&self, birthdate: &str) -> Result<NaiveDate> {
        let date = NaiveDate::parse_from_str(birthdate, "%Y-%m-%d")
            .with_context(|| format!("Invalid birthdate format: '{}'. Use YYYY-MM-DD.", birthdate))?;

        let year = chrono::Datelike::year(&date);
        if !(1900..=2100).contains(&year) {
            return Err(anyhow::anyhow!("Year must be between 1900 and 2100"));
        }
        if date > Utc::now().date_naive() {
            return Err(anyhow::anyhow!("Birthdate cannot be in the future"));
        }

        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> ChildService {
        let temp_dir = tempdir().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        ChildService::new(Arc::new(connection))
    }

    #[test]
    fn test_create_child() {
        let service = setup_test();
        let command = CreateChildCommand {
            name: "  Test Child ".to_string(),
            birthdate: "2015-05-20".to_string(),
        };

        let result = service.create_child(command).unwrap();
        assert_eq!(result.child.name, "Test Child");
        assert_eq!(result.child.birthdate.to_string(), "2015-05-20");
        assert!(result.child.is_active);
    }

    #[test]
    fn test_create_child_validation() {
        let service = setup_test();

        let cmd_empty_name = CreateChildCommand {
            name: " ".to_string(),
            birthdate: "2010-01-01".to_string(),
        };
        assert!(service.create_child(cmd_empty_name).is_err());

        let cmd_long_name = CreateChildCommand {
            name: "a".repeat(101),
            birthdate: "2010-01-01".to_string(),
        };
        assert!(service.create_child(cmd_long_name).is_err());

        let cmd_bad_date = CreateChildCommand {
            name: "Bad Date".to_string(),
            birthdate: "2010/01/01".to_string(),
        };
        assert!(service.create_child(cmd_bad_date).is_err());

        let cmd_bad_day = CreateChildCommand {
            name: "Bad Day".to_string(),
            birthdate: "2010-02-30".to_string(),
        };
        assert!(service.create_child(cmd_bad_day).is_err());

        let cmd_old_year = CreateChildCommand {
            name: "Too Old".to_string(),
            birthdate: "1800-01-01".to_string(),
        };
        assert!(service.create_child(cmd_old_year).is_err());
    }

    #[test]
    fn test_create_child_rejects_future_birthdate() {
        let service = setup_test();

        let result = service.create_child(CreateChildCommand {
            name: "Not Born Yet".to_string(),
            birthdate: "2090-01-01".to_string(),
        });
        assert!(result.is_err());

        // Today itself is a valid birthdate
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let result = service.create_child(CreateChildCommand {
            name: "Newborn".to_string(),
            birthdate: today.clone(),
        });
        assert_eq!(result.unwrap().child.birthdate.to_string(), today);
    }

    #[test]
    fn test_update_child_rejects_future_birthdate() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Dana".to_string(),
                birthdate: "2018-04-04".to_string(),
            })
            .unwrap();

        let result = service.update_child(UpdateChildCommand {
            child_id: created.child.id,
            name: None,
            birthdate: Some("2090-01-01".to_string()),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_get_child() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Test Child".to_string(),
                birthdate: "2010-01-01".to_string(),
            })
            .unwrap();

        let retrieved = service
            .get_child(GetChildCommand {
                child_id: created.child.id.clone(),
            })
            .unwrap()
            .child
            .unwrap();
        assert_eq!(retrieved.id, created.child.id);
        assert_eq!(retrieved.name, "Test Child");
    }

    #[test]
    fn test_get_nonexistent_child() {
        let service = setup_test();
        let result = service
            .get_child(GetChildCommand {
                child_id: "non-existent-id".to_string(),
            })
            .unwrap();
        assert!(result.child.is_none());
    }

    #[test]
    fn test_list_children() {
        let service = setup_test();

        service
            .create_child(CreateChildCommand {
                name: "Alice".to_string(),
                birthdate: "2010-01-01".to_string(),
            })
            .unwrap();
        service
            .create_child(CreateChildCommand {
                name: "Bob".to_string(),
                birthdate: "2012-02-02".to_string(),
            })
            .unwrap();

        let response = service.list_children().unwrap();
        assert_eq!(response.children.len(), 2);
        assert!(response.children.iter().any(|c| c.name == "Alice"));
        assert!(response.children.iter().any(|c| c.name == "Bob"));
    }

    #[test]
    fn test_update_child() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Original Name".to_string(),
                birthdate: "2010-01-01".to_string(),
            })
            .unwrap();

        let updated = service
            .update_child(UpdateChildCommand {
                child_id: created.child.id.clone(),
                name: Some("  Updated Name  ".to_string()),
                birthdate: Some("2011-02-02".to_string()),
            })
            .unwrap();
        assert_eq!(updated.child.name, "Updated Name");
        assert_eq!(updated.child.birthdate.to_string(), "2011-02-02");
        assert!(updated.child.updated_at > created.child.created_at);
    }

    #[test]
    fn test_soft_delete_hides_child_but_keeps_record() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "To Be Deleted".to_string(),
                birthdate: "2010-01-01".to_string(),
            })
            .unwrap();
        let child_id = created.child.id.clone();

        service
            .delete_child(DeleteChildCommand {
                child_id: child_id.clone(),
            })
            .unwrap();

        // Hidden from lookups and listings
        assert!(service
            .get_child(GetChildCommand {
                child_id: child_id.clone(),
            })
            .unwrap()
            .child
            .is_none());
        assert!(service.list_children().unwrap().children.is_empty());

        // But still present in storage with the flag cleared
        let stored = service.child_repository.get_child(&child_id).unwrap().unwrap();
        assert!(!stored.is_active);

        // Deleting twice is an error, same as deleting a missing child
        assert!(service
            .delete_child(DeleteChildCommand { child_id })
            .is_err());
    }

    #[test]
    fn test_set_and_get_active_child() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Charlie".to_string(),
                birthdate: "2015-03-03".to_string(),
            })
            .unwrap();
        let child_id = created.child.id;

        service
            .set_active_child(SetActiveChildCommand {
                child_id: child_id.clone(),
            })
            .unwrap();

        let active = service.get_active_child().unwrap();
        assert_eq!(active.active_child.child.unwrap().id, child_id);
    }

    #[test]
    fn test_get_active_child_when_none_set() {
        let service = setup_test();
        let response = service.get_active_child().unwrap();
        assert!(response.active_child.child.is_none());
    }

    #[test]
    fn test_set_active_child_with_nonexistent_child() {
        let service = setup_test();
        let result = service.set_active_child(SetActiveChildCommand {
            child_id: "non-existent-id".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_soft_delete_clears_active_selection() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Frank".to_string(),
                birthdate: "2021-06-06".to_string(),
            })
            .unwrap();
        let child_id = created.child.id;

        service
            .set_active_child(SetActiveChildCommand {
                child_id: child_id.clone(),
            })
            .unwrap();
        service
            .delete_child(DeleteChildCommand { child_id })
            .unwrap();

        let active = service.get_active_child().unwrap();
        assert!(active.active_child.child.is_none());
    }
}
