use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::cards::{
    age_on, birth_card_for_date, resolve_yearly_forecast, schedule_planetary_periods,
};
use crate::domain::commands::reading::{
    ComputeReadingCommand, ComputeReadingResult, DeleteReadingCommand, DeleteReadingResult,
    ListReadingsCommand, ListReadingsResult, SaveReadingCommand, SaveReadingResult,
};
use crate::domain::models::child::Child as DomainChild;
use crate::domain::models::reading::Reading;
use crate::storage::json::{ChildRepository, JsonConnection, ReadingRepository};
use crate::storage::traits::{ChildStorage, ReadingStorage};

/// Service that composes the card lookup core into complete readings and
/// snapshots them through the storage layer.
#[derive(Clone)]
pub struct ReadingService {
    child_repository: ChildRepository,
    reading_repository: ReadingRepository,
}

impl ReadingService {
    /// Create a new ReadingService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            child_repository: ChildRepository::new(connection.clone()),
            reading_repository: ReadingRepository::new(connection),
        }
    }

    /// Compute a reading for a child without persisting it
    pub fn compute_reading(&self, command: ComputeReadingCommand) -> Result<ComputeReadingResult> {
        debug!("Computing reading for child: {}", command.child_id);

        let child = self.require_child(&command.child_id)?;
        let reading = self.build_reading(&child, command.today)?;

        Ok(ComputeReadingResult { reading })
    }

    /// Compute a reading and store it as a snapshot
    pub fn save_reading(&self, command: SaveReadingCommand) -> Result<SaveReadingResult> {
        info!("Saving reading for child: {}", command.child_id);

        let child = self.require_child(&command.child_id)?;
        let reading = self.build_reading(&child, command.today)?;

        self.reading_repository.store_reading(&reading)?;

        info!("Saved reading {} for child {}", reading.id, child.id);

        Ok(SaveReadingResult {
            reading,
            success_message: format!("Reading saved for '{}'", child.name),
        })
    }

    /// List saved reading snapshots for a child, newest first
    pub fn list_readings(&self, command: ListReadingsCommand) -> Result<ListReadingsResult> {
        debug!("Listing readings for child: {}", command.child_id);

        let readings = self.reading_repository.list_readings(&command.child_id)?;

        Ok(ListReadingsResult { readings })
    }

    /// Delete a saved reading snapshot
    pub fn delete_reading(&self, command: DeleteReadingCommand) -> Result<DeleteReadingResult> {
        info!("Deleting reading: {}", command.reading_id);

        let deleted = self.reading_repository.delete_reading(&command.reading_id)?;
        if !deleted {
            return Err(anyhow::anyhow!("Reading not found: {}", command.reading_id));
        }

        Ok(DeleteReadingResult {
            success_message: "Reading deleted successfully".to_string(),
        })
    }

    fn require_child(&self, child_id: &str) -> Result<DomainChild> {
        self.child_repository
            .get_child(child_id)?
            .filter(|child| child.is_active)
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))
    }

    /// Run the lookup pipeline for one child. A table miss at any stage
    /// produces a reading with the miss made explicit rather than an
    /// error.
    fn build_reading(&self, child: &DomainChild, today: NaiveDate) -> Result<Reading> {
        let age = age_on(child.birthdate, today)
            .ok_or_else(|| anyhow::anyhow!("Birthdate {} is in the future", child.birthdate))?;

        let entry = birth_card_for_date(child.birthdate);
        let forecast = entry.and_then(|entry| resolve_yearly_forecast(entry.card, age));
        let periods = forecast
            .as_ref()
            .map(|forecast| schedule_planetary_periods(forecast, child.birthdate, age, today))
            .unwrap_or_default();

        let now = Utc::now();
        Ok(Reading {
            id: Reading::generate_id(now.timestamp_millis() as u64),
            child_id: child.id.clone(),
            birth_card: entry.map(|entry| entry.card),
            card_name: entry.map(|entry| entry.card_name.clone()),
            age,
            forecast,
            periods,
            computed_at: now,
        })
    }
}
