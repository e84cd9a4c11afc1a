use anyhow::Result;
use log::debug;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::reading::Reading as DomainReading;
use crate::storage::traits::ReadingStorage;

/// JSON-file repository for saved reading snapshots. The reading model is
/// serde-serializable as-is, so snapshots are stored directly.
#[derive(Clone)]
pub struct ReadingRepository {
    connection: Arc<JsonConnection>,
}

impl ReadingRepository {
    /// Create a new JSON reading repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn load(&self) -> Result<Vec<DomainReading>> {
        self.connection.read_json(&self.connection.readings_file())
    }

    fn save(&self, readings: &[DomainReading]) -> Result<()> {
        self.connection
            .write_json(&self.connection.readings_file(), &readings)
    }
}

impl ReadingStorage for ReadingRepository {
    fn store_reading(&self, reading: &DomainReading) -> Result<()> {
        let _guard = self.connection.lock_mutations();
        let mut readings = self.load()?;

        if readings.iter().any(|existing| existing.id == reading.id) {
            return Err(anyhow::anyhow!("Reading already exists: {}", reading.id));
        }

        readings.push(reading.clone());
        self.save(&readings)?;

        debug!("Stored reading {} for child {}", reading.id, reading.child_id);
        Ok(())
    }

    fn list_readings(&self, child_id: &str) -> Result<Vec<DomainReading>> {
        let mut readings: Vec<DomainReading> = self
            .load()?
            .into_iter()
            .filter(|reading| reading.child_id == child_id)
            .collect();
        readings.sort_by(|a, b| b.computed_at.cmp(&a.computed_at));
        Ok(readings)
    }

    fn delete_reading(&self, reading_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_mutations();
        let mut readings = self.load()?;
        let before = readings.len();
        readings.retain(|reading| reading.id != reading_id);

        if readings.len() == before {
            return Ok(false);
        }

        self.save(&readings)?;
        debug!("Deleted reading {}", reading_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use tempfile::tempdir;

    fn setup_test() -> (ReadingRepository, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (ReadingRepository::new(connection), temp_dir)
    }

    fn sample_reading(id: &str, child_id: &str, offset_secs: i64) -> DomainReading {
        DomainReading {
            id: id.to_string(),
            child_id: child_id.to_string(),
            birth_card: Some(shared::Card::parse("5♦").unwrap()),
            card_name: Some("Five of Diamonds".to_string()),
            age: 51,
            forecast: crate::domain::cards::resolve_yearly_forecast(
                shared::Card::parse("5♦").unwrap(),
                51,
            ),
            periods: Vec::new(),
            computed_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn test_store_and_list_round_trip() {
        let (repo, _dir) = setup_test();
        let reading = sample_reading("reading::1", "child::1", 0);

        repo.store_reading(&reading).unwrap();
        let listed = repo.list_readings("child::1").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], reading);
    }

    #[test]
    fn test_list_is_newest_first_and_scoped_to_child() {
        let (repo, _dir) = setup_test();
        repo.store_reading(&sample_reading("reading::1", "child::1", 0))
            .unwrap();
        repo.store_reading(&sample_reading("reading::2", "child::1", 60))
            .unwrap();
        repo.store_reading(&sample_reading("reading::3", "child::2", 30))
            .unwrap();

        let listed = repo.list_readings("child::1").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "reading::2");
        assert_eq!(listed[1].id, "reading::1");
    }

    #[test]
    fn test_delete_reading() {
        let (repo, _dir) = setup_test();
        repo.store_reading(&sample_reading("reading::1", "child::1", 0))
            .unwrap();

        assert!(repo.delete_reading("reading::1").unwrap());
        assert!(!repo.delete_reading("reading::1").unwrap());
        assert!(repo.list_readings("child::1").unwrap().is_empty());
    }

    #[test]
    fn test_reading_survives_serialization() {
        // NaiveDate period bounds and typed cards round-trip through the file
        let (repo, _dir) = setup_test();
        let mut reading = sample_reading("reading::1", "child::1", 0);
        let forecast = reading.forecast.unwrap();
        reading.periods = crate::domain::cards::schedule_planetary_periods(
            &forecast,
            NaiveDate::from_ymd_opt(1974, 1, 22).unwrap(),
            51,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );

        repo.store_reading(&reading).unwrap();
        let listed = repo.list_readings("child::1").unwrap();
        assert_eq!(listed[0].periods, reading.periods);
    }
}
