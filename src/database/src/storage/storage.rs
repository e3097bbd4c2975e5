use crate::StorageError;
use crate::storage::{SAVE_FORMAT_VERSION, SaveEntity};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use unifut_core::utils::TimeEstimation;
use unifut_core::{LeagueSimulator, SimulatorData};

#[derive(Deserialize)]
struct SaveHeader {
    version: u32,
}

pub struct Storage;

impl Storage {
    pub fn to_json(data: &SimulatorData) -> Result<String, StorageError> {
        let json = serde_json::to_string_pretty(&SaveEntity::from_data(data))?;

        Ok(json)
    }

    /// Rebuilds clubs, rosters, history and the stored calendar.
    pub fn from_json(json: &str) -> Result<SimulatorData, StorageError> {
        let header: SaveHeader = serde_json::from_str(json)?;
        if header.version != SAVE_FORMAT_VERSION {
            return Err(StorageError::Version {
                found: header.version,
                expected: SAVE_FORMAT_VERSION,
            });
        }

        let entity: SaveEntity = serde_json::from_str(json)?;

        entity.into_data()
    }

    pub fn save(data: &SimulatorData, path: &Path) -> Result<(), StorageError> {
        let (result, estimated) = TimeEstimation::estimate(|| -> Result<(), StorageError> {
            fs::write(path, Self::to_json(data)?)?;
            Ok(())
        });
        result?;

        info!(
            "saved {} week {} to {}: {} ms",
            data.season.year,
            data.season.week,
            path.display(),
            estimated
        );

        Ok(())
    }

    /// Loads a save. A save without a calendar gets its season scheduled again.
    pub fn load(path: &Path, simulator: &mut LeagueSimulator) -> Result<SimulatorData, StorageError> {
        let json = fs::read_to_string(path)?;
        let mut data = Self::from_json(&json)?;

        if data.calendar.is_empty() {
            warn!("save {} has no calendar, scheduling {} again", path.display(), data.season.year);
            simulator.start_season(&mut data)?;
        }

        info!(
            "loaded {} week {} from {}: {} clubs, {} free agents",
            data.season.year,
            data.season.week,
            path.display(),
            data.clubs.len(),
            data.free_agents.len()
        );

        Ok(data)
    }
}
