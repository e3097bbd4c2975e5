use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeClubEntity {
    pub name: String,
    /// Region the club plays in.
    pub conference: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegeDatabaseEntity {
    pub college1: Vec<CollegeClubEntity>,
    pub college2: Vec<CollegeClubEntity>,
}

impl CollegeDatabaseEntity {
    pub fn len(&self) -> usize {
        self.college1.len() + self.college2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.college1.is_empty() && self.college2.is_empty()
    }
}

pub struct CollegeLoader;

impl CollegeLoader {
    /// Reads the college database. A missing or broken file leaves the league
    /// with the top tier only.
    pub fn load(path: &Path) -> CollegeDatabaseEntity {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("college database {} not loaded: {}", path.display(), err);
                return CollegeDatabaseEntity::default();
            }
        };

        match serde_json::from_str::<CollegeDatabaseEntity>(&content) {
            Ok(database) => {
                info!(
                    "college database {}: {} college 1, {} college 2 clubs",
                    path.display(),
                    database.college1.len(),
                    database.college2.len()
                );
                database
            }
            Err(err) => {
                warn!("college database {} is malformed: {}", path.display(), err);
                CollegeDatabaseEntity::default()
            }
        }
    }
}
