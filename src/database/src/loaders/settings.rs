use crate::StorageError;
use std::fs;
use std::path::Path;
use unifut_core::SimulationSettings;

pub struct SettingsLoader;

impl SettingsLoader {
    /// Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<SimulationSettings, StorageError> {
        let content = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 7, "start_year": 2030}}"#).unwrap();

        let settings = SettingsLoader::load(file.path()).unwrap();

        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.start_year, 2030);
        assert_eq!(settings.economy.revenue_pool, SimulationSettings::default().economy.revenue_pool);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = SettingsLoader::load(&dir.path().join("settings.json")).unwrap_err();

        assert!(matches!(err, StorageError::Io(_)));
    }
}
