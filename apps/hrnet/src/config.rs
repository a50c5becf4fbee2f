use std::path::PathBuf;

use anyhow::{Context, Result};
use platform_storage::StorageSettings;
use products_hr::ReferenceData;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub reference_file: Option<PathBuf>,
    pub assume_yes: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let storage = StorageSettings::from_env();

        let reference_file = std::env::var("HRNET_REFERENCE_FILE")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .map(PathBuf::from);

        let assume_yes = std::env::var("HRNET_ASSUME_YES")
            .ok()
            .map(|val| parse_flag(&val))
            .unwrap_or(false);

        Ok(Self {
            storage,
            reference_file,
            assume_yes,
        })
    }

    pub fn reference_data(&self) -> Result<ReferenceData> {
        match &self.reference_file {
            Some(path) => ReferenceData::from_json_file(path)
                .with_context(|| format!("HRNET_REFERENCE_FILE={}", path.display())),
            None => Ok(ReferenceData::default()),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
