use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::format::Language;
use crate::geo::{Coordinate, DistanceUnit, GeoError};

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zoom must be between 1 and 20")]
    InvalidZoom,
    #[error("invalid {field}: {source}")]
    InvalidCoordinate {
        field: &'static str,
        source: GeoError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(60.1699, 24.9384),
            zoom: 13,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub language: Language,
    pub distance_unit: DistanceUnit,
    pub map_view: MapView,
    pub location: Coordinate,
}

/// User preferences backed by a JSON file: read once at startup, written on
/// every change.
pub struct PreferencesStore {
    path: PathBuf,
    current: RwLock<Preferences>,
}

impl PreferencesStore {
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let current = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "falling back to default preferences");
                Preferences::default()
            }),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no saved preferences");
                Preferences::default()
            }
        };
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub async fn get(&self) -> Preferences {
        self.current.read().await.clone()
    }

    pub async fn update(&self, preferences: Preferences) -> Result<Preferences, PreferencesError> {
        if !(1..=20).contains(&preferences.map_view.zoom) {
            return Err(PreferencesError::InvalidZoom);
        }
        check_coordinate("map_view.center", &preferences.map_view.center, false)?;
        check_coordinate("location", &preferences.location, true)?;

        let mut current = self.current.write().await;
        if *current == preferences {
            return Ok(preferences);
        }
        let encoded = serde_json::to_vec_pretty(&preferences)?;
        tokio::fs::write(&self.path, encoded).await?;
        *current = preferences.clone();
        debug!(path = %self.path.display(), "preferences saved");
        Ok(preferences)
    }
}

/// An unknown location is allowed where `optional`; a half-known or out of
/// range one never is.
fn check_coordinate(
    field: &'static str,
    coordinate: &Coordinate,
    optional: bool,
) -> Result<(), PreferencesError> {
    if optional && coordinate.latitude.is_none() && coordinate.longitude.is_none() {
        return Ok(());
    }
    coordinate
        .to_point()
        .map(|_| ())
        .map_err(|source| PreferencesError::InvalidCoordinate { field, source })
}
