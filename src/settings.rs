use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub timezone: Tz,
    pub preferences_path: String,
    pub home_latitude: f64,
    pub home_longitude: f64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_PORT, APP_ENABLE_SWAGGER, ...
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("timezone", "Europe/Helsinki")?
            .set_default("preferences_path", "preferences.json")?
            .set_default("home_latitude", 60.1699)?
            .set_default("home_longitude", 24.9384)?
            .build()?;

        config.try_deserialize()
    }

    pub fn home(&self) -> Coordinate {
        Coordinate::new(self.home_latitude, self.home_longitude)
    }
}
