use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::geo::{DistanceUnit, GeoPoint};
use crate::schedule::Bucket;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fi,
}

/// Whole meters below one kilometer (after rounding), otherwise one decimal.
pub fn format_distance(value: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::Km => {
            let meters = (value * 1000.0).round();
            if meters < 1000.0 {
                format!("{meters:.0} m")
            } else {
                format!("{value:.1} km")
            }
        }
        DistanceUnit::Mi => format!("{value:.1} mi"),
    }
}

pub fn format_clock<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%H:%M").to_string()
}

pub fn bucket_label(bucket: Bucket, language: Language) -> &'static str {
    match (bucket, language) {
        (Bucket::PlayingNow, Language::En) => "Playing now",
        (Bucket::ComingSoon, Language::En) => "Coming soon",
        (Bucket::ComingLater, Language::En) => "Coming later",
        (Bucket::PlayingNow, Language::Fi) => "Pelaamassa nyt",
        (Bucket::ComingSoon, Language::Fi) => "Tulossa pian",
        (Bucket::ComingLater, Language::Fi) => "Tulossa myöhemmin",
    }
}

pub fn directions_url(point: GeoPoint) -> String {
    let destination = format!("{},{}", point.latitude, point.longitude);
    Url::parse_with_params(
        "https://www.google.com/maps/dir/",
        &[("api", "1"), ("destination", destination.as_str())],
    )
    .map(String::from)
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono_tz::Europe::Helsinki;

    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0, DistanceUnit::Km), "0 m");
        assert_eq!(format_distance(0.8512, DistanceUnit::Km), "851 m");
        assert_eq!(format_distance(0.9994, DistanceUnit::Km), "999 m");
        assert_eq!(format_distance(0.9996, DistanceUnit::Km), "1.0 km");
        assert_eq!(format_distance(1.0, DistanceUnit::Km), "1.0 km");
        assert_eq!(format_distance(12.345, DistanceUnit::Km), "12.3 km");
        assert_eq!(format_distance(0.43, DistanceUnit::Mi), "0.4 mi");
    }

    #[test]
    fn test_format_clock_uses_time_zone() {
        let instant: DateTime<Utc> = "2024-01-15T12:05:00Z".parse().unwrap();
        assert_eq!(format_clock(instant, &Utc), "12:05");
        assert_eq!(format_clock(instant, &Helsinki), "14:05");
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(bucket_label(Bucket::ComingSoon, Language::En), "Coming soon");
        assert_eq!(
            bucket_label(Bucket::PlayingNow, Language::Fi),
            "Pelaamassa nyt"
        );
    }

    #[test]
    fn test_directions_url() {
        let url = directions_url(GeoPoint {
            latitude: 60.1745,
            longitude: 24.9452,
        });
        assert!(url.starts_with("https://www.google.com/maps/dir/?api=1"));
        assert!(url.contains("destination=60.1745%2C24.9452"));
    }
}
