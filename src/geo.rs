use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_PER_MILE: f64 = 1.60934;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("Latitude and longitude must both be present")]
    MissingComponent,
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    #[serde(alias = "miles")]
    Mi,
}

/// A position as reported by the client. Either half may be unknown until
/// geolocation resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn is_known(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn to_point(&self) -> Result<GeoPoint, GeoError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
            _ => Err(GeoError::MissingComponent),
        }
    }
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl From<GeoPoint> for Coordinate {
    fn from(point: GeoPoint) -> Self {
        Coordinate::new(point.latitude, point.longitude)
    }
}

/// Great-circle distance using the haversine formula.
pub fn distance(a: GeoPoint, b: GeoPoint, unit: DistanceUnit) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h just above 1 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().asin();
    let km = EARTH_RADIUS_KM * c;

    match unit {
        DistanceUnit::Km => km,
        DistanceUnit::Mi => km / KM_PER_MILE,
    }
}

pub fn distance_between(
    a: &Coordinate,
    b: &Coordinate,
    unit: DistanceUnit,
) -> Result<f64, GeoError> {
    Ok(distance(a.to_point()?, b.to_point()?, unit))
}

/// Pairs every item with its distance from `origin`, nearest first.
/// Items farther than `max_distance` (in `unit`) are left out.
pub fn nearest<'a, T, F>(
    origin: GeoPoint,
    items: &'a [T],
    position: F,
    unit: DistanceUnit,
    max_distance: Option<f64>,
) -> Vec<(&'a T, f64)>
where
    F: Fn(&T) -> GeoPoint,
{
    let mut ranked: Vec<(&T, f64)> = items
        .iter()
        .map(|item| (item, distance(origin, position(item), unit)))
        .filter(|(_, d)| max_distance.is_none_or(|max| *d <= max))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
