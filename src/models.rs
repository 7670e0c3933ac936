use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::geo::{Coordinate, DistanceUnit, GeoPoint};
use crate::schedule::Bucket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub fn badge_color(self) -> &'static str {
        match self {
            Condition::Excellent => "green",
            Condition::Good => "lightgreen",
            Condition::Fair => "orange",
            Condition::Poor => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Hoop {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub condition: Condition,
    pub baskets: u8,
    pub indoor: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub hoop_id: u32,
    pub player_name: String,
    #[schema(value_type = String, format = "date-time", example = "2024-01-15T17:30:00Z")]
    pub arrival: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl Enrollment {
    /// Saturates at the largest representable instant instead of overflowing.
    pub fn end(&self) -> DateTime<Utc> {
        self.arrival
            .checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Body of `POST /hoops/{id}/enrollments`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewEnrollment {
    pub player_name: String,
    #[schema(value_type = String, format = "date-time")]
    pub arrival: DateTime<Utc>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentView {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub starts_at: String,
    pub ends_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BucketView {
    pub bucket: Bucket,
    pub label: String,
    pub enrollments: Vec<EnrollmentView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HoopSummary {
    #[serde(flatten)]
    pub hoop: Hoop,
    pub badge_color: String,
    pub distance: f64,
    pub distance_unit: DistanceUnit,
    pub distance_label: String,
    pub playing_now: usize,
    pub coming_soon: usize,
    pub coming_later: usize,
    pub directions_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HoopDetail {
    #[serde(flatten)]
    pub hoop: Hoop,
    pub badge_color: String,
    pub directions_url: String,
    pub buckets: Vec<BucketView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HoopList {
    pub origin: Coordinate,
    pub hoops: Vec<HoopSummary>,
}
