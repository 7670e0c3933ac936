use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::geo::GeoPoint;
use crate::models::{Condition, Enrollment, Hoop, NewEnrollment};
use crate::validation::{EnrollmentError, validate_enrollment};

static SEED_HOOPS: Lazy<Vec<Hoop>> = Lazy::new(|| {
    vec![
        hoop(
            1,
            "Kaisaniemi Park",
            "Kaisaniemenranta, 00170 Helsinki",
            (60.1745, 24.9452),
            Condition::Good,
            2,
            Some("Two full-size baskets next to the botanical garden."),
        ),
        hoop(
            2,
            "Eläintarha Sports Field",
            "Eläintarhantie 3, 00530 Helsinki",
            (60.1866, 24.9312),
            Condition::Excellent,
            4,
            None,
        ),
        hoop(
            3,
            "Hietaniemi Beach",
            "Hietaniemenkatu, 00100 Helsinki",
            (60.1730, 24.9050),
            Condition::Fair,
            2,
            Some("Sand blows onto the court on windy days."),
        ),
        hoop(
            4,
            "Kallio Schoolyard",
            "Porvoonkatu 2, 00510 Helsinki",
            (60.1866, 24.9545),
            Condition::Poor,
            1,
            Some("Bent rim on the east basket."),
        ),
        hoop(
            5,
            "Tapiola Sports Park",
            "Kirkkopuistikko 3, 02100 Espoo",
            (60.1763, 24.8036),
            Condition::Good,
            3,
            None,
        ),
        Hoop {
            indoor: true,
            ..hoop(
                6,
                "Töölö Sports Hall",
                "Paavo Nurmen tie 1, 00250 Helsinki",
                (60.1875, 24.9230),
                Condition::Excellent,
                2,
                Some("Open court evenings; bring indoor shoes."),
            )
        },
    ]
});

fn hoop(
    id: u32,
    name: &str,
    address: &str,
    (latitude, longitude): (f64, f64),
    condition: Condition,
    baskets: u8,
    description: Option<&str>,
) -> Hoop {
    Hoop {
        id,
        name: name.to_string(),
        address: address.to_string(),
        location: GeoPoint {
            latitude,
            longitude,
        },
        condition,
        baskets,
        indoor: false,
        description: description.map(str::to_string),
    }
}

/// Court catalogue plus the enrollments submitted since startup.
pub struct HoopStore {
    hoops: Vec<Hoop>,
    enrollments: RwLock<Vec<Enrollment>>,
}

impl Default for HoopStore {
    fn default() -> Self {
        Self::new(SEED_HOOPS.to_vec())
    }
}

impl HoopStore {
    pub fn new(hoops: Vec<Hoop>) -> Self {
        Self {
            hoops,
            enrollments: RwLock::new(Vec::new()),
        }
    }

    pub fn hoops(&self) -> &[Hoop] {
        &self.hoops
    }

    pub fn hoop(&self, id: u32) -> Option<&Hoop> {
        self.hoops.iter().find(|h| h.id == id)
    }

    pub async fn enrollments_for(&self, hoop_id: u32) -> Vec<Enrollment> {
        self.enrollments
            .read()
            .await
            .iter()
            .filter(|e| e.hoop_id == hoop_id)
            .cloned()
            .collect()
    }

    pub async fn enroll(
        &self,
        hoop_id: u32,
        new: NewEnrollment,
        now: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentError> {
        if self.hoop(hoop_id).is_none() {
            return Err(EnrollmentError::UnknownHoop(hoop_id));
        }
        let player_name = validate_enrollment(&new, now)?;

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            hoop_id,
            player_name,
            arrival: new.arrival,
            duration_minutes: new.duration_minutes,
        };
        info!(hoop_id, id = %enrollment.id, arrival = %enrollment.arrival, "new enrollment");
        self.enrollments.write().await.push(enrollment.clone());
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_seed_catalogue_is_valid() {
        let store = HoopStore::default();
        assert!(!store.hoops().is_empty());
        for h in store.hoops() {
            assert!(GeoPoint::new(h.location.latitude, h.location.longitude).is_ok());
        }
        assert_eq!(store.hoop(2).unwrap().name, "Eläintarha Sports Field");
        assert!(store.hoop(999).is_none());
    }

    #[test]
    fn test_seed_catalogue_has_indoor_and_outdoor() {
        let store = HoopStore::default();
        assert!(store.hoop(6).unwrap().indoor);
        assert!(!store.hoop(1).unwrap().indoor);
    }

    #[tokio::test]
    async fn test_enroll_and_list() {
        let store = HoopStore::default();
        let now = Utc::now();
        let new = NewEnrollment {
            player_name: " Mikko ".to_string(),
            arrival: now + Duration::hours(1),
            duration_minutes: 90,
        };

        let created = store.enroll(1, new, now).await.unwrap();
        assert_eq!(created.player_name, "Mikko");
        assert_eq!(store.enrollments_for(1).await, vec![created]);
        assert!(store.enrollments_for(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_enroll_unknown_hoop() {
        let store = HoopStore::default();
        let now = Utc::now();
        let new = NewEnrollment {
            player_name: "Mikko".to_string(),
            arrival: now,
            duration_minutes: 30,
        };
        assert_eq!(
            store.enroll(42, new, now).await,
            Err(EnrollmentError::UnknownHoop(42))
        );
    }
}
