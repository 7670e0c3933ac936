use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::models::Enrollment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    PlayingNow,
    ComingSoon,
    ComingLater,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::PlayingNow, Bucket::ComingSoon, Bucket::ComingLater];
}

#[derive(Debug, Default, Serialize)]
pub struct EnrollmentBuckets<'a> {
    pub playing_now: Vec<&'a Enrollment>,
    pub coming_soon: Vec<&'a Enrollment>,
    pub coming_later: Vec<&'a Enrollment>,
}

impl<'a> EnrollmentBuckets<'a> {
    pub fn get(&self, bucket: Bucket) -> &[&'a Enrollment] {
        match bucket {
            Bucket::PlayingNow => &self.playing_now,
            Bucket::ComingSoon => &self.coming_soon,
            Bucket::ComingLater => &self.coming_later,
        }
    }

    pub fn len(&self) -> usize {
        self.playing_now.len() + self.coming_soon.len() + self.coming_later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last millisecond of `now`'s calendar day, in `now`'s zone. When the local
/// time repeats, the later occurrence is taken.
pub fn end_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    let last_ms = midnight + Duration::days(1) - Duration::milliseconds(1);
    tz.from_local_datetime(&last_ms)
        .latest()
        .unwrap_or_else(|| tz.from_utc_datetime(&last_ms))
}

/// Returns `None` for enrollments that are already over.
pub fn classify<Tz: TimeZone>(
    now: &DateTime<Tz>,
    end_of_today: &DateTime<Tz>,
    enrollment: &Enrollment,
) -> Option<Bucket> {
    if enrollment.duration_minutes == 0 {
        warn!(id = %enrollment.id, "dropping enrollment with zero duration");
        return None;
    }

    let arrival = enrollment.arrival;
    if arrival <= *now && *now < enrollment.end() {
        return Some(Bucket::PlayingNow);
    }
    if *now < arrival {
        return if arrival <= *end_of_today {
            Some(Bucket::ComingSoon)
        } else {
            Some(Bucket::ComingLater)
        };
    }
    None
}

pub fn bucket_enrollments<'a, Tz: TimeZone>(
    now: &DateTime<Tz>,
    enrollments: &'a [Enrollment],
) -> EnrollmentBuckets<'a> {
    let end_of_today = end_of_day(now);
    let mut buckets = EnrollmentBuckets::default();

    for enrollment in enrollments {
        match classify(now, &end_of_today, enrollment) {
            Some(Bucket::PlayingNow) => buckets.playing_now.push(enrollment),
            Some(Bucket::ComingSoon) => buckets.coming_soon.push(enrollment),
            Some(Bucket::ComingLater) => buckets.coming_later.push(enrollment),
            None => {}
        }
    }

    // sort_by_key is stable, equal arrivals keep input order
    buckets.playing_now.sort_by_key(|e| e.arrival);
    buckets.coming_soon.sort_by_key(|e| e.arrival);
    buckets.coming_later.sort_by_key(|e| e.arrival);
    buckets
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use chrono_tz::Europe::Helsinki;
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-01-15T12:00:00Z".parse().unwrap()
    }

    fn enrollment(name: &str, arrival: DateTime<Utc>, duration_minutes: u32) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            hoop_id: 1,
            player_name: name.to_string(),
            arrival,
            duration_minutes,
        }
    }

    #[test]
    fn test_playing_now() {
        let items = [enrollment("a", now() - Duration::minutes(10), 60)];
        let buckets = bucket_enrollments(&now(), &items);
        assert_eq!(buckets.playing_now.len(), 1);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_coming_soon_same_day() {
        let items = [enrollment("a", now() + Duration::minutes(15), 60)];
        let buckets = bucket_enrollments(&now(), &items);
        assert_eq!(buckets.coming_soon.len(), 1);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_coming_later_next_day() {
        let items = [enrollment("a", now() + Duration::hours(24), 60)];
        let buckets = bucket_enrollments(&now(), &items);
        assert_eq!(buckets.coming_later.len(), 1);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_finished_is_dropped() {
        let items = [enrollment("a", now() - Duration::minutes(120), 60)];
        let buckets = bucket_enrollments(&now(), &items);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_boundaries() {
        let items = [
            // arrives exactly now
            enrollment("starts", now(), 30),
            // ends exactly now
            enrollment("ends", now() - Duration::minutes(30), 30),
            // last millisecond of the day
            enrollment("midnight", "2024-01-15T23:59:59.999Z".parse().unwrap(), 30),
            enrollment("tomorrow", "2024-01-16T00:00:00Z".parse().unwrap(), 30),
        ];
        let buckets = bucket_enrollments(&now(), &items);
        assert_eq!(buckets.playing_now[0].player_name, "starts");
        assert_eq!(buckets.coming_soon[0].player_name, "midnight");
        assert_eq!(buckets.coming_later[0].player_name, "tomorrow");
        assert_eq!(buckets.len(), 3);
    }

    #[test]
    fn test_zero_duration_is_dropped() {
        let items = [
            enrollment("now", now(), 0),
            enrollment("later", now() + Duration::hours(2), 0),
        ];
        assert!(bucket_enrollments(&now(), &items).is_empty());
    }

    #[test]
    fn test_end_of_day_follows_time_zone() {
        // 12:00 UTC is 14:00 in Helsinki; 22:30 UTC is already tomorrow there
        let local_now = now().with_timezone(&Helsinki);
        let items = [enrollment("late", "2024-01-15T22:30:00Z".parse().unwrap(), 60)];

        let utc = bucket_enrollments(&now(), &items);
        assert_eq!(utc.coming_soon.len(), 1);

        let helsinki = bucket_enrollments(&local_now, &items);
        assert_eq!(helsinki.coming_later.len(), 1);
    }

    #[test]
    fn test_end_of_day_is_an_instant() {
        // Helsinki leaves summer time on 2024-10-27 at 04:00 local
        let local_now = "2024-10-27T09:00:00Z"
            .parse::<DateTime<Utc>>()
            .unwrap()
            .with_timezone(&Helsinki);
        let eod = end_of_day(&local_now);
        assert_eq!(
            eod.with_timezone(&Utc),
            "2024-10-27T21:59:59.999Z".parse::<DateTime<Utc>>().unwrap()
        );

        let items = [
            enrollment("last", "2024-10-27T21:59:59.999Z".parse().unwrap(), 30),
            enrollment("next", "2024-10-27T22:00:00Z".parse().unwrap(), 30),
        ];
        let buckets = bucket_enrollments(&local_now, &items);
        assert_eq!(buckets.coming_soon[0].player_name, "last");
        assert_eq!(buckets.coming_later[0].player_name, "next");
    }

    #[test]
    fn test_extreme_arrival_does_not_overflow() {
        let items = [enrollment("edge", DateTime::<Utc>::MAX_UTC - Duration::minutes(1), 720)];
        assert_eq!(items[0].end(), DateTime::<Utc>::MAX_UTC);
        let buckets = bucket_enrollments(&now(), &items);
        assert_eq!(buckets.coming_later.len(), 1);
    }

    #[test]
    fn test_buckets_sorted_and_stable() {
        let t = now() + Duration::minutes(30);
        let items = [
            enrollment("third", t + Duration::minutes(20), 60),
            enrollment("first", t, 60),
            enrollment("second", t, 60),
        ];
        let buckets = bucket_enrollments(&now(), &items);
        let names: Vec<_> = buckets
            .coming_soon
            .iter()
            .map(|e| e.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    fn arb_enrollment() -> impl Strategy<Value = Enrollment> {
        (-3000i64..3000, 0u32..600).prop_map(|(offset, duration)| {
            enrollment("p", now() + Duration::minutes(offset), duration)
        })
    }

    proptest! {
        #[test]
        fn test_partition_invariants(items in prop::collection::vec(arb_enrollment(), 0..40)) {
            let now = now();
            let eod: DateTime<Utc> = "2024-01-15T23:59:59.999Z".parse().unwrap();
            let buckets = bucket_enrollments(&now, &items);

            let mut seen = HashSet::new();
            for bucket in Bucket::ALL {
                let list = buckets.get(bucket);
                for pair in list.windows(2) {
                    prop_assert!(pair[0].arrival <= pair[1].arrival);
                }
                for e in list {
                    prop_assert!(seen.insert(e.id), "duplicated {}", e.id);
                    let end = e.arrival + Duration::minutes(i64::from(e.duration_minutes));
                    let belongs = match bucket {
                        Bucket::PlayingNow => e.arrival <= now && now < end,
                        Bucket::ComingSoon => now < e.arrival && e.arrival <= eod,
                        Bucket::ComingLater => e.arrival > eod,
                    };
                    prop_assert!(belongs, "{} misplaced in {:?}", e.id, bucket);
                }
            }

            for e in items.iter().filter(|e| !seen.contains(&e.id)) {
                let end = e.arrival + Duration::minutes(i64::from(e.duration_minutes));
                let live = e.duration_minutes > 0 && now < end;
                prop_assert!(!live, "{} was dropped but has not ended", e.id);
            }
        }
    }
}
