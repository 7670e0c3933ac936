use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::{Enrollment, Hoop};

#[derive(Clone, Default)]
pub struct CalendarExporter;

impl CalendarExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, hoop: &Hoop, enrollments: &[&Enrollment]) -> Vec<u8> {
        if enrollments.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name(&format!("Hoops at {}", hoop.name));

        for enrollment in enrollments {
            let mut event = Event::new();
            event.summary(&format!("Basketball: {}", enrollment.player_name));
            event.starts(enrollment.arrival);
            event.ends(enrollment.end());
            event.location(&format!("{}, {}", hoop.name, hoop.address));
            event.description(&format!(
                "{} playing at {} for {} min",
                enrollment.player_name, hoop.name, enrollment.duration_minutes
            ));
            event.uid(&format!("{}-hoopfinder", enrollment.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}
