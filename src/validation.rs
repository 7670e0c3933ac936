use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::NewEnrollment;

pub const MAX_DURATION_MINUTES: u32 = 12 * 60;
pub const MAX_PLAYER_NAME_LEN: usize = 40;
pub const MAX_DAYS_AHEAD: i64 = 365;

#[derive(Debug, Error, PartialEq)]
pub enum EnrollmentError {
    #[error("duration must be between 1 and {} minutes", MAX_DURATION_MINUTES)]
    InvalidDuration,
    #[error("player name must be between 1 and {} characters", MAX_PLAYER_NAME_LEN)]
    InvalidPlayerName,
    #[error("enrollment would already be over")]
    AlreadyEnded,
    #[error("arrival must be within {} days from now", MAX_DAYS_AHEAD)]
    ArrivalTooFar,
    #[error("hoop {0} not found")]
    UnknownHoop(u32),
}

pub fn validate_duration(minutes: u32) -> Result<u32, EnrollmentError> {
    if (1..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(EnrollmentError::InvalidDuration)
    }
}

pub fn validate_player_name(name: &str) -> Result<String, EnrollmentError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_PLAYER_NAME_LEN {
        return Err(EnrollmentError::InvalidPlayerName);
    }
    Ok(trimmed.to_string())
}

/// Checks a submitted enrollment form and returns the normalized player name.
pub fn validate_enrollment(
    new: &NewEnrollment,
    now: DateTime<Utc>,
) -> Result<String, EnrollmentError> {
    let name = validate_player_name(&new.player_name)?;
    let minutes = validate_duration(new.duration_minutes)?;

    let horizon = now
        .checked_add_signed(Duration::days(MAX_DAYS_AHEAD))
        .ok_or(EnrollmentError::ArrivalTooFar)?;
    if new.arrival > horizon {
        return Err(EnrollmentError::ArrivalTooFar);
    }
    let end = new
        .arrival
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .ok_or(EnrollmentError::ArrivalTooFar)?;
    if end <= now {
        return Err(EnrollmentError::AlreadyEnded);
    }
    Ok(name)
}
