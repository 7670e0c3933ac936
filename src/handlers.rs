use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    AppState,
    error::ApiError,
    format::{bucket_label, directions_url, format_clock, format_distance},
    geo::{Coordinate, DistanceUnit, nearest},
    models::{
        BucketView, EnrollmentView, Hoop, HoopDetail, HoopList, HoopSummary, NewEnrollment,
    },
    preferences::Preferences,
    schedule::{Bucket, bucket_enrollments},
};

#[derive(Debug, serde::Deserialize)]
pub struct HoopsQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub unit: Option<DistanceUnit>,
    pub max_distance: Option<f64>,
}

#[utoipa::path(get, path = "/", tag = "hoops")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Hoopfinder API",
        "endpoints": {
            "/hoops": "Courts sorted by distance",
            "/hoops/{id}": "Court detail with enrolled players",
            "/hoops/{id}/enrollments": "Enroll for a time window (POST)",
            "/hoops/{id}/enrollments.ics": "Download enrollments as iCal file",
            "/preferences": "Read or replace user preferences"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "hoops")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "hoops")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

fn find_hoop(state: &AppState, id: u32) -> Result<&Hoop, ApiError> {
    state
        .hoops
        .hoop(id)
        .ok_or_else(|| ApiError::NotFound(format!("hoop {id} not found")))
}

#[utoipa::path(
    get,
    path = "/hoops",
    params(
        ("lat" = Option<f64>, Query, description = "Latitude of the player, defaults to the saved location"),
        ("lon" = Option<f64>, Query, description = "Longitude of the player"),
        ("unit" = Option<DistanceUnit>, Query, description = "km or mi, defaults to the saved preference"),
        ("max_distance" = Option<f64>, Query, description = "Search radius in the chosen unit")
    ),
    responses(
        (status = 200, description = "Courts nearest first", body = HoopList),
        (status = 400, description = "Invalid coordinates")
    ),
    tag = "hoops"
)]
pub async fn list_hoops(
    State(state): State<AppState>,
    Query(query): Query<HoopsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let prefs = state.preferences.get().await;
    let unit = query.unit.unwrap_or(prefs.distance_unit);

    let origin = match (query.lat, query.lon) {
        (None, None) if prefs.location.is_known() => prefs.location,
        (None, None) => state.settings.home(),
        (latitude, longitude) => Coordinate {
            latitude,
            longitude,
        },
    };
    let origin_point = origin.to_point()?;
    if let Some(max) = query.max_distance
        && (max.is_nan() || max < 0.0)
    {
        return Err(ApiError::BadRequest(
            "max_distance must be non-negative".into(),
        ));
    }

    let now = Utc::now().with_timezone(&state.settings.timezone);
    let mut hoops = Vec::new();
    for (hoop, distance) in nearest(
        origin_point,
        state.hoops.hoops(),
        |h| h.location,
        unit,
        query.max_distance,
    ) {
        let enrollments = state.hoops.enrollments_for(hoop.id).await;
        let buckets = bucket_enrollments(&now, &enrollments);
        hoops.push(HoopSummary {
            hoop: hoop.clone(),
            badge_color: hoop.condition.badge_color().to_string(),
            distance,
            distance_unit: unit,
            distance_label: format_distance(distance, unit),
            playing_now: buckets.playing_now.len(),
            coming_soon: buckets.coming_soon.len(),
            coming_later: buckets.coming_later.len(),
            directions_url: directions_url(hoop.location),
        });
    }

    Ok(Json(HoopList { origin, hoops }))
}

#[utoipa::path(
    get,
    path = "/hoops/{id}",
    params(("id" = u32, Path, description = "Hoop id")),
    responses(
        (status = 200, description = "Court with enrolled players", body = HoopDetail),
        (status = 404, description = "Unknown hoop")
    ),
    tag = "hoops"
)]
pub async fn get_hoop(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, ApiError> {
    let hoop = find_hoop(&state, id)?;
    let language = state.preferences.get().await.language;
    let tz = state.settings.timezone;
    let now = Utc::now().with_timezone(&tz);

    let enrollments = state.hoops.enrollments_for(id).await;
    let buckets = bucket_enrollments(&now, &enrollments);
    let views = Bucket::ALL
        .into_iter()
        .map(|bucket| BucketView {
            bucket,
            label: bucket_label(bucket, language).to_string(),
            enrollments: buckets
                .get(bucket)
                .iter()
                .map(|e| EnrollmentView {
                    enrollment: (*e).clone(),
                    starts_at: format_clock(e.arrival, &tz),
                    ends_at: format_clock(e.end(), &tz),
                })
                .collect(),
        })
        .collect();

    Ok(Json(HoopDetail {
        hoop: hoop.clone(),
        badge_color: hoop.condition.badge_color().to_string(),
        directions_url: directions_url(hoop.location),
        buckets: views,
    }))
}

#[utoipa::path(
    post,
    path = "/hoops/{id}/enrollments",
    params(("id" = u32, Path, description = "Hoop id")),
    request_body = NewEnrollment,
    responses(
        (status = 201, description = "Enrollment created", body = crate::models::Enrollment),
        (status = 400, description = "Invalid enrollment"),
        (status = 404, description = "Unknown hoop")
    ),
    tag = "hoops"
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(new): Json<NewEnrollment>,
) -> Result<impl IntoResponse, ApiError> {
    let enrollment = state.hoops.enroll(id, new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/hoops/{id}/enrollments.ics",
    params(("id" = u32, Path, description = "Hoop id")),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 404, description = "Unknown hoop or no upcoming enrollments")
    ),
    tag = "hoops"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<impl IntoResponse, ApiError> {
    let hoop = find_hoop(&state, id)?;
    let now = Utc::now().with_timezone(&state.settings.timezone);
    let enrollments = state.hoops.enrollments_for(id).await;
    let buckets = bucket_enrollments(&now, &enrollments);

    let upcoming: Vec<_> = Bucket::ALL
        .into_iter()
        .flat_map(|bucket| buckets.get(bucket).iter().copied())
        .collect();
    if upcoming.is_empty() {
        return Err(ApiError::NotFound("No upcoming enrollments".into()));
    }

    let body = state.exporter.generate(hoop, &upcoming);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=hoop_enrollments.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/preferences",
    responses((status = 200, description = "Saved preferences", body = Preferences)),
    tag = "preferences"
)]
pub async fn get_preferences(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.preferences.get().await)
}

#[utoipa::path(
    put,
    path = "/preferences",
    request_body = Preferences,
    responses(
        (status = 200, description = "Preferences saved", body = Preferences),
        (status = 400, description = "Invalid preferences")
    ),
    tag = "preferences"
)]
pub async fn put_preferences(
    State(state): State<AppState>,
    Json(preferences): Json<Preferences>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = state.preferences.update(preferences).await?;
    Ok(Json(saved))
}
