use utoipa::OpenApi;

use crate::format::Language;
use crate::geo::{Coordinate, DistanceUnit, GeoPoint};
use crate::models::{
    BucketView, Condition, Enrollment, EnrollmentView, Hoop, HoopDetail, HoopList, HoopSummary,
    NewEnrollment,
};
use crate::preferences::{MapView, Preferences};
use crate::schedule::Bucket;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_hoops,
        crate::handlers::get_hoop,
        crate::handlers::create_enrollment,
        crate::handlers::get_ical,
        crate::handlers::get_preferences,
        crate::handlers::put_preferences
    ),
    components(schemas(
        Bucket,
        BucketView,
        Condition,
        Coordinate,
        DistanceUnit,
        Enrollment,
        EnrollmentView,
        GeoPoint,
        Hoop,
        HoopDetail,
        HoopList,
        HoopSummary,
        Language,
        MapView,
        NewEnrollment,
        Preferences
    )),
    tags(
        (name = "hoops", description = "Nearby courts and player enrollments"),
        (name = "preferences", description = "Saved user preferences")
    ),
)]
pub struct ApiDoc;
