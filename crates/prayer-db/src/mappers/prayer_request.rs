//! PrayerRequest / PrayerLog entity <-> model mappers

use prayer_core::entities::{PrayerLog, PrayerRequest};
use prayer_core::value_objects::{PrayerStatus, Snowflake};

use crate::models::{PrayerLogModel, PrayerLogWithRequestModel, PrayerRequestModel};

/// The column is CHECK-constrained, so anything unknown means a schema drift;
/// treat it as pending rather than failing the whole read.
fn parse_status(status: &str) -> PrayerStatus {
    PrayerStatus::parse(status).unwrap_or_default()
}

impl From<PrayerRequestModel> for PrayerRequest {
    fn from(model: PrayerRequestModel) -> Self {
        PrayerRequest {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            request: model.request,
            is_anonymous: model.is_anonymous,
            prayer_count: model.prayer_count,
            status: parse_status(&model.status),
            answered_at: model.answered_at,
            answer_testimony: model.answer_testimony,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PrayerLogModel> for PrayerLog {
    fn from(model: PrayerLogModel) -> Self {
        PrayerLog {
            id: Snowflake::new(model.id),
            prayer_request_id: Snowflake::new(model.prayer_request_id),
            user_id: Snowflake::new(model.user_id),
            prayed_at: model.prayed_at,
        }
    }
}

/// Split a joined row into the log and, when present, its request
pub fn log_with_request(model: PrayerLogWithRequestModel) -> (PrayerLog, Option<PrayerRequest>) {
    let log = PrayerLog {
        id: Snowflake::new(model.id),
        prayer_request_id: Snowflake::new(model.prayer_request_id),
        user_id: Snowflake::new(model.user_id),
        prayed_at: model.prayed_at,
    };

    let request = match (
        model.r_id,
        model.r_user_id,
        model.r_request,
        model.r_created_at,
        model.r_updated_at,
    ) {
        (Some(id), Some(user_id), Some(request), Some(created_at), Some(updated_at)) => {
            Some(PrayerRequest {
                id: Snowflake::new(id),
                user_id: Snowflake::new(user_id),
                request,
                is_anonymous: model.r_is_anonymous.unwrap_or(true),
                prayer_count: model.r_prayer_count.unwrap_or(0),
                status: model
                    .r_status
                    .as_deref()
                    .map(parse_status)
                    .unwrap_or_default(),
                answered_at: model.r_answered_at,
                answer_testimony: model.r_answer_testimony,
                created_at,
                updated_at,
            })
        }
        _ => None,
    };

    (log, request)
}
