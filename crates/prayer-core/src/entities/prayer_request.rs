//! Prayer request entity - a need shared with the community

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{PrayerStatus, Snowflake};

/// A prayer request and its answered-state bookkeeping.
///
/// `answered_at` and `answer_testimony` are either both `None` or both set,
/// and only ever set by [`PrayerRequest::mark_answered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerRequest {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub request: String,
    pub is_anonymous: bool,
    pub prayer_count: i32,
    pub status: PrayerStatus,
    pub answered_at: Option<DateTime<Utc>>,
    pub answer_testimony: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrayerRequest {
    pub fn new(id: Snowflake, user_id: Snowflake, request: String, is_anonymous: bool) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            request,
            is_anonymous,
            prayer_count: 0,
            status: PrayerStatus::Pending,
            answered_at: None,
            answer_testimony: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Replace the request text and anonymity flag
    pub fn update_content(&mut self, request: String, is_anonymous: bool) {
        self.request = request;
        self.is_anonymous = is_anonymous;
        self.updated_at = Utc::now();
    }

    /// Move `pending -> answered`. Any other starting state is rejected.
    pub fn mark_answered(
        &mut self,
        testimony: String,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        match self.status {
            PrayerStatus::Pending => {
                self.status = PrayerStatus::Answered;
                self.answered_at = Some(at);
                self.answer_testimony = Some(testimony);
                self.updated_at = at;
                Ok(())
            }
            PrayerStatus::Answered => Err(DomainError::AlreadyAnswered(self.id)),
            from => Err(DomainError::InvalidStatusTransition {
                from,
                to: PrayerStatus::Answered,
            }),
        }
    }
}
