//! Prayer chain entity - a group whose members commit to pray for each other

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerChain {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub created_by_user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrayerChain {
    pub fn new(
        id: Snowflake,
        name: String,
        description: Option<String>,
        created_by_user_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            created_by_user_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_creator(&self, user_id: Snowflake) -> bool {
        self.created_by_user_id == user_id
    }

    pub fn set_details(&mut self, name: String, description: Option<String>) {
        self.name = name;
        self.description = description;
        self.updated_at = Utc::now();
    }
}
