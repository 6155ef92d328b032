//! Value objects - immutable types that represent domain concepts

mod prayer_status;
mod snowflake;

pub use prayer_status::PrayerStatus;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
