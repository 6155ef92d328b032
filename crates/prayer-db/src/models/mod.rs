//! Database models - SQLx-compatible structs for PostgreSQL tables

mod prayer_chain;
mod prayer_request;
mod user;

pub use prayer_chain::{
    ChainMemberCountModel, ChainMemberModel, PrayerChainModel, PrayerCommitmentModel,
};
pub use prayer_request::{PrayerLogModel, PrayerLogWithRequestModel, PrayerRequestModel};
pub use user::UserSummaryModel;
