//! Domain entities - core business objects

mod chain_member;
mod commitment;
mod prayer_chain;
mod prayer_log;
mod prayer_request;
mod user;

pub use chain_member::ChainMember;
pub use commitment::PrayerCommitment;
pub use prayer_chain::PrayerChain;
pub use prayer_log::PrayerLog;
pub use prayer_request::PrayerRequest;
pub use user::UserSummary;
