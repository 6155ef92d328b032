//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in prayer-core.

mod chain_member;
mod commitment;
mod error;
mod prayer_chain;
mod prayer_log;
mod prayer_request;
mod user;

pub use chain_member::PgChainMemberRepository;
pub use commitment::PgCommitmentRepository;
pub use prayer_chain::PgPrayerChainRepository;
pub use prayer_log::PgPrayerLogRepository;
pub use prayer_request::PgPrayerRequestRepository;
pub use user::PgUserRepository;
