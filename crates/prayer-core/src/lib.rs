//! # prayer-core
//!
//! Domain layer for prayer requests and prayer chains: entities, value objects,
//! domain errors, and the repository traits the storage layer implements.
//! This crate has no dependency on the database or the web framework.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ChainMember, PrayerChain, PrayerCommitment, PrayerLog, PrayerRequest, UserSummary,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{
    ChainMemberRepository, CommitmentRepository, PrayerChainRepository, PrayerLogRepository,
    PrayerRequestRepository, RepoResult, UserRepository,
};
pub use value_objects::{PrayerStatus, Snowflake, SnowflakeGenerator, SnowflakeParseError};
