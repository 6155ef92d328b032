//! Repository traits

mod repositories;

pub use repositories::{
    ChainMemberRepository, CommitmentRepository, PrayerChainRepository, PrayerLogRepository,
    PrayerRequestRepository, RepoResult, UserRepository,
};
