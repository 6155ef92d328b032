//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one call and
//! enforce every domain rule before touching storage.

pub mod context;
pub mod error;
pub mod prayer;
pub mod prayer_chain;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use prayer::PrayerService;
pub use prayer_chain::PrayerChainService;
