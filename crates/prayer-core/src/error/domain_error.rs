//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{PrayerStatus, Snowflake};

/// Coarse classification used by every outer layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    InvalidOperation,
    StorageFailure,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::InvalidOperation => "invalid_operation",
            Self::StorageFailure => "storage_failure",
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("prayer request not found: {0}")]
    PrayerRequestNotFound(Snowflake),

    #[error("prayer chain not found: {0}")]
    PrayerChainNotFound(Snowflake),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("you can only modify your own prayer requests")]
    NotRequestOwner,

    #[error("only the chain creator can modify this prayer chain")]
    NotChainCreator,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("you have already prayed for this request")]
    AlreadyPrayed,

    #[error("prayer request {0} is already answered")]
    AlreadyAnswered(Snowflake),

    #[error("already a member of this prayer chain")]
    AlreadyMember,

    #[error("already committed to pray for this user in this chain")]
    DuplicateCommitment,

    #[error("cannot move a prayer request from {from} to {to}")]
    InvalidStatusTransition {
        from: PrayerStatus,
        to: PrayerStatus,
    },

    // =========================================================================
    // Chain Rule Violations
    // =========================================================================
    #[error("you must be a member of the chain to commit to pray")]
    NotAMember,

    #[error("cannot commit to pray for yourself")]
    SelfCommitment,

    #[error("the user you want to pray for is not a member of this chain")]
    TargetNotMember,

    #[error("not a member of this prayer chain")]
    NotMember,

    // =========================================================================
    // Infrastructure
    // =========================================================================
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PrayerRequestNotFound(_) => "UNKNOWN_PRAYER_REQUEST",
            Self::PrayerChainNotFound(_) => "UNKNOWN_PRAYER_CHAIN",

            Self::NotRequestOwner => "NOT_REQUEST_OWNER",
            Self::NotChainCreator => "NOT_CHAIN_CREATOR",

            Self::AlreadyPrayed => "ALREADY_PRAYED",
            Self::AlreadyAnswered(_) => "ALREADY_ANSWERED",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::DuplicateCommitment => "DUPLICATE_COMMITMENT",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",

            Self::NotAMember => "NOT_A_MEMBER",
            Self::SelfCommitment => "SELF_COMMITMENT",
            Self::TargetNotMember => "TARGET_NOT_MEMBER",
            Self::NotMember => "NOT_MEMBER",

            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PrayerRequestNotFound(_) | Self::PrayerChainNotFound(_) => ErrorKind::NotFound,
            Self::NotRequestOwner | Self::NotChainCreator => ErrorKind::Forbidden,
            Self::AlreadyPrayed
            | Self::AlreadyAnswered(_)
            | Self::AlreadyMember
            | Self::DuplicateCommitment
            | Self::InvalidStatusTransition { .. } => ErrorKind::Conflict,
            Self::NotAMember | Self::SelfCommitment | Self::TargetNotMember | Self::NotMember => {
                ErrorKind::InvalidOperation
            }
            Self::DatabaseError(_) => ErrorKind::StorageFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_cover_each_group() {
        assert_eq!(
            DomainError::PrayerChainNotFound(Snowflake::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(DomainError::NotRequestOwner.kind(), ErrorKind::Forbidden);
        assert_eq!(DomainError::AlreadyPrayed.kind(), ErrorKind::Conflict);
        assert_eq!(
            DomainError::SelfCommitment.kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            DomainError::DatabaseError("boom".to_string()).kind(),
            ErrorKind::StorageFailure
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::DuplicateCommitment.code(),
            "DUPLICATE_COMMITMENT"
        );
        assert_eq!(DomainError::TargetNotMember.code(), "TARGET_NOT_MEMBER");
        assert_eq!(
            DomainError::AlreadyAnswered(Snowflake::new(3)).code(),
            "ALREADY_ANSWERED"
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
        assert_eq!(ErrorKind::StorageFailure.as_str(), "storage_failure");
        assert_eq!(DomainError::NotMember.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidStatusTransition {
            from: PrayerStatus::Closed,
            to: PrayerStatus::Answered,
        };
        assert_eq!(
            err.to_string(),
            "cannot move a prayer request from closed to answered"
        );
        assert_eq!(
            DomainError::PrayerRequestNotFound(Snowflake::new(9)).to_string(),
            "prayer request not found: 9"
        );
    }
}
