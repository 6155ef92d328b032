//! Chain, membership, commitment, and user mappers

use prayer_core::entities::{ChainMember, PrayerChain, PrayerCommitment, UserSummary};
use prayer_core::value_objects::Snowflake;

use crate::models::{ChainMemberModel, PrayerChainModel, PrayerCommitmentModel, UserSummaryModel};

impl From<PrayerChainModel> for PrayerChain {
    fn from(model: PrayerChainModel) -> Self {
        PrayerChain {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            created_by_user_id: Snowflake::new(model.created_by_user_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ChainMemberModel> for ChainMember {
    fn from(model: ChainMemberModel) -> Self {
        ChainMember {
            id: Snowflake::new(model.id),
            chain_id: Snowflake::new(model.chain_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PrayerCommitmentModel> for PrayerCommitment {
    fn from(model: PrayerCommitmentModel) -> Self {
        PrayerCommitment {
            id: Snowflake::new(model.id),
            chain_id: Snowflake::new(model.chain_id),
            member_id: Snowflake::new(model.member_id),
            pray_for_user_id: Snowflake::new(model.pray_for_user_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UserSummaryModel> for UserSummary {
    fn from(model: UserSummaryModel) -> Self {
        UserSummary {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
        }
    }
}

/// Raw `i64` IDs for `= ANY($1)` binds
pub fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().copied().map(Snowflake::into_inner).collect()
}
