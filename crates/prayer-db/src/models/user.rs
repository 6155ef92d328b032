//! User database model (read-only projection of the identity table)

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserSummaryModel {
    pub id: i64,
    pub username: String,
    pub email: String,
}
