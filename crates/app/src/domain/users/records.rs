//! User Records

use jiff::Timestamp;

use crate::{
    domain::companies::records::{CompanyId, StoreRecord},
    ids::TypedId,
};

/// User ID
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub company_id: CompanyId,
    pub full_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with their company name and the stores they may sell from.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: UserRecord,
    pub company_name: String,

    /// Ordered by store id.
    pub stores: Vec<StoreRecord>,
}
