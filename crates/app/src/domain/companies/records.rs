//! Company Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Company ID
pub type CompanyId = TypedId<CompanyRecord>;

/// Company Record
#[derive(Debug, Clone)]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Store ID
pub type StoreId = TypedId<StoreRecord>;

/// Store Record
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub id: StoreId,

    /// Owning company.
    pub company_id: CompanyId,

    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
