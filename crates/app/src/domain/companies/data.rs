//! Company Data

use crate::domain::companies::records::CompanyId;

/// New Company Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
}

/// New Store Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    /// Company the store belongs to.
    pub company: CompanyId,

    pub name: String,
}
