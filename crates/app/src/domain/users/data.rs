//! User Data

use crate::domain::companies::records::CompanyId;

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub company: CompanyId,
    pub full_name: String,

    /// Unique across all companies.
    pub email: String,
}
