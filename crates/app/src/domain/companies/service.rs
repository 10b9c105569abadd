//! Companies service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::companies::{
        data::{NewCompany, NewStore},
        errors::CompaniesServiceError,
        records::{CompanyRecord, StoreRecord},
        repository::PgCompaniesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCompaniesService {
    db: Db,
    repository: PgCompaniesRepository,
}

impl PgCompaniesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCompaniesRepository::new(),
        }
    }
}

#[async_trait]
impl CompaniesService for PgCompaniesService {
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_company(&mut tx, company).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, CompaniesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_store(&mut tx, store).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
/// Company and store persistence operations.
pub trait CompaniesService: Send + Sync {
    /// Creates a new company.
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Creates a store owned by an existing company.
    async fn create_store(&self, store: NewStore) -> Result<StoreRecord, CompaniesServiceError>;
}
