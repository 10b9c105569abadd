//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        companies::records::StoreId,
        users::{
            data::NewUser,
            errors::UsersServiceError,
            records::{UserId, UserProfile, UserRecord},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(&self, user: UserId) -> Result<UserProfile, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let (record, company_name) = self.repository.get_user_with_company(&mut tx, user).await?;
        let stores = self.repository.list_user_stores(&mut tx, user).await?;

        tx.commit().await?;

        Ok(UserProfile {
            user: record,
            company_name,
            stores,
        })
    }

    async fn assign_store(&self, user: UserId, store: StoreId) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if !self
            .repository
            .store_in_user_company(&mut tx, user, store)
            .await?
        {
            return Err(UsersServiceError::InvalidReference);
        }

        self.repository.assign_store(&mut tx, user, store).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a user inside an existing company.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// The user, their company name and the stores assigned to them.
    async fn get_profile(&self, user: UserId) -> Result<UserProfile, UsersServiceError>;

    /// Let `user` sell from `store`. The store must belong to the user's company.
    async fn assign_store(&self, user: UserId, store: StoreId) -> Result<(), UsersServiceError>;
}
