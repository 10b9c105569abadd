//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    companies::records::{CompanyId, StoreId, StoreRecord},
    users::{
        data::NewUser,
        records::{UserId, UserRecord},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const LIST_USER_STORES_SQL: &str = include_str!("sql/list_user_stores.sql");
const STORE_IN_USER_COMPANY_SQL: &str = include_str!("sql/store_in_user_company.sql");
const ASSIGN_STORE_SQL: &str = include_str!("sql/assign_store.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.company.into_i64())
            .bind(user.full_name)
            .bind(user.email)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a user and the name of the company they belong to.
    pub(crate) async fn get_user_with_company(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<(UserRecord, String), sqlx::Error> {
        let row = query(GET_PROFILE_SQL)
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        let company_name = row.try_get("company_name")?;

        Ok((UserRecord::from_row(&row)?, company_name))
    }

    pub(crate) async fn list_user_stores(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_USER_STORES_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether `store` exists and belongs to the same company as `user`.
    pub(crate) async fn store_in_user_company(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        store: StoreId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(STORE_IN_USER_COMPANY_SQL)
            .bind(user.into_i64())
            .bind(store.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Record that `user` may sell from `store`. Assigning twice is a no-op.
    pub(crate) async fn assign_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        store: StoreId,
    ) -> Result<(), sqlx::Error> {
        query(ASSIGN_STORE_SQL)
            .bind(user.into_i64())
            .bind(store.into_i64())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: UserId::from_i64(row.try_get("id")?),
            company_id: CompanyId::from_i64(row.try_get("company_id")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
