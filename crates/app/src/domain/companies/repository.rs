//! Companies Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::companies::{
    data::{NewCompany, NewStore},
    records::{CompanyId, CompanyRecord, StoreId, StoreRecord},
};

const CREATE_COMPANY_SQL: &str = include_str!("sql/create_company.sql");
const CREATE_STORE_SQL: &str = include_str!("sql/create_store.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCompaniesRepository;

impl PgCompaniesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_company(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: NewCompany,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Postgres, CompanyRecord>(CREATE_COMPANY_SQL)
            .bind(company.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.company.into_i64())
            .bind(store.name)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CompanyRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CompanyId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: StoreId::from_i64(row.try_get("id")?),
            company_id: CompanyId::from_i64(row.try_get("company_id")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
