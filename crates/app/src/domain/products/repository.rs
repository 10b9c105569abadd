//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    companies::records::{CompanyId, StoreId},
    products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductId, ProductListing, ProductRecord},
    },
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const SEARCH_PRODUCTS_SQL: &str = include_str!("sql/search_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const STORE_IN_COMPANY_SQL: &str = include_str!("sql/store_in_company.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch a live product owned by `company`. Soft-deleted rows are not found.
    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyId,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(company.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.company.into_i64())
            .bind(product.sku)
            .bind(product.name)
            .bind(product.purchase_price)
            .bind(product.sale_price)
            .bind(product.unit_name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Live products of `company` whose name contains `search`, ordered by name.
    pub(crate) async fn search_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyId,
        search: Option<&str>,
        store: Option<StoreId>,
    ) -> Result<Vec<ProductListing>, sqlx::Error> {
        query_as::<Postgres, ProductListing>(SEARCH_PRODUCTS_SQL)
            .bind(company.into_i64())
            .bind(search)
            .bind(store.map(StoreId::into_i64))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyId,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(company.into_i64())
            .bind(update.sku)
            .bind(update.name)
            .bind(update.purchase_price)
            .bind(update.sale_price)
            .bind(update.unit_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn store_in_company(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyId,
        store: StoreId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(STORE_IN_COMPANY_SQL)
            .bind(store.into_i64())
            .bind(company.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        company: CompanyId,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(company.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            company_id: CompanyId::from_i64(row.try_get("company_id")?),
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            purchase_price: row.try_get("purchase_price")?,
            sale_price: row.try_get("sale_price")?,
            unit_name: row.try_get("unit_name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductListing {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord::from_row(row)?,
            stock: row.try_get("stock")?,
        })
    }
}
