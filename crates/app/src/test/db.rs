//! Per-test PostgreSQL databases inside one shared container

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction, query};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const USER: &str = "till_test";
const PASSWORD: &str = "till_test_password";

/// Started on first use and shared by every test in the binary.
static CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases waiting to be dropped by the background reaper.
static DROP_QUEUE: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("failed to start PostgreSQL container")
}

async fn start_reaper() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("failed to drop test database {name}: {error}");
            }
        }
    });

    sender
}

async fn server_url(database: &str) -> Option<String> {
    let container = CONTAINER.get()?;
    let port = container.get_host_port_ipv4(5432).await.ok()?;

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    Some(format!(
        "postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}"
    ))
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    if !is_generated_name(name) {
        return Ok(());
    }

    let Some(url) = server_url("postgres").await else {
        return Ok(());
    };

    let mut conn = PgConnection::connect(&url).await?;

    query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// Only names produced by [`TestDb::new`] are ever interpolated into DDL.
fn is_generated_name(name: &str) -> bool {
    name.len() <= 63
        && name.starts_with("till_test_")
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn generated_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock is after the epoch")
        .as_nanos();

    let thread = format!("{:?}", std::thread::current().id());
    let thread: String = thread.chars().filter(char::is_ascii_digit).collect();

    format!("till_test_{nanos}_{thread}")
}

/// A freshly migrated database owned by one test.
///
/// Service methods commit normally; isolation comes from every test getting its own
/// database. The database is queued for dropping when the value goes out of scope.
#[derive(Debug)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = DROP_QUEUE.get()
            && sender.send(self.name.clone()).is_err()
        {
            eprintln!("test database {} was not queued for dropping", self.name);
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROP_QUEUE.get_or_init(start_reaper).await;
        CONTAINER.get_or_init(start_container).await;

        let name = generated_name();

        assert!(is_generated_name(&name), "bad test database name {name}");

        let admin_url = server_url("postgres")
            .await
            .expect("container port should be mapped");

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("failed to connect to the maintenance database");

        query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("failed to create test database");

        conn.close()
            .await
            .expect("failed to close maintenance connection");

        let url = server_url(&name)
            .await
            .expect("container port should be mapped");

        let pool = PgPool::connect(&url)
            .await
            .expect("failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        Self { pool, name }
    }

    /// Open a transaction that is rolled back when dropped, for repository-level
    /// tests that inspect uncommitted state.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Postgres> {
        self.pool
            .begin()
            .await
            .expect("failed to start test transaction")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_accepted() {
        assert!(is_generated_name(&generated_name()));
    }

    #[test]
    fn foreign_names_are_refused() {
        assert!(!is_generated_name("postgres"));
        assert!(!is_generated_name("till_test_1\"; DROP TABLE x"));
        assert!(!is_generated_name(&format!("till_test_{}", "9".repeat(60))));
    }

    #[tokio::test]
    async fn migrated_database_is_usable() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'cart_lines'",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("query should succeed");

        assert_eq!(tables, 1);
    }
}
