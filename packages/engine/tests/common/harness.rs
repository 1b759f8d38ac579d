//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests: the container starts
//! and migrations run once on the first test, then every test reuses them.

use anyhow::{Context, Result};
use engine_core::kernel::EngineDeps;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: Option<ContainerAsync<Postgres>>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // `DATABASE_URL` bypasses testcontainers for environments without a
        // Docker daemon; otherwise a Postgres container is started as usual.
        // Each test process gets its own database either way: the container
        // is per-process, and the bypass creates a uniquely named database
        // on the provided server to match that isolation.
        let (db_url, postgres) = match std::env::var("DATABASE_URL") {
            Ok(url) => {
                let admin = PgPool::connect(&url)
                    .await
                    .context("Failed to connect to DATABASE_URL")?;
                let db_name = format!("engine_test_{}", std::process::id());
                sqlx::query(&format!("DROP DATABASE IF EXISTS {}", db_name))
                    .execute(&admin)
                    .await
                    .context("Failed to drop stale test database")?;
                sqlx::query(&format!("CREATE DATABASE {}", db_name))
                    .execute(&admin)
                    .await
                    .context("Failed to create test database")?;
                let base = url.rsplit_once('/').map(|(b, _)| b).unwrap_or(&url);
                (format!("{}/{}", base, db_name), None)
            }
            Err(_) => {
                let postgres = Postgres::default()
                    .with_tag("16")
                    .with_cmd(["-c", "max_connections=200"])
                    .start()
                    .await
                    .context("Failed to start Postgres container")?;

                let pg_host = postgres.get_host().await?;
                let pg_port = postgres.get_host_port_ipv4(5432).await?;
                let db_url = format!(
                    "postgresql://postgres:postgres@{}:{}/postgres",
                    pg_host, pg_port
                );
                (db_url, Some(postgres))
            }
        };

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh pool and `EngineDeps`, but reuses the same
/// database container. Tests create their own accounts/posts, so rows from
/// other tests never collide.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let deps = ctx.deps();
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    /// Database pool - use this for test fixtures.
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Engine dependencies over this harness's pool.
    pub fn deps(&self) -> EngineDeps {
        EngineDeps::new(self.db_pool.clone())
    }
}
