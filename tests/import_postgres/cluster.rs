//! Embedded `PostgreSQL` cluster used when no external test database is set.

use super::helpers::BoxError;
use postgresql_embedded::{PostgreSQL, Settings};
use std::sync::OnceLock;

/// Database created inside the embedded cluster.
pub const TEST_DATABASE: &str = "pr_importer_test";

static EMBEDDED_CLUSTER: OnceLock<Result<EmbeddedCluster, String>> = OnceLock::new();

/// Embedded cluster kept alive for the rest of the test process.
pub struct EmbeddedCluster {
    _postgres: PostgreSQL,
    database_url: String,
}

impl EmbeddedCluster {
    fn start() -> Result<Self, BoxError> {
        // Own thread and runtime, so setup never nests inside a test runtime.
        std::thread::spawn(|| -> Result<Self, BoxError> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let mut postgres = PostgreSQL::new(Settings::default());
                postgres.setup().await?;
                postgres.start().await?;
                if !postgres.database_exists(TEST_DATABASE).await? {
                    postgres.create_database(TEST_DATABASE).await?;
                }
                let database_url = postgres.settings().url(TEST_DATABASE);
                Ok::<Self, BoxError>(Self {
                    _postgres: postgres,
                    database_url,
                })
            })
        })
        .join()
        .map_err(|_panic| -> BoxError { "embedded cluster setup panicked".into() })?
    }
}

/// Returns the URL of the shared embedded test database, starting the
/// cluster on first use.
///
/// # Errors
///
/// Returns an error when the cluster cannot be installed or started, for
/// example when the tests run as root.
pub fn embedded_database_url() -> Result<String, BoxError> {
    EMBEDDED_CLUSTER
        .get_or_init(|| EmbeddedCluster::start().map_err(|err| err.to_string()))
        .as_ref()
        .map(|cluster| cluster.database_url.clone())
        .map_err(|err| format!("failed to start embedded PostgreSQL: {err}").into())
}
