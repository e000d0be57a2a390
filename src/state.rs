use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::estimates::cost::{AvailabilityOracle, RandomAvailability};
use crate::estimates::distance::{DistanceEstimator, HeuristicDistance};
use crate::storage::{MemoryStore, MoveStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MoveStore>,
    pub config: Arc<AppConfig>,
    pub distance: Arc<dyn DistanceEstimator>,
    pub availability: Arc<dyn AvailabilityOracle>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store: Arc<dyn MoveStore> = match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory store");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL missing"))?;
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("using postgres store");
                Arc::new(PgStore::new(pool))
            }
        };

        Ok(Self {
            store,
            config,
            distance: Arc::new(HeuristicDistance),
            availability: Arc::new(RandomAvailability),
        })
    }

    pub fn from_parts(
        store: Arc<dyn MoveStore>,
        config: Arc<AppConfig>,
        distance: Arc<dyn DistanceEstimator>,
        availability: Arc<dyn AvailabilityOracle>,
    ) -> Self {
        Self {
            store,
            config,
            distance,
            availability,
        }
    }

    /// Memory-backed state with fixed collaborators for tests.
    pub fn fake() -> Self {
        struct FixedDistance;
        impl DistanceEstimator for FixedDistance {
            fn estimate_miles(&self, _origin: &str, _destination: &str) -> i64 {
                12
            }
        }
        struct AlwaysAvailable;
        impl AvailabilityOracle for AlwaysAvailable {
            fn is_available(&self) -> bool {
                true
            }
        }

        let config = Arc::new(AppConfig {
            database_url: None,
            store_backend: StoreBackend::Memory,
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        });

        Self {
            store: Arc::new(MemoryStore::new()),
            config,
            distance: Arc::new(FixedDistance),
            availability: Arc::new(AlwaysAvailable),
        }
    }
}
