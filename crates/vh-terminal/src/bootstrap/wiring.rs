//! # Dependency Injection
//!
//! The only place that depends on `vh-infra` and `vh-app` at once. It
//! assembles adapters into [`AppDeps`] and makes no decisions of its own
//! beyond picking the endpoint.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use vh_app::{AppDeps, RecordingHandyService};
use vh_core::config::AppConfig;
use vh_core::ports::*;
use vh_core::system::SystemSetting;
use vh_infra::db::pool::{init_db_pool, DbPool};
use vh_infra::db::repositories::{
    DieselCollationRepository, DieselCommHistoryRepository, DieselShipmentRepository,
    DieselShipmentWorkRepository, DieselSystemRepository,
};
use vh_infra::photo::FsPhotoStore;
use vh_infra::settings::FileSettingsRepository;
use vh_infra::soap::{SoapAsmxClient, SoapClientConfig, SoapHandyService};
use vh_infra::{DieselSqliteExecutor, SystemClock};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    #[error("Web service client initialization failed: {0}")]
    ServiceInit(String),
}

fn create_db_pool(db_path: &Path) -> WiringResult<DbPool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::DatabaseInit(format!("Failed to create DB directory: {}", e))
        })?;
    }

    let db_url = db_path
        .to_str()
        .ok_or_else(|| WiringError::DatabaseInit("Invalid database path".to_string()))?;

    init_db_pool(db_url)
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to initialize DB: {:#}", e)))
}

/// The system row's URL wins over the configured endpoint when set.
fn resolve_endpoint(setting: Option<&SystemSetting>, configured: &str) -> String {
    setting
        .and_then(|s| s.web_svc_url.as_deref())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(configured)
        .to_string()
}

/// Builds every adapter and returns the dependency set for [`vh_app::App`].
///
/// The web service is wrapped in [`RecordingHandyService`] so every call
/// is retried and written to the communication history.
pub async fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let db_pool = create_db_pool(&config.storage.database_path)?;
    let exec = DieselSqliteExecutor::new(db_pool);

    let shipments: Arc<dyn ShipmentRepositoryPort> =
        Arc::new(DieselShipmentRepository::new(exec.clone()));
    let shipment_work: Arc<dyn ShipmentWorkRepositoryPort> =
        Arc::new(DieselShipmentWorkRepository::new(exec.clone()));
    let collation: Arc<dyn CollationRepositoryPort> =
        Arc::new(DieselCollationRepository::new(exec.clone()));
    let system: Arc<dyn SystemRepositoryPort> = Arc::new(DieselSystemRepository::new(exec.clone()));
    let comm_history: Arc<dyn CommHistoryRepositoryPort> =
        Arc::new(DieselCommHistoryRepository::new(exec));
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let setting = system
        .load()
        .await
        .map_err(|e| WiringError::DatabaseInit(format!("Failed to read system row: {:#}", e)))?;
    let endpoint = resolve_endpoint(setting.as_ref(), &config.endpoint);
    let client = SoapAsmxClient::new(SoapClientConfig {
        endpoint: endpoint.clone(),
        connect_timeout: Duration::from_secs(config.http.connect_timeout_secs),
        request_timeout: Duration::from_secs(config.http.request_timeout_secs),
    })
    .map_err(|e| WiringError::ServiceInit(e.to_string()))?;
    info!(%endpoint, "web service endpoint");

    let handy_service: Arc<dyn HandyServicePort> = Arc::new(RecordingHandyService::new(
        Arc::new(SoapHandyService::new(client)),
        comm_history.clone(),
        clock.clone(),
    ));

    Ok(AppDeps {
        shipments,
        shipment_work,
        collation,
        system,
        comm_history,
        handy_service,
        photos: Arc::new(FsPhotoStore::new(&config.storage.image_dir)),
        settings: Arc::new(FileSettingsRepository::new(&config.storage.settings_path)),
        clock,
    })
}
