use anyhow::Result;
use vh_core::collation::KakuninContainer;
use vh_core::shipment::ContainerSize;
use vh_core::vanning::{LoadLimits, SelectionMode};

use crate::usecases::collation::list_targets;
use crate::usecases::vanning::resolve_load_limits;
use crate::usecases::*;
use crate::AppDeps;

/// The application runtime.
///
/// Holds the ports and the one sync guard shared by every sync entry
/// point, and hands out use cases built from them.
pub struct App {
    deps: AppDeps,
    sync_guard: SyncGuard,
}

impl App {
    /// This constructor signature is the dependency manifest.
    pub fn new(deps: AppDeps) -> Self {
        Self {
            deps,
            sync_guard: SyncGuard::new(),
        }
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn sync_guard(&self) -> &SyncGuard {
        &self.sync_guard
    }

    pub fn data_sync(&self) -> DataSync {
        DataSync::from_deps(&self.deps, self.sync_guard.clone())
    }

    pub async fn load_limits(&self, size: ContainerSize) -> Result<LoadLimits> {
        resolve_load_limits(self.deps.system.as_ref(), size).await
    }

    pub async fn open_bundle_select(
        &self,
        mode: SelectionMode,
        limits: LoadLimits,
    ) -> Result<BundleSelectSession> {
        BundleSelectSession::open(&self.deps, mode, limits).await
    }

    pub fn register_container(&self) -> RegisterContainer {
        RegisterContainer::from_deps(&self.deps, self.sync_guard.clone())
    }

    pub async fn collation_targets(&self) -> Result<Vec<KakuninContainer>> {
        list_targets(self.deps.collation.as_ref()).await
    }

    /// Opens the `selected_no`-th (1-based) uncollated container.
    pub async fn open_collation(&self, selected_no: usize) -> Result<CollationSession, CollateError> {
        CollationSession::select(&self.deps, self.sync_guard.clone(), selected_no).await
    }

    pub fn get_progress(&self) -> GetProgress {
        GetProgress::from_deps(&self.deps)
    }

    pub fn get_server_time(&self) -> GetServerTime {
        GetServerTime::new(self.deps.handy_service.clone())
    }

    pub fn list_comm_history(&self) -> ListCommHistory {
        ListCommHistory::new(self.deps.comm_history.clone())
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.deps.settings.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.deps.settings.clone())
    }
}
