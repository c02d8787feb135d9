//! Dependency grouping for [`crate::App`] construction.
//!
//! A plain struct of ports, filled in by the composition root. No defaults
//! and no build steps.

use std::sync::Arc;

use vh_core::ports::*;

pub struct AppDeps {
    // Shipment / 出荷
    pub shipments: Arc<dyn ShipmentRepositoryPort>,
    pub shipment_work: Arc<dyn ShipmentWorkRepositoryPort>,

    // Collation / 照合
    pub collation: Arc<dyn CollationRepositoryPort>,

    // System row and communication history
    pub system: Arc<dyn SystemRepositoryPort>,
    pub comm_history: Arc<dyn CommHistoryRepositoryPort>,

    // Web service, already wrapped with retries and history recording
    pub handy_service: Arc<dyn HandyServicePort>,

    pub photos: Arc<dyn PhotoStorePort>,
    pub settings: Arc<dyn SettingsPort>,
    pub clock: Arc<dyn ClockPort>,
}
