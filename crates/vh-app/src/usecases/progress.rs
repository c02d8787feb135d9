//! Main menu progress: plan totals, last download and pending work.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info_span, Instrument};
use vh_core::ports::{
    CollationRepositoryPort, ShipmentRepositoryPort, ShipmentWorkRepositoryPort,
    SystemRepositoryPort,
};
use vh_core::progress::ProgressSummary;

use crate::deps::AppDeps;

pub struct GetProgress {
    shipments: Arc<dyn ShipmentRepositoryPort>,
    shipment_work: Arc<dyn ShipmentWorkRepositoryPort>,
    collation: Arc<dyn CollationRepositoryPort>,
    system: Arc<dyn SystemRepositoryPort>,
}

impl GetProgress {
    pub fn from_deps(deps: &AppDeps) -> Self {
        Self {
            shipments: deps.shipments.clone(),
            shipment_work: deps.shipment_work.clone(),
            collation: deps.collation.clone(),
            system: deps.system.clone(),
        }
    }

    pub async fn execute(&self) -> Result<ProgressSummary> {
        let span = info_span!("usecase.get_progress.execute");

        async {
            let plans = self.shipments.list_plans().await?;
            let mut summary = ProgressSummary::from_plans(&plans);

            summary.last_received = self
                .system
                .load()
                .await?
                .and_then(|setting| setting.data_recv_ymdhms);
            summary.has_unsent = !self.shipments.list_unsent_containers().await?.is_empty()
                || !self.collation.list_unsent_completed().await?.is_empty();
            summary.has_work = self.shipment_work.has_work().await?;

            debug!(
                plans = plans.len(),
                has_unsent = summary.has_unsent,
                has_work = summary.has_work,
                "progress computed"
            );
            Ok(summary)
        }
        .instrument(span)
        .await
    }
}
