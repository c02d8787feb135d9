use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, info_span, Instrument};
use vh_core::ports::{HandyServicePort, ServiceResult};

/// Asks the back office for its clock, used to check connectivity and
/// to set the terminal time.
pub struct GetServerTime {
    service: Arc<dyn HandyServicePort>,
}

impl GetServerTime {
    pub fn new(service: Arc<dyn HandyServicePort>) -> Self {
        Self { service }
    }

    pub async fn execute(&self) -> ServiceResult<Option<NaiveDateTime>> {
        let span = info_span!("usecase.get_server_time.execute");

        async {
            let server_time = self.service.get_sys_date().await?;
            info!(?server_time, "server time received");
            Ok(server_time)
        }
        .instrument(span)
        .await
    }
}
