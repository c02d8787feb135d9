//! Retry and communication-history decorator for [`HandyServicePort`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::future::BoxFuture;
use tracing::{debug, warn};
use vh_core::history::NewCommHistory;
use vh_core::ports::{
    ClockPort, CommHistoryRepositoryPort, HandyServiceError, HandyServicePort, ServiceCall,
    ServiceResult,
};
use vh_core::time::format_db;
use vh_core::wire::{BunningData, CollateData, SyougoData, SyukkaData};

pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Wraps the remote service: every call is tried up to `attempts` times
/// and leaves exactly one `comm_history` row, success or not.
///
/// After the last failed attempt the error is wrapped in
/// [`HandyServiceError::Exhausted`] carrying the operator message of the
/// call. A failing history write is logged and never replaces the call's
/// own outcome.
pub struct RecordingHandyService {
    inner: Arc<dyn HandyServicePort>,
    history: Arc<dyn CommHistoryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    attempts: u32,
}

impl RecordingHandyService {
    pub fn new(
        inner: Arc<dyn HandyServicePort>,
        history: Arc<dyn CommHistoryRepositoryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            inner,
            history,
            clock,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    async fn record<'a, T: Send>(
        &'a self,
        call: ServiceCall,
        argument: String,
        describe: fn(&T) -> String,
        op: impl Fn() -> BoxFuture<'a, ServiceResult<T>> + Send + 'a,
    ) -> ServiceResult<T> {
        let started = self.clock.now();

        let mut attempt = 0;
        let outcome = loop {
            attempt += 1;
            match op().await {
                Ok(value) => break Ok(value),
                Err(err) if attempt < self.attempts => {
                    warn!(call = call.action(), attempt, error = %err, "web service call failed, retrying");
                }
                Err(err) => break Err(err),
            }
        };

        let entry = NewCommHistory::new(call.action(), started, self.clock.now())
            .with_argument(&argument);

        match outcome {
            Ok(value) => {
                self.write_history(entry.with_return_value(&describe(&value)))
                    .await;
                Ok(value)
            }
            Err(err) => {
                warn!(call = call.action(), attempts = self.attempts, error = %err, "web service call gave up");
                self.write_history(entry.with_error(err.kind(), &err.to_string()))
                    .await;
                Err(HandyServiceError::Exhausted {
                    message: call.failure_message().to_string(),
                    source: Box::new(err),
                })
            }
        }
    }

    async fn write_history(&self, entry: NewCommHistory) {
        let proc_name = entry.proc_name.clone();
        match self.history.append(entry).await {
            Ok(log_id) => debug!(%log_id, %proc_name, "communication history written"),
            Err(err) => warn!(%proc_name, error = %err, "failed to write communication history"),
        }
    }
}

fn describe_date(value: &Option<NaiveDateTime>) -> String {
    value.map(format_db).unwrap_or_default()
}

fn describe_flag(value: &bool) -> String {
    value.to_string()
}

fn describe_names(value: &Vec<String>) -> String {
    value.join(",")
}

fn describe_bytes(value: &Vec<u8>) -> String {
    format!("{} bytes", value.len())
}

fn describe_syukka(value: &Option<SyukkaData>) -> String {
    value
        .as_ref()
        .map(|d| format!("headers={} meisai={}", d.headers.len(), d.details.len()))
        .unwrap_or_default()
}

fn describe_syougo(value: &Option<SyougoData>) -> String {
    value
        .as_ref()
        .map(|d| format!("headers={} dtl={}", d.headers.len(), d.details.len()))
        .unwrap_or_default()
}

#[async_trait]
impl HandyServicePort for RecordingHandyService {
    async fn get_sys_date(&self) -> ServiceResult<Option<NaiveDateTime>> {
        self.record(ServiceCall::GetSysDate, String::new(), describe_date, || {
            self.inner.get_sys_date()
        })
        .await
    }

    async fn get_sagyou_ymd(&self) -> ServiceResult<Option<NaiveDateTime>> {
        self.record(ServiceCall::GetSagyouYmd, String::new(), describe_date, || {
            self.inner.get_sagyou_ymd()
        })
        .await
    }

    async fn get_update_ymd_hms(
        &self,
        sagyou_ymd: NaiveDateTime,
    ) -> ServiceResult<Option<NaiveDateTime>> {
        self.record(
            ServiceCall::GetUpdateYmdHms,
            format_db(sagyou_ymd),
            describe_date,
            || self.inner.get_update_ymd_hms(sagyou_ymd),
        )
        .await
    }

    async fn get_syukka_data(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<SyukkaData>> {
        self.record(
            ServiceCall::GetSyukkaData,
            format_db(sagyou_ymd),
            describe_syukka,
            || self.inner.get_syukka_data(sagyou_ymd),
        )
        .await
    }

    async fn send_syukka_data(&self, data: &BunningData) -> ServiceResult<bool> {
        let argument = format!("{} bundles={}", data.container_no, data.bundles.len());
        self.record(ServiceCall::SendSyukkaData, argument, describe_flag, || {
            self.inner.send_syukka_data(data)
        })
        .await
    }

    async fn upload_binary_file(&self, file_name: &str, buffer: &[u8]) -> ServiceResult<bool> {
        self.record(
            ServiceCall::UploadBinaryFile,
            file_name.to_string(),
            describe_flag,
            || self.inner.upload_binary_file(file_name, buffer),
        )
        .await
    }

    async fn get_download_handy_execute_file_names(&self) -> ServiceResult<Vec<String>> {
        self.record(
            ServiceCall::GetDownloadHandyExecuteFileNames,
            String::new(),
            describe_names,
            || self.inner.get_download_handy_execute_file_names(),
        )
        .await
    }

    async fn get_download_handy_execute_file(&self, file_name: &str) -> ServiceResult<Vec<u8>> {
        self.record(
            ServiceCall::GetDownloadHandyExecuteFile,
            file_name.to_string(),
            describe_bytes,
            || self.inner.get_download_handy_execute_file(file_name),
        )
        .await
    }

    async fn get_syougo_data(&self) -> ServiceResult<Option<SyougoData>> {
        self.record(ServiceCall::GetSyougoData, String::new(), describe_syougo, || {
            self.inner.get_syougo_data()
        })
        .await
    }

    async fn send_syougo_data(&self, data: &CollateData) -> ServiceResult<bool> {
        self.record(
            ServiceCall::SendSyougoData,
            data.container_id.clone(),
            describe_flag,
            || self.inner.send_syougo_data(data),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, FixedClock, RecordingHistory};
    use mockall::mock;

    mock! {
        Service {}

        #[async_trait]
        impl HandyServicePort for Service {
            async fn get_sys_date(&self) -> ServiceResult<Option<NaiveDateTime>>;
            async fn get_sagyou_ymd(&self) -> ServiceResult<Option<NaiveDateTime>>;
            async fn get_update_ymd_hms(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<NaiveDateTime>>;
            async fn get_syukka_data(&self, sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<SyukkaData>>;
            async fn send_syukka_data(&self, data: &BunningData) -> ServiceResult<bool>;
            async fn upload_binary_file(&self, file_name: &str, buffer: &[u8]) -> ServiceResult<bool>;
            async fn get_download_handy_execute_file_names(&self) -> ServiceResult<Vec<String>>;
            async fn get_download_handy_execute_file(&self, file_name: &str) -> ServiceResult<Vec<u8>>;
            async fn get_syougo_data(&self) -> ServiceResult<Option<SyougoData>>;
            async fn send_syougo_data(&self, data: &CollateData) -> ServiceResult<bool>;
        }
    }

    fn wrap(inner: MockService, history: Arc<RecordingHistory>) -> RecordingHandyService {
        RecordingHandyService::new(Arc::new(inner), history, Arc::new(FixedClock(at(3, 9))))
    }

    fn http_500() -> HandyServiceError {
        HandyServiceError::Http {
            status: 500,
            reason: "Internal Server Error".into(),
            body: "boom".into(),
        }
    }

    #[tokio::test]
    async fn success_writes_one_history_row() {
        let mut inner = MockService::new();
        inner
            .expect_get_update_ymd_hms()
            .times(1)
            .returning(|_| Ok(Some(at(2, 18))));
        let history = Arc::new(RecordingHistory::default());
        let service = wrap(inner, history.clone());

        let result = service.get_update_ymd_hms(at(3, 0)).await.unwrap();

        assert_eq!(result, Some(at(2, 18)));
        let rows = history.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].proc_name, "GetUpdateYmdHms");
        assert_eq!(rows[0].argument, "2025-03-03 00:00:00");
        assert_eq!(rows[0].return_value, "2025-03-02 18:00:00");
        assert_eq!(rows[0].err_number, "");
    }

    #[tokio::test]
    async fn retries_until_a_call_succeeds() {
        let mut inner = MockService::new();
        let mut calls = 0;
        inner.expect_get_sagyou_ymd().times(3).returning(move || {
            calls += 1;
            if calls < 3 {
                Err(HandyServiceError::Transport("connection reset".into()))
            } else {
                Ok(Some(at(3, 0)))
            }
        });
        let history = Arc::new(RecordingHistory::default());
        let service = wrap(inner, history.clone());

        assert_eq!(service.get_sagyou_ymd().await.unwrap(), Some(at(3, 0)));
        assert_eq!(history.rows().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_call_carries_operator_message_and_cause() {
        let mut inner = MockService::new();
        inner
            .expect_get_syukka_data()
            .times(3)
            .returning(|_| Err(http_500()));
        let history = Arc::new(RecordingHistory::default());
        let service = wrap(inner, history.clone());

        let err = service.get_syukka_data(at(3, 0)).await.unwrap_err();

        assert_eq!(err.to_string(), "出荷データの取得に失敗しました");
        assert_eq!(err.root().kind(), "Http");
        let rows = history.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].err_number, "Http");
        assert_eq!(
            rows[0].err_description.as_deref(),
            Some("HTTP 500 Internal Server Error\nboom")
        );
    }

    #[tokio::test]
    async fn attempt_count_is_configurable() {
        let mut inner = MockService::new();
        inner
            .expect_send_syougo_data()
            .times(1)
            .returning(|_| Err(HandyServiceError::Parse("bad xml".into())));
        let history = Arc::new(RecordingHistory::default());
        let service = wrap(inner, history.clone()).with_attempts(1);

        let data = CollateData {
            container_id: "C-1".into(),
            syogo_kanryo: true,
            details: Vec::new(),
        };
        let err = service.send_syougo_data(&data).await.unwrap_err();
        assert_eq!(err.to_string(), "照合データの更新に失敗しました");
        assert_eq!(history.rows()[0].argument, "C-1");
    }

    #[tokio::test]
    async fn history_failure_does_not_mask_the_result() {
        let mut inner = MockService::new();
        inner
            .expect_upload_binary_file()
            .times(1)
            .returning(|_, _| Ok(true));
        let history = Arc::new(RecordingHistory::failing());
        let service = wrap(inner, history.clone());

        assert!(service.upload_binary_file("a.jpg", b"jpeg").await.unwrap());
        assert!(history.rows().is_empty());
    }
}
