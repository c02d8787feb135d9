//! DataSync: one round of outbound send then inbound receive against the
//! handy web service.
//!
//! Send loops stop at the first container that is not acknowledged; the
//! round still moves on to the next phase. Receive steps replace local
//! snapshots inside one store transaction each.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Months, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};
use vh_core::collation::KakuninContainer;
use vh_core::history::RETENTION_MONTHS;
use vh_core::photo::PhotoKind;
use vh_core::ports::{
    ClockPort, CollationRepositoryPort, CommHistoryRepositoryPort, HandyServiceError,
    HandyServicePort, PhotoStorePort, ShipmentRepositoryPort, SystemRepositoryPort,
};
use vh_core::shipment::SyukkaContainer;
use vh_core::wire::{BunningData, CollateData, CollateDtl, SyukkaBundle};

use crate::deps::AppDeps;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("同期処理を実行中です")]
    AlreadyRunning,

    #[error("作業予定が登録されていません")]
    NoWorkPlan,

    #[error("出荷データの取得に失敗しました")]
    SyukkaDataMissing,

    #[error("照合データの取得に失敗しました")]
    SyougoDataMissing,

    /// Container with no bundle lines, or lines without any booking number.
    #[error("出荷データの更新に失敗しました")]
    ShipmentIncomplete { container_id: i32, reason: String },

    #[error("出荷データの更新に失敗しました")]
    ShipmentRejected { container_id: i32 },

    #[error("照合データの更新に失敗しました")]
    CollationRejected { container_id: String },

    #[error(transparent)]
    Service(#[from] HandyServiceError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl SyncError {
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::AlreadyRunning => "AlreadyRunning",
            SyncError::NoWorkPlan => "NoWorkPlan",
            SyncError::SyukkaDataMissing => "SyukkaDataMissing",
            SyncError::SyougoDataMissing => "SyougoDataMissing",
            SyncError::ShipmentIncomplete { .. } => "ShipmentIncomplete",
            SyncError::ShipmentRejected { .. } => "ShipmentRejected",
            SyncError::CollationRejected { .. } => "CollationRejected",
            SyncError::Service(err) => err.kind(),
            SyncError::Store(_) => "Store",
        }
    }

    /// Text for the operator: the message, or the kind name when blank.
    /// Local database failure, as opposed to a container the server or
    /// the send rules refused.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, SyncError::Store(_))
    }

    pub fn operator_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            self.kind().to_string()
        } else {
            message
        }
    }
}

/// Refuses a second sync while one is in flight.
///
/// The composition root owns one guard for the whole process and hands
/// clones to every [`DataSync`].
#[derive(Debug, Clone, Default)]
pub struct SyncGuard {
    running: Arc<AtomicBool>,
}

pub struct SyncPermit<'a> {
    running: &'a AtomicBool,
}

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<SyncPermit<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncPermit {
                running: &self.running,
            })
    }
}

impl Drop for SyncPermit<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

fn report(on_error: &mut impl FnMut(&str), err: &SyncError) {
    error!(kind = err.kind(), error = ?err, "sync step failed");
    on_error(&err.operator_message());
}

fn container_no_for_log(container: &SyukkaContainer) -> &str {
    container
        .container_no
        .as_deref()
        .map(str::trim)
        .filter(|no| !no.is_empty())
        .unwrap_or("<empty>")
}

pub struct DataSync {
    shipments: Arc<dyn ShipmentRepositoryPort>,
    collation: Arc<dyn CollationRepositoryPort>,
    system: Arc<dyn SystemRepositoryPort>,
    comm_history: Arc<dyn CommHistoryRepositoryPort>,
    service: Arc<dyn HandyServicePort>,
    photos: Arc<dyn PhotoStorePort>,
    clock: Arc<dyn ClockPort>,
    guard: SyncGuard,
}

impl DataSync {
    pub fn from_deps(deps: &AppDeps, guard: SyncGuard) -> Self {
        Self {
            shipments: deps.shipments.clone(),
            collation: deps.collation.clone(),
            system: deps.system.clone(),
            comm_history: deps.comm_history.clone(),
            service: deps.handy_service.clone(),
            photos: deps.photos.clone(),
            clock: deps.clock.clone(),
            guard,
        }
    }

    /// Full round: purge history, send shipments and collations, then
    /// receive shipment plans and collation targets.
    ///
    /// Every failing step is reported through `on_error` and the round
    /// continues. Returns `true` when no step failed.
    pub async fn run_sync(&self, mut on_error: impl FnMut(&str) + Send) -> bool {
        let span = info_span!("usecase.data_sync.run_sync");

        async move {
            let Some(_permit) = self.guard.try_acquire() else {
                report(&mut on_error, &SyncError::AlreadyRunning);
                return false;
            };

            let mut has_error = false;

            if let Err(err) = self.purge_history(self.clock.now()).await {
                has_error = true;
                report(&mut on_error, &SyncError::Store(err));
            }

            let sagyou_ymd = match self.sagyou_yotei().await {
                Ok(date) => Some(date),
                Err(err) => {
                    has_error = true;
                    report(&mut on_error, &err);
                    if !matches!(err, SyncError::NoWorkPlan) {
                        report(&mut on_error, &SyncError::NoWorkPlan);
                    }
                    None
                }
            };

            if let Some(date) = sagyou_ymd {
                if let Err(err) = self.data_sousin_all(date).await {
                    warn!(kind = err.kind(), error = %err, "shipment send stopped");
                    if err.is_store_failure() {
                        has_error = true;
                        report(&mut on_error, &err);
                    }
                }
            }

            if let Err(err) = self.data_sousin_syougo().await {
                warn!(kind = err.kind(), error = %err, "collation send stopped");
                if err.is_store_failure() {
                    has_error = true;
                    report(&mut on_error, &err);
                }
            }

            if let Some(date) = sagyou_ymd {
                let received = async {
                    self.receive_syukka_data(date).await?;
                    self.data_update(date).await
                }
                .await;
                if let Err(err) = received {
                    has_error = true;
                    report(&mut on_error, &err);
                }
            }

            if let Err(err) = self.receive_syougo_data().await {
                has_error = true;
                report(&mut on_error, &err);
            }

            info!(ok = !has_error, "sync round finished");
            !has_error
        }
        .instrument(span)
        .await
    }

    /// Work date, then every unsent shipment container.
    pub async fn send_syukka_only(&self, mut on_error: impl FnMut(&str) + Send) -> bool {
        let span = info_span!("usecase.data_sync.send_syukka_only");

        async move {
            let Some(_permit) = self.guard.try_acquire() else {
                report(&mut on_error, &SyncError::AlreadyRunning);
                return false;
            };

            let sent = async {
                let date = self.sagyou_yotei().await?;
                self.data_sousin_all(date).await
            }
            .await;

            match sent {
                Ok(count) => {
                    info!(count, "shipments sent");
                    true
                }
                Err(err) => {
                    report(&mut on_error, &err);
                    false
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Every collated container whose result is not sent yet.
    pub async fn send_syougo_only(&self, mut on_error: impl FnMut(&str) + Send) -> bool {
        let span = info_span!("usecase.data_sync.send_syougo_only");

        async move {
            let Some(_permit) = self.guard.try_acquire() else {
                report(&mut on_error, &SyncError::AlreadyRunning);
                return false;
            };

            match self.data_sousin_syougo().await {
                Ok(count) => {
                    info!(count, "collations sent");
                    true
                }
                Err(err) => {
                    report(&mut on_error, &err);
                    false
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Deletes history rows started more than a month before `now`.
    pub async fn purge_history(&self, now: NaiveDateTime) -> anyhow::Result<usize> {
        let threshold = now
            .checked_sub_months(Months::new(RETENTION_MONTHS))
            .unwrap_or(now);
        let deleted = self.comm_history.delete_started_before(threshold).await?;
        debug!(deleted, %threshold, "communication history purged");
        Ok(deleted)
    }

    /// Work date: the first plan's date, else asked from the server.
    pub async fn sagyou_yotei(&self) -> Result<NaiveDateTime, SyncError> {
        if let Some(date) = self
            .shipments
            .first_plan()
            .await?
            .and_then(|plan| plan.sagyou_yotei_ymd)
        {
            return Ok(date);
        }

        self.service
            .get_sagyou_ymd()
            .await?
            .ok_or(SyncError::NoWorkPlan)
    }

    /// Sends unsent containers in id order and stops at the first one that
    /// is not acknowledged. Returns the number sent.
    pub async fn data_sousin_all(&self, sagyou_ymd: NaiveDateTime) -> Result<usize, SyncError> {
        let containers = self.shipments.list_unsent_containers().await?;
        let mut sent = 0;
        for container in &containers {
            self.send_container(container, sagyou_ymd).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Sends one container; `false` when it was skipped, refused or failed.
    pub async fn data_sousin_once(&self, container: &SyukkaContainer, sagyou_ymd: NaiveDateTime) -> bool {
        match self.send_container(container, sagyou_ymd).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    container_id = container.container_id,
                    kind = err.kind(),
                    error = %err,
                    "container not sent"
                );
                false
            }
        }
    }

    async fn send_container(
        &self,
        container: &SyukkaContainer,
        sagyou_ymd: NaiveDateTime,
    ) -> Result<(), SyncError> {
        let container_id = container.container_id;
        let data = self.build_bunning_data(container, sagyou_ymd).await?;

        if self.service.send_syukka_data(&data).await? {
            self.shipments
                .mark_container_sent(container_id, self.clock.now())
                .await?;
            for kind in PhotoKind::ALL {
                if let Err(err) = self.photos.delete(container_id, kind).await {
                    warn!(container_id, %kind, error = %err, "failed to delete sent photo");
                }
            }
            info!(container_id, container_no = %data.container_no, "container sent");
            return Ok(());
        }

        warn!(
            container_id,
            container_no = container_no_for_log(container),
            bundle_count = data.bundles.len(),
            "SendSyukkaDataResult=false"
        );
        Err(SyncError::ShipmentRejected { container_id })
    }

    async fn build_bunning_data(
        &self,
        container: &SyukkaContainer,
        sagyou_ymd: NaiveDateTime,
    ) -> Result<BunningData, SyncError> {
        let container_id = container.container_id;
        let fallback_booking = container
            .booking_no
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let lines = self.shipments.container_bundles(container_id).await?;

        let mut missing_booking = 0;
        let mut missing_sample = None;
        let mut bundles = Vec::with_capacity(lines.len());
        for line in &lines {
            let booking_no = line.trimmed_booking_no().unwrap_or(fallback_booking);
            if booking_no.is_empty() {
                missing_booking += 1;
                missing_sample.get_or_insert_with(|| line.key().to_string());
            }
            bundles.push(SyukkaBundle {
                heat_no: line.heat_no.clone(),
                sokuban: line.sokuban.clone(),
                syukka_sashizu_no: line.syukka_sashizu_no.clone().unwrap_or_default(),
                bundle_no: line.bundle_no.clone().unwrap_or_default(),
                jyuryo: line.jyuryo,
                booking_no: booking_no.to_string(),
            });
        }

        if bundles.is_empty() {
            warn!(
                container_id,
                container_no = container_no_for_log(container),
                "no bundle lines, SendSyukkaData skipped"
            );
            return Err(SyncError::ShipmentIncomplete {
                container_id,
                reason: "no bundle lines".to_string(),
            });
        }
        if missing_booking > 0 {
            let sample = missing_sample.unwrap_or_default();
            warn!(
                container_id,
                container_no = container_no_for_log(container),
                missing_count = missing_booking,
                sample_heat_sokuban = %sample,
                "booking number missing in bundle lines, SendSyukkaData skipped"
            );
            return Err(SyncError::ShipmentIncomplete {
                container_id,
                reason: format!("booking missing on {missing_booking} lines, e.g. {sample}"),
            });
        }

        let container_photo = self
            .photos
            .load_for_upload(container_id, PhotoKind::Container)
            .await?
            .unwrap_or_default();
        let seal_photo = self
            .photos
            .load_for_upload(container_id, PhotoKind::Seal)
            .await?
            .unwrap_or_default();

        Ok(BunningData {
            syukka_ymd: sagyou_ymd,
            container_no: container.container_no.clone().unwrap_or_default(),
            container_jyuryo: container.container_jyuryo.unwrap_or(0),
            dunnage_jyuryo: container.dunnage_jyuryo.unwrap_or(0),
            seal_no: container.seal_no.clone().unwrap_or_default(),
            bundles,
            container_photo,
            seal_photo,
        })
    }

    /// Sends collated-but-unsent containers in id order, stopping at the
    /// first failure. Returns the number sent.
    pub async fn data_sousin_syougo(&self) -> Result<usize, SyncError> {
        let containers = self.collation.list_unsent_completed().await?;
        let mut sent = 0;
        for container in &containers {
            self.send_collation(container).await?;
            sent += 1;
        }
        Ok(sent)
    }

    async fn send_collation(&self, container: &KakuninContainer) -> Result<(), SyncError> {
        let details = self
            .collation
            .container_details(&container.container_id)
            .await?
            .into_iter()
            .map(|line| CollateDtl {
                heat_no: line.heat_no,
                sokuban: line.sokuban,
                syougo_kakunin: line.syougo_kakunin,
            })
            .collect();

        let data = CollateData {
            container_id: container.container_id.clone(),
            syogo_kanryo: container.syougo_kanryo,
            details,
        };

        if self.service.send_syougo_data(&data).await? {
            self.collation
                .mark_sent(&container.container_id, self.clock.now())
                .await?;
            info!(container_id = %container.container_id, "collation sent");
            return Ok(());
        }

        warn!(container_id = %container.container_id, "SendSyougoDataResult=false");
        Err(SyncError::CollationRejected {
            container_id: container.container_id.clone(),
        })
    }

    /// Stamps the plan confirmation time unless the server reports an
    /// update newer than the local plans.
    ///
    /// Service errors end the step quietly; store errors are returned.
    pub async fn data_update(&self, sagyou_ymd: NaiveDateTime) -> Result<(), SyncError> {
        let candidates = self.shipments.plans_without_update_stamp().await?;
        let Some(first) = candidates.first() else {
            return Ok(());
        };

        if let Err(err) = self.service.get_sagyou_ymd().await {
            warn!(error = %err, "GetSagyouYmd failed");
        }

        // Unset reads as the epoch.
        let last_upd = first.last_upd_ymdhms.unwrap_or_default();

        let server_upd = match self.service.get_update_ymd_hms(sagyou_ymd).await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "GetUpdateYmdHms failed");
                return Ok(());
            }
        };

        if server_upd.is_some_and(|upd| upd > last_upd) {
            debug!(?server_upd, %last_upd, "server has newer plans");
            return Ok(());
        }

        self.system.stamp_data_conf(self.clock.now()).await?;
        Ok(())
    }

    /// Replaces plans and unshipped lines with the server snapshot.
    pub async fn receive_syukka_data(&self, sagyou_ymd: NaiveDateTime) -> Result<(), SyncError> {
        if let Err(err) = self.service.get_sagyou_ymd().await {
            warn!(error = %err, "GetSagyouYmd failed");
        }

        let data = self
            .service
            .get_syukka_data(sagyou_ymd)
            .await?
            .ok_or(SyncError::SyukkaDataMissing)?;

        self.shipments
            .apply_syukka_snapshot(&data, self.clock.now())
            .await?;
        info!(
            headers = data.headers.len(),
            details = data.details.len(),
            "shipment data received"
        );
        Ok(())
    }

    /// Replaces all collation targets with the server snapshot.
    pub async fn receive_syougo_data(&self) -> Result<(), SyncError> {
        let data = self
            .service
            .get_syougo_data()
            .await?
            .ok_or(SyncError::SyougoDataMissing)?;

        self.collation
            .apply_syougo_snapshot(&data, self.clock.now())
            .await?;
        info!(
            headers = data.headers.len(),
            details = data.details.len(),
            "collation data received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use async_trait::async_trait;
    use mockall::mock;
    use vh_core::collation::KakuninMeisai;
    use vh_core::history::NewCommHistory;
    use vh_core::shipment::BundleKey;
    use vh_core::wire::SyougoData;

    mock! {
        Collation {}

        #[async_trait]
        impl CollationRepositoryPort for Collation {
            async fn list_uncollated(&self) -> anyhow::Result<Vec<KakuninContainer>>;
            async fn list_unsent_completed(&self) -> anyhow::Result<Vec<KakuninContainer>>;
            async fn find_container(&self, container_id: &str) -> anyhow::Result<Option<KakuninContainer>>;
            async fn container_details(&self, container_id: &str) -> anyhow::Result<Vec<KakuninMeisai>>;
            async fn load_work(&self, container_id: &str, now: NaiveDateTime) -> anyhow::Result<Vec<KakuninMeisai>>;
            async fn list_work(&self) -> anyhow::Result<Vec<KakuninMeisai>>;
            async fn find_work(&self, key: &BundleKey) -> anyhow::Result<Option<KakuninMeisai>>;
            async fn confirm_work(&self, key: &BundleKey, now: NaiveDateTime) -> anyhow::Result<bool>;
            async fn complete_container(&self, container_id: &str, now: NaiveDateTime) -> anyhow::Result<()>;
            async fn mark_sent(&self, container_id: &str, sent_at: NaiveDateTime) -> anyhow::Result<()>;
            async fn apply_syougo_snapshot(&self, data: &SyougoData, now: NaiveDateTime) -> anyhow::Result<()>;
        }
    }

    fn sync_of(stack: &TestStack) -> DataSync {
        DataSync::from_deps(&stack.deps, SyncGuard::new())
    }

    fn collect_errors() -> (Arc<std::sync::Mutex<Vec<String>>>, impl FnMut(&str) + Send) {
        let errors = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = errors.clone();
        (errors, move |msg: &str| sink.lock().unwrap().push(msg.to_string()))
    }

    fn online() -> FakeService {
        FakeService {
            sagyou_ymd: Some(at(3, 0)),
            syukka: Some(syukka_snapshot()),
            syougo: Some(syougo_snapshot()),
            ..FakeService::default()
        }
    }

    #[tokio::test]
    async fn round_without_any_work_date_reports_it() {
        let stack = TestStack::new(FakeService::default());
        let (errors, on_error) = collect_errors();

        let ok = sync_of(&stack).run_sync(on_error).await;

        assert!(!ok);
        assert_eq!(
            *errors.lock().unwrap(),
            vec![
                "作業予定が登録されていません".to_string(),
                "照合データの取得に失敗しました".to_string(),
            ]
        );
        assert!(!stack.service.calls().contains(&"GetSyukkaData"));
    }

    #[tokio::test]
    async fn full_round_receives_plans_and_collation_targets() {
        let stack = TestStack::new(online());
        let (errors, on_error) = collect_errors();

        let ok = sync_of(&stack).run_sync(on_error).await;

        assert!(ok, "errors: {:?}", errors.lock().unwrap());
        let plans = stack.deps.shipments.list_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].booking_no, "BK-1");
        let targets = stack.deps.collation.list_uncollated().await.unwrap();
        assert_eq!(targets[0].container_id, "C-1");

        let system = stack.deps.system.load().await.unwrap().unwrap();
        assert_eq!(system.data_conf_ymdhms, Some(at(3, 10)));
        assert_eq!(system.data_recv_ymdhms, Some(at(3, 10)));
    }

    #[tokio::test]
    async fn unreachable_server_fails_each_receive_step() {
        let stack = TestStack::new(FakeService {
            offline: true,
            ..FakeService::default()
        });
        let (errors, on_error) = collect_errors();

        assert!(!sync_of(&stack).run_sync(on_error).await);

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "connection refused");
        assert_eq!(errors[1], "作業予定が登録されていません");
    }

    #[tokio::test]
    async fn registered_container_is_sent_and_its_photos_removed() {
        let stack = TestStack::new(online());
        let sync = sync_of(&stack);
        sync.receive_syukka_data(at(3, 0)).await.unwrap();

        let id = register(
            &stack.deps,
            &[key("H00001", "000101"), key("H00001", "000102")],
        )
        .await;
        stack
            .deps
            .photos
            .save(id, PhotoKind::Container, b"small jpeg")
            .await
            .unwrap();

        assert!(sync.send_syukka_only(|_| {}).await);

        let sent = stack.service.sent_syukka();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].container_no, "CSQU3054383");
        assert_eq!(sent[0].syukka_ymd, at(3, 0));
        assert_eq!(sent[0].bundles.len(), 2);
        assert!(sent[0].bundles.iter().all(|b| b.booking_no == "BK-1"));
        assert_eq!(sent[0].container_photo, b"small jpeg".to_vec());
        assert!(sent[0].seal_photo.is_empty());
        assert!(stack.deps.shipments.list_unsent_containers().await.unwrap().is_empty());
        assert!(!stack.photos.path_of(id, PhotoKind::Container).exists());
    }

    #[tokio::test]
    async fn refused_container_stops_the_send_loop() {
        let stack = TestStack::new(FakeService {
            accept_syukka: false,
            ..online()
        });
        let sync = sync_of(&stack);
        sync.receive_syukka_data(at(3, 0)).await.unwrap();
        register(&stack.deps, &[key("H00001", "000101")]).await;
        register(&stack.deps, &[key("H00001", "000102")]).await;
        let (errors, on_error) = collect_errors();

        assert!(!sync.send_syukka_only(on_error).await);

        assert_eq!(stack.service.sent_syukka().len(), 1);
        assert_eq!(stack.deps.shipments.list_unsent_containers().await.unwrap().len(), 2);
        assert_eq!(*errors.lock().unwrap(), vec!["出荷データの更新に失敗しました".to_string()]);
    }

    #[tokio::test]
    async fn container_without_booking_is_never_posted() {
        let mut snapshot = syukka_snapshot();
        for d in &mut snapshot.details {
            d.booking_no = "  ".into();
        }
        let stack = TestStack::new(FakeService {
            syukka: Some(snapshot),
            ..online()
        });
        let sync = sync_of(&stack);
        sync.receive_syukka_data(at(3, 0)).await.unwrap();
        let id = register(&stack.deps, &[key("H00001", "000101")]).await;

        let container = stack.deps.shipments.find_container(id).await.unwrap().unwrap();
        assert!(!sync.data_sousin_once(&container, at(3, 0)).await);
        assert!(!stack.service.calls().contains(&"SendSyukkaData"));
    }

    #[tokio::test]
    async fn second_round_is_refused_while_one_runs() {
        let stack = TestStack::new(online());
        let guard = SyncGuard::new();
        let sync = DataSync::from_deps(&stack.deps, guard.clone());
        let _running = guard.try_acquire().unwrap();
        let (errors, on_error) = collect_errors();

        assert!(!sync.run_sync(on_error).await);
        assert_eq!(*errors.lock().unwrap(), vec!["同期処理を実行中です".to_string()]);
        assert!(stack.service.calls().is_empty());
    }

    #[tokio::test]
    async fn collated_container_is_sent_once() {
        let stack = TestStack::new(online());
        let sync = sync_of(&stack);
        sync.receive_syougo_data().await.unwrap();

        let now = at(3, 10);
        let collation = &stack.deps.collation;
        for line in collation.load_work("C-1", now).await.unwrap() {
            assert!(collation.confirm_work(&line.key(), now).await.unwrap());
        }
        collation.complete_container("C-1", now).await.unwrap();

        assert!(sync.send_syougo_only(|_| {}).await);
        assert!(sync.send_syougo_only(|_| {}).await);

        let sent = stack.service.sent_syougo();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].syogo_kanryo);
        assert_eq!(sent[0].details.len(), 2);
        assert!(sent[0].details.iter().all(|d| d.syougo_kakunin));
    }

    #[tokio::test]
    async fn newer_server_update_leaves_confirmation_stamp_alone() {
        let stack = TestStack::new(FakeService {
            update_ymd_hms: Some(at(3, 0)),
            ..online()
        });
        stack
            .deps
            .shipments
            .apply_syukka_snapshot(&syukka_snapshot(), at(1, 0))
            .await
            .unwrap();

        sync_of(&stack).data_update(at(3, 0)).await.unwrap();

        let system = stack.deps.system.load().await.unwrap().unwrap();
        assert_eq!(system.data_conf_ymdhms, Some(at(1, 0)));
    }

    #[tokio::test]
    async fn missing_server_update_stamps_confirmation() {
        let stack = TestStack::new(online());
        stack
            .deps
            .shipments
            .apply_syukka_snapshot(&syukka_snapshot(), at(1, 0))
            .await
            .unwrap();

        sync_of(&stack).data_update(at(3, 0)).await.unwrap();

        let system = stack.deps.system.load().await.unwrap().unwrap();
        assert_eq!(system.data_conf_ymdhms, Some(at(3, 10)));
        assert_eq!(system.data_recv_ymdhms, Some(at(1, 0)));
    }

    #[tokio::test]
    async fn history_older_than_a_month_is_purged() {
        let stack = TestStack::new(FakeService::default());
        let history = &stack.deps.comm_history;
        let old = at(1, 0) - chrono::Duration::days(40);
        history
            .append(NewCommHistory::new("GetSagyouYmd", old, old))
            .await
            .unwrap();
        history
            .append(NewCommHistory::new("GetSyougoData", at(2, 0), at(2, 0)))
            .await
            .unwrap();

        let deleted = sync_of(&stack).purge_history(at(3, 10)).await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(history.list_recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_collation_table_fails_the_round() {
        let mut stack = TestStack::new(FakeService::default());
        let mut collation = MockCollation::new();
        collation
            .expect_list_unsent_completed()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("disk I/O error")));
        stack.deps.collation = Arc::new(collation);
        let (errors, on_error) = collect_errors();

        let ok = sync_of(&stack).run_sync(on_error).await;

        assert!(!ok);
        assert_eq!(
            *errors.lock().unwrap(),
            vec![
                "作業予定が登録されていません".to_string(),
                "disk I/O error".to_string(),
                "照合データの取得に失敗しました".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn refused_container_does_not_fail_the_round() {
        let stack = TestStack::new(FakeService {
            accept_syukka: false,
            ..online()
        });
        let sync = sync_of(&stack);
        sync.receive_syukka_data(at(3, 0)).await.unwrap();
        register(&stack.deps, &[key("H00001", "000101")]).await;
        let (errors, on_error) = collect_errors();

        let ok = sync.run_sync(on_error).await;

        assert!(ok, "errors: {:?}", errors.lock().unwrap());
        assert_eq!(stack.service.sent_syukka().len(), 1);
    }
}
