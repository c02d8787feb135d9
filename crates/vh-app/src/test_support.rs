//! Fakes and an in-memory wiring shared by the use case tests.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use vh_core::history::{CommHistory, NewCommHistory};
use vh_core::ports::{
    ClockPort, CommHistoryRepositoryPort, HandyServiceError, HandyServicePort, ServiceResult,
};
use vh_core::shipment::{BundleKey, ContainerSize};
use vh_core::vanning::ContainerRegistration;
use vh_core::wire::{
    BunningData, CollateData, SyougoData, SyougoDetail, SyougoHeader, SyukkaData, SyukkaDetail,
    SyukkaHeader,
};
use vh_infra::db::pool::init_db_pool;
use vh_infra::db::repositories::{
    DieselCollationRepository, DieselCommHistoryRepository, DieselShipmentRepository,
    DieselShipmentWorkRepository, DieselSystemRepository,
};
use vh_infra::photo::FsPhotoStore;
use vh_infra::settings::FileSettingsRepository;
use vh_infra::DieselSqliteExecutor;

use crate::deps::AppDeps;

pub(crate) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub(crate) struct FixedClock(pub NaiveDateTime);

impl ClockPort for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// History repository that keeps rows in memory, or refuses every write.
#[derive(Default)]
pub(crate) struct RecordingHistory {
    rows: Mutex<Vec<NewCommHistory>>,
    fail: bool,
}

impl RecordingHistory {
    pub(crate) fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn rows(&self) -> Vec<NewCommHistory> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommHistoryRepositoryPort for RecordingHistory {
    async fn append(&self, entry: NewCommHistory) -> Result<String> {
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        let mut rows = self.rows.lock().unwrap();
        rows.push(entry);
        Ok(format!("20250303{:06}", rows.len()))
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<CommHistory>> {
        Ok(Vec::new())
    }

    async fn delete_started_before(&self, _threshold: NaiveDateTime) -> Result<usize> {
        Ok(0)
    }
}

/// Scripted web service. Unset answers behave like an empty server.
pub(crate) struct FakeService {
    pub sagyou_ymd: Option<NaiveDateTime>,
    pub update_ymd_hms: Option<NaiveDateTime>,
    pub syukka: Option<SyukkaData>,
    pub syougo: Option<SyougoData>,
    pub accept_syukka: bool,
    pub accept_syougo: bool,
    pub offline: bool,
    pub sent_syukka: Mutex<Vec<BunningData>>,
    pub sent_syougo: Mutex<Vec<CollateData>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            sagyou_ymd: None,
            update_ymd_hms: None,
            syukka: None,
            syougo: None,
            accept_syukka: true,
            accept_syougo: true,
            offline: false,
            sent_syukka: Mutex::new(Vec::new()),
            sent_syougo: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeService {
    fn enter(&self, action: &'static str) -> ServiceResult<()> {
        self.calls.lock().unwrap().push(action);
        if self.offline {
            return Err(HandyServiceError::Transport("connection refused".into()));
        }
        Ok(())
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn sent_syukka(&self) -> Vec<BunningData> {
        self.sent_syukka.lock().unwrap().clone()
    }

    pub(crate) fn sent_syougo(&self) -> Vec<CollateData> {
        self.sent_syougo.lock().unwrap().clone()
    }
}

#[async_trait]
impl HandyServicePort for FakeService {
    async fn get_sys_date(&self) -> ServiceResult<Option<NaiveDateTime>> {
        self.enter("GetSysDate")?;
        Ok(Some(at(3, 12)))
    }

    async fn get_sagyou_ymd(&self) -> ServiceResult<Option<NaiveDateTime>> {
        self.enter("GetSagyouYmd")?;
        Ok(self.sagyou_ymd)
    }

    async fn get_update_ymd_hms(&self, _sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<NaiveDateTime>> {
        self.enter("GetUpdateYmdHms")?;
        Ok(self.update_ymd_hms)
    }

    async fn get_syukka_data(&self, _sagyou_ymd: NaiveDateTime) -> ServiceResult<Option<SyukkaData>> {
        self.enter("GetSyukkaData")?;
        Ok(self.syukka.clone())
    }

    async fn send_syukka_data(&self, data: &BunningData) -> ServiceResult<bool> {
        self.enter("SendSyukkaData")?;
        self.sent_syukka.lock().unwrap().push(data.clone());
        Ok(self.accept_syukka)
    }

    async fn upload_binary_file(&self, _file_name: &str, _buffer: &[u8]) -> ServiceResult<bool> {
        self.enter("UploadBinaryFile")?;
        Ok(true)
    }

    async fn get_download_handy_execute_file_names(&self) -> ServiceResult<Vec<String>> {
        self.enter("GetDownloadHandyExecuteFileNames")?;
        Ok(Vec::new())
    }

    async fn get_download_handy_execute_file(&self, _file_name: &str) -> ServiceResult<Vec<u8>> {
        self.enter("GetDownloadHandyExecuteFile")?;
        Ok(Vec::new())
    }

    async fn get_syougo_data(&self) -> ServiceResult<Option<SyougoData>> {
        self.enter("GetSyougoData")?;
        Ok(self.syougo.clone())
    }

    async fn send_syougo_data(&self, data: &CollateData) -> ServiceResult<bool> {
        self.enter("SendSyougoData")?;
        self.sent_syougo.lock().unwrap().push(data.clone());
        Ok(self.accept_syougo)
    }
}

/// Real SQLite repositories over one in-memory database, file adapters in
/// a temp dir and a scripted service.
pub(crate) struct TestStack {
    pub deps: AppDeps,
    pub service: Arc<FakeService>,
    pub photos: Arc<FsPhotoStore>,
    _dir: TempDir,
}

impl TestStack {
    pub(crate) fn new(service: FakeService) -> Self {
        Self::at_time(service, at(3, 10))
    }

    pub(crate) fn at_time(service: FakeService, now: NaiveDateTime) -> Self {
        let dir = TempDir::new().unwrap();
        let exec = DieselSqliteExecutor::new(init_db_pool(":memory:").unwrap());
        let service = Arc::new(service);
        let photos = Arc::new(FsPhotoStore::new(dir.path().join("images")));

        let deps = AppDeps {
            shipments: Arc::new(DieselShipmentRepository::new(exec.clone())),
            shipment_work: Arc::new(DieselShipmentWorkRepository::new(exec.clone())),
            collation: Arc::new(DieselCollationRepository::new(exec.clone())),
            system: Arc::new(DieselSystemRepository::new(exec.clone())),
            comm_history: Arc::new(DieselCommHistoryRepository::new(exec)),
            handy_service: service.clone(),
            photos: photos.clone(),
            settings: Arc::new(FileSettingsRepository::new(dir.path().join("settings.json"))),
            clock: Arc::new(FixedClock(now)),
        };

        Self {
            deps,
            service,
            photos,
            _dir: dir,
        }
    }
}

/// One booking `BK-1` on the 3rd with three 1,000 kg bundles `H00001/00010{1..3}`.
pub(crate) fn syukka_snapshot() -> SyukkaData {
    SyukkaData {
        headers: vec![SyukkaHeader {
            booking_no: "BK-1".into(),
            syukka_ymd: Some(at(3, 0)),
            container_count: 2,
            total_bundole: 3,
            total_jyuryo: 3_000,
            ..SyukkaHeader::default()
        }],
        details: (1..=3)
            .map(|i| SyukkaDetail {
                heat_no: "H00001".into(),
                sokuban: format!("00010{i}"),
                syukka_sashizu_no: "P-01".into(),
                bundle_no: String::new(),
                jyuryo: 1_000,
                booking_no: "BK-1 ".into(),
            })
            .collect(),
    }
}

/// Container `C-1` with two bundles still to be collated.
pub(crate) fn syougo_snapshot() -> SyougoData {
    SyougoData {
        headers: vec![SyougoHeader {
            container_id: "C-1".into(),
            container_no: "CSQU3054383".into(),
            bundle_cnt: 2,
            sagyou_ymd: Some(at(3, 8)),
            syogo_kanryo: false,
        }],
        details: ["000201", "000202"]
            .into_iter()
            .map(|soku| SyougoDetail {
                heat_no: "H00002".into(),
                sokuban: soku.into(),
                syukka_sashizu_no: "P-02".into(),
                bundle_no: "   1".into(),
                jyuryo: 900,
                container_id: "C-1".into(),
                syougo_kakunin: false,
            })
            .collect(),
    }
}

pub(crate) fn key(heat: &str, soku: &str) -> BundleKey {
    BundleKey::new(heat, soku)
}

/// Stages the given bundles and registers them as one 20 ft container.
pub(crate) async fn register(deps: &AppDeps, keys: &[BundleKey]) -> i32 {
    let now = deps.clock.now();
    for k in keys {
        deps.shipment_work.stage(k, now).await.unwrap();
    }
    let summary = deps.shipment_work.summary().await.unwrap();
    let plan = ContainerRegistration {
        owner_code: "CSQ".into(),
        serial_no: "305438".into(),
        seal_no: "SL-1".into(),
        booking_no: None,
        container_size: ContainerSize::Ft20,
        container_kg: 2_200,
        dunnage_kg: 100,
        max_kg: 24_000,
    }
    .validate(&summary)
    .unwrap();
    deps.shipments.register_container(&plan, now).await.unwrap()
}
