//! Vanning (バンニング): bundle selection and container registration.

use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use vh_core::photo::PhotoKind;
use vh_core::ports::{
    ClockPort, PhotoStorePort, ShipmentRepositoryPort, ShipmentWorkRepositoryPort,
    SystemRepositoryPort,
};
use vh_core::shipment::{BundleKey, ContainerSize, WorkBundle};
use vh_core::vanning::{
    pad_bundle_no, parse_genpin, BundleSelection, ContainerRegistration, GenpinError,
    LoadLimits, SelectionMode, VanningError,
};

use super::sync::{DataSync, SyncGuard};
use crate::deps::AppDeps;

const SEND_FAILED: &str = "出荷データの更新に失敗しました";

#[derive(Debug, Error)]
pub enum BundleScanError {
    #[error(transparent)]
    Genpin(#[from] GenpinError),

    #[error(transparent)]
    Rule(#[from] VanningError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Weights of the registration screen, pre-filled from the system row.
///
/// The load limit is the configured maximum when positive, else the
/// nominal limit of the container size.
pub async fn resolve_load_limits(
    system: &dyn SystemRepositoryPort,
    size: ContainerSize,
) -> Result<LoadLimits> {
    let setting = system.load().await?.unwrap_or_default();
    Ok(LoadLimits {
        container_kg: setting.default_container_jyuryo.unwrap_or(0),
        dunnage_kg: setting.default_dunnage_jyuryo.unwrap_or(0),
        max_kg: size.resolve_max_load_kg(setting.max_container_jyuryo),
    })
}

/// Bundle selection screen state.
///
/// In [`SelectionMode::Normal`] every change is mirrored into the work
/// table, so reopening the session restores an interrupted selection.
pub struct BundleSelectSession {
    shipments: Arc<dyn ShipmentRepositoryPort>,
    work: Arc<dyn ShipmentWorkRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    selection: BundleSelection,
    limits: LoadLimits,
}

impl BundleSelectSession {
    pub async fn open(deps: &AppDeps, mode: SelectionMode, limits: LoadLimits) -> Result<Self> {
        let selection = if mode.persists_work() {
            let staged = deps.shipment_work.list_staged().await?;
            if !staged.is_empty() {
                info!(count = staged.len(), "restoring staged bundles");
            }
            BundleSelection::restore(mode, staged)
        } else {
            BundleSelection::new(mode)
        };

        Ok(Self {
            shipments: deps.shipments.clone(),
            work: deps.shipment_work.clone(),
            clock: deps.clock.clone(),
            selection,
            limits,
        })
    }

    pub fn selection(&self) -> &BundleSelection {
        &self.selection
    }

    pub fn limits(&self) -> LoadLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: LoadLimits) {
        self.limits = limits;
    }

    pub fn remaining_kg(&self) -> i32 {
        self.selection.remaining_kg(&self.limits)
    }

    /// Handles one scanned bundle tag: records its bundle number when the
    /// tag carries one, checks the bundle and appends it.
    pub async fn scan(&mut self, raw: &str) -> Result<WorkBundle, BundleScanError> {
        let span = info_span!("usecase.vanning.scan", tag = %raw.trim());

        async {
            let genpin = parse_genpin(raw)?;
            let key = BundleKey::new(&genpin.heat_no, &genpin.sokuban);

            if let Some(bundle_no) = genpin.bundle_no.as_deref() {
                self.add_bundle_no(&key, bundle_no).await?;
            }
            self.check_bundle(&key).await?;
            self.add_bundle(&key).await
        }
        .instrument(span)
        .await
    }

    pub async fn check_bundle(&self, key: &BundleKey) -> Result<(), BundleScanError> {
        let line = self.shipments.find_bundle(key).await?;
        self.selection.check(key, line.as_ref(), &self.limits)?;
        Ok(())
    }

    /// Stores the tag's bundle number, right-aligned in 4 columns, on a
    /// line that has none yet.
    pub async fn add_bundle_no(&self, key: &BundleKey, raw_bundle_no: &str) -> Result<bool> {
        let padded = pad_bundle_no(raw_bundle_no);
        let updated = self.shipments.set_bundle_no_if_empty(key, &padded).await?;
        if updated {
            info!(%key, bundle_no = %padded, "bundle number recorded");
        }
        Ok(updated)
    }

    pub async fn add_bundle(&mut self, key: &BundleKey) -> Result<WorkBundle, BundleScanError> {
        let line = self
            .shipments
            .find_addable_bundle(key)
            .await?
            .ok_or(VanningError::NotInManifest)?;
        let bundle = WorkBundle::from(&line);

        self.selection.push(bundle.clone());
        if self.selection.mode().persists_work() {
            self.work.stage(key, self.clock.now()).await?;
        }
        info!(%key, jyuryo = bundle.jyuryo, count = self.selection.len(), "bundle added");
        Ok(bundle)
    }

    pub async fn remove_bundle(&mut self, index: usize) -> Result<Option<WorkBundle>> {
        let Some(bundle) = self.selection.remove(index) else {
            return Ok(None);
        };
        if self.selection.mode().persists_work() {
            self.work
                .unstage(&BundleKey::new(&bundle.heat_no, &bundle.sokuban))
                .await?;
        }
        Ok(Some(bundle))
    }

    pub async fn delete_bundles(&mut self) -> Result<()> {
        self.selection.clear();
        if self.selection.mode().persists_work() {
            self.work.clear().await?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RegisterContainerError {
    #[error(transparent)]
    Rule(#[from] VanningError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Photos taken on the registration screen.
#[derive(Debug, Clone, Default)]
pub struct ContainerPhotos {
    pub container: Option<Vec<u8>>,
    pub seal: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub container_id: i32,
    pub sent: bool,
    /// Operator message when the immediate send did not go through.
    pub send_error: Option<String>,
}

/// Registers the staged bundles as one container, stores its photos and
/// sends unsent shipments right away.
///
/// A failed send leaves the container registered; the next sync round
/// picks it up.
pub struct RegisterContainer {
    shipments: Arc<dyn ShipmentRepositoryPort>,
    work: Arc<dyn ShipmentWorkRepositoryPort>,
    photos: Arc<dyn PhotoStorePort>,
    clock: Arc<dyn ClockPort>,
    sync: DataSync,
}

impl RegisterContainer {
    pub fn from_deps(deps: &AppDeps, guard: SyncGuard) -> Self {
        Self {
            shipments: deps.shipments.clone(),
            work: deps.shipment_work.clone(),
            photos: deps.photos.clone(),
            clock: deps.clock.clone(),
            sync: DataSync::from_deps(deps, guard),
        }
    }

    pub async fn execute(
        &self,
        input: &ContainerRegistration,
        photos: ContainerPhotos,
    ) -> Result<RegistrationOutcome, RegisterContainerError> {
        let span = info_span!("usecase.register_container.execute");

        async {
            let staged = self.work.summary().await?;
            let plan = input.validate(&staged)?;

            let container_id = self
                .shipments
                .register_container(&plan, self.clock.now())
                .await?;
            info!(
                container_id,
                container_no = %plan.container.container_no,
                bundles = plan.bundle_count,
                jyuryo = plan.jyuryo,
                "container registered"
            );

            let taken = [
                (PhotoKind::Container, photos.container),
                (PhotoKind::Seal, photos.seal),
            ];
            for (kind, jpeg) in taken {
                if let Some(jpeg) = jpeg {
                    self.photos.save(container_id, kind, &jpeg).await?;
                }
            }

            let mut messages = Vec::new();
            let sent = self
                .sync
                .send_syukka_only(|msg: &str| messages.push(msg.to_string()))
                .await;

            let send_error = if sent {
                None
            } else {
                warn!(container_id, ?messages, "immediate send failed");
                Some(send_failed_message(&messages))
            };

            Ok(RegistrationOutcome {
                container_id,
                sent,
                send_error,
            })
        }
        .instrument(span)
        .await
    }
}

fn send_failed_message(details: &[String]) -> String {
    let details: Vec<&str> = details
        .iter()
        .map(String::as_str)
        .filter(|d| *d != SEND_FAILED)
        .collect();
    if details.is_empty() {
        SEND_FAILED.to_string()
    } else {
        format!("{SEND_FAILED}\n{}", details.join("\n"))
    }
}
