//! Collation (照合): confirming every loaded bundle of a container against
//! the server manifest, then sending the result.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, Instrument};
use vh_core::collation::{
    check_selected_no, check_soku_dtl, CollationError, CollationProgress, KakuninContainer,
    KakuninMeisai,
};
use vh_core::ports::{ClockPort, CollationRepositoryPort};
use vh_core::shipment::BundleKey;
use vh_core::time::format_month_day_time;
use vh_core::vanning::{parse_genpin, GenpinError};

use super::sync::{DataSync, SyncGuard};
use crate::deps::AppDeps;

#[derive(Debug, Error)]
pub enum CollateError {
    #[error("現品番号が未入力です")]
    EmptyInput,

    #[error("照合対象の積載束情報がありません。")]
    NoLines,

    #[error(transparent)]
    Genpin(#[from] GenpinError),

    #[error(transparent)]
    Rule(#[from] CollationError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One row of the container select list, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollationTarget {
    pub no: usize,
    pub container_id: String,
    pub container_no: String,
    pub bundle_cnt: i32,
    pub sagyou: String,
}

pub async fn list_targets(collation: &dyn CollationRepositoryPort) -> Result<Vec<KakuninContainer>> {
    collation.list_uncollated().await
}

pub fn target_rows(targets: &[KakuninContainer]) -> Vec<CollationTarget> {
    targets
        .iter()
        .enumerate()
        .map(|(i, c)| CollationTarget {
            no: i + 1,
            container_id: c.container_id.clone(),
            container_no: c.container_no.clone().unwrap_or_default(),
            bundle_cnt: c.bundle_cnt,
            sagyou: c.sagyou_ymd.map(format_month_day_time).unwrap_or_default(),
        })
        .collect()
}

/// Collation of one container, backed by the collation work table.
pub struct CollationSession {
    collation: Arc<dyn CollationRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    sync: DataSync,
    container: KakuninContainer,
    lines: Vec<KakuninMeisai>,
}

impl CollationSession {
    /// Opens the `selected_no`-th (1-based) uncollated container.
    pub async fn select(deps: &AppDeps, guard: SyncGuard, selected_no: usize) -> Result<Self, CollateError> {
        let targets = list_targets(deps.collation.as_ref()).await?;
        let container = check_selected_no(selected_no, &targets)?;
        Self::open(deps, guard, &container.container_id).await
    }

    /// Resets the work table from the container's lines.
    pub async fn open(deps: &AppDeps, guard: SyncGuard, container_id: &str) -> Result<Self, CollateError> {
        let span = info_span!("usecase.collation.open", container_id = %container_id.trim());

        async {
            let container = deps
                .collation
                .find_container(container_id)
                .await?
                .ok_or(CollationError::ContainerNotFound)?;
            let lines = deps
                .collation
                .load_work(&container.container_id, deps.clock.now())
                .await?;
            info!(lines = lines.len(), "collation work loaded");

            Ok(Self {
                collation: deps.collation.clone(),
                clock: deps.clock.clone(),
                sync: DataSync::from_deps(deps, guard),
                container,
                lines,
            })
        }
        .instrument(span)
        .await
    }

    pub fn container(&self) -> &KakuninContainer {
        &self.container
    }

    /// Work rows ordered by packing no, bundle no and sokuban.
    pub fn lines(&self) -> &[KakuninMeisai] {
        &self.lines
    }

    pub fn progress(&self) -> CollationProgress {
        CollationProgress::of(&self.lines)
    }

    /// Confirms the bundle behind a scanned tag.
    pub async fn scan(&mut self, raw: &str) -> Result<KakuninMeisai, CollateError> {
        if raw.trim().is_empty() {
            return Err(CollateError::EmptyInput);
        }
        if self.lines.is_empty() {
            return Err(CollateError::NoLines);
        }

        let genpin = parse_genpin(raw)?;
        self.check_soku_dtl(&genpin.heat_no, &genpin.sokuban).await?;

        let key = BundleKey::new(&genpin.heat_no, &genpin.sokuban);
        self.update_syougo(&key).await?;

        self.lines
            .iter()
            .find(|line| line.key() == key)
            .cloned()
            .ok_or_else(|| CollationError::NotATarget.into())
    }

    pub async fn check_soku_dtl(&self, heat_no: &str, sokuban: &str) -> Result<(), CollateError> {
        let line = if heat_no.trim().is_empty() || sokuban.trim().is_empty() {
            None
        } else {
            self.collation
                .find_work(&BundleKey::new(heat_no, sokuban))
                .await?
        };
        check_soku_dtl(heat_no, sokuban, line.as_ref())?;
        Ok(())
    }

    /// Marks one work row confirmed and reloads the list.
    pub async fn update_syougo(&mut self, key: &BundleKey) -> Result<(), CollateError> {
        if !self.collation.confirm_work(key, self.clock.now()).await? {
            return Err(CollationError::NotATarget.into());
        }
        self.lines = self.collation.list_work().await?;

        let progress = self.progress();
        info!(%key, collated = progress.collated, uncollated = progress.uncollated, "bundle collated");
        Ok(())
    }

    /// Flags the container collated once every line is confirmed, then
    /// sends collation results. Returns whether the send went through.
    pub async fn mark_container_collated(
        &self,
        on_error: impl FnMut(&str) + Send,
    ) -> Result<bool, CollateError> {
        let span = info_span!(
            "usecase.collation.mark_container_collated",
            container_id = %self.container.container_id
        );

        async move {
            self.progress().ensure_complete()?;
            self.collation
                .complete_container(&self.container.container_id, self.clock.now())
                .await?;
            info!("container collated");

            Ok(self.sync.send_syougo_only(on_error).await)
        }
        .instrument(span)
        .await
    }
}
