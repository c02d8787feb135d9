//! Collation (照合) domain: verifying loaded bundles against the server manifest.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shipment::BundleKey;

/// Container received from the server for collation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakuninContainer {
    pub container_id: String,
    pub container_no: Option<String>,
    pub bundle_cnt: i32,
    pub sagyou_ymd: Option<NaiveDateTime>,
    pub syougo_kanryo: bool,
    pub data_send_ymdhms: Option<NaiveDateTime>,
}

/// One bundle line of a collation container. The same shape is used for
/// the manifest table and for the work table the operator scans against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KakuninMeisai {
    pub heat_no: String,
    pub sokuban: String,
    pub syukka_sashizu_no: Option<String>,
    pub bundle_no: Option<String>,
    pub jyuryo: i32,
    pub container_id: Option<String>,
    pub syougo_kakunin: bool,
}

impl KakuninMeisai {
    pub fn key(&self) -> BundleKey {
        BundleKey::new(&self.heat_no, &self.sokuban)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollationError {
    #[error("照合対象に存在していません")]
    NotATarget,

    #[error("既に確認済みです")]
    AlreadyConfirmed,

    #[error("照合が完了していません")]
    Incomplete { remaining: usize },

    #[error("照合対象№が存在しません")]
    NoSuchSelection,

    #[error("照合対象コンテナが見つかりません")]
    ContainerNotFound,
}

/// Decides whether a scanned bundle can be confirmed.
///
/// `line` is the work-table row looked up by the trimmed key, if any.
pub fn check_soku_dtl(
    heat_no: &str,
    sokuban: &str,
    line: Option<&KakuninMeisai>,
) -> Result<(), CollationError> {
    if heat_no.trim().is_empty() || sokuban.trim().is_empty() {
        return Err(CollationError::NotATarget);
    }
    match line {
        None => Err(CollationError::NotATarget),
        Some(line) if line.syougo_kakunin => Err(CollationError::AlreadyConfirmed),
        Some(_) => Ok(()),
    }
}

/// Confirmed / unconfirmed counts of a loaded collation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollationProgress {
    pub collated: usize,
    pub uncollated: usize,
}

impl CollationProgress {
    pub fn of(lines: &[KakuninMeisai]) -> Self {
        let collated = lines.iter().filter(|l| l.syougo_kakunin).count();
        Self {
            collated,
            uncollated: lines.len() - collated,
        }
    }

    pub fn ensure_complete(&self) -> Result<(), CollationError> {
        if self.uncollated == 0 {
            Ok(())
        } else {
            Err(CollationError::Incomplete {
                remaining: self.uncollated,
            })
        }
    }
}

/// Resolves a 1-based selection number typed by the operator.
pub fn check_selected_no(
    selected: usize,
    candidates: &[KakuninContainer],
) -> Result<&KakuninContainer, CollationError> {
    if selected == 0 {
        return Err(CollationError::NoSuchSelection);
    }
    candidates
        .get(selected - 1)
        .ok_or(CollationError::NoSuchSelection)
}
