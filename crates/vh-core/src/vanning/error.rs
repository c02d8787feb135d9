use thiserror::Error;

use crate::container::ContainerNoError;

/// Rule violations raised while selecting bundles or registering a container.
///
/// Display strings are the operator-facing messages shown on the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VanningError {
    #[error("既に読み込み済みです")]
    AlreadyRead,

    #[error("出荷束明細に存在していません")]
    NotInManifest,

    #[error("積載重量を超過します")]
    Overweight,

    #[error("既に出荷済です")]
    AlreadyShipped,

    #[error("20行までしか読取できません")]
    TooManyBundles,

    #[error("予約№が相違しています")]
    BookingMismatch,

    #[error("コンテナ自重が未入力です")]
    ContainerWeightMissing,

    #[error("ダンネージ重量が未入力です")]
    DunnageWeightMissing,

    #[error("ダンネージ重量は255Kg以下で入力してください")]
    DunnageTooHeavy,

    #[error("積載重量が超過しています")]
    LoadExceeded,

    #[error("積載束選定が行われていません。")]
    NoBundlesSelected,

    #[error(transparent)]
    ContainerNo(#[from] ContainerNoError),
}
