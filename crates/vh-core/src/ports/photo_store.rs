use anyhow::Result;
use async_trait::async_trait;

use crate::photo::PhotoKind;

#[async_trait]
pub trait PhotoStorePort: Send + Sync {
    async fn save(&self, container_id: i32, kind: PhotoKind, jpeg: &[u8]) -> Result<()>;

    /// Bytes ready for upload, downscaled when oversize. `None` when no
    /// photo was taken.
    async fn load_for_upload(&self, container_id: i32, kind: PhotoKind) -> Result<Option<Vec<u8>>>;

    /// Removing a missing photo is not an error.
    async fn delete(&self, container_id: i32, kind: PhotoKind) -> Result<()>;
}
