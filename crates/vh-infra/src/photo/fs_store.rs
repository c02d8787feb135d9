use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use vh_core::photo::PhotoKind;
use vh_core::ports::PhotoStorePort;

use super::downscale::{downscale_jpeg_if_needed, DownscaleLimits};

/// Container photos as `container_{id}_{kind}.jpg` files in one directory.
pub struct FsPhotoStore {
    dir: PathBuf,
    limits: DownscaleLimits,
}

impl FsPhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            limits: DownscaleLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: DownscaleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn path_of(&self, container_id: i32, kind: PhotoKind) -> PathBuf {
        self.dir.join(kind.file_name(container_id))
    }
}

#[async_trait]
impl PhotoStorePort for FsPhotoStore {
    async fn save(&self, container_id: i32, kind: PhotoKind, jpeg: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create image dir failed: {}", self.dir.display()))?;

        let path = self.path_of(container_id, kind);
        let tmp_path = path.with_extension("jpg.tmp");
        fs::write(&tmp_path, jpeg)
            .await
            .with_context(|| format!("write temp photo failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("rename photo failed: {}", path.display()))?;

        debug!(container_id, %kind, bytes = jpeg.len(), "photo saved");
        Ok(())
    }

    async fn load_for_upload(&self, container_id: i32, kind: PhotoKind) -> Result<Option<Vec<u8>>> {
        let path = self.path_of(container_id, kind);
        let raw = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read photo failed: {}", path.display()))
            }
        };

        let limits = self.limits;
        let prepared = tokio::task::spawn_blocking(move || downscale_jpeg_if_needed(raw, limits))
            .await
            .context("photo downscale task failed")?;

        match prepared {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "photo unreadable, sending without it");
                Ok(None)
            }
        }
    }

    async fn delete(&self, container_id: i32, kind: PhotoKind) -> Result<()> {
        let path = self.path_of(container_id, kind);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("delete photo failed: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_photo_loads_as_none_and_deletes_quietly() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        assert_eq!(store.load_for_upload(1, PhotoKind::Seal).await.unwrap(), None);
        store.delete(1, PhotoKind::Seal).await.unwrap();
    }

    #[tokio::test]
    async fn saved_photo_round_trips_through_the_named_file() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path().join("images"));

        let mut jpeg = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 8))
            .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();

        store.save(7, PhotoKind::Container, &jpeg).await.unwrap();
        assert!(dir.path().join("images/container_7_container.jpg").exists());
        assert_eq!(store.load_for_upload(7, PhotoKind::Container).await.unwrap(), Some(jpeg));

        store.delete(7, PhotoKind::Container).await.unwrap();
        assert_eq!(store.load_for_upload(7, PhotoKind::Container).await.unwrap(), None);
    }

    #[tokio::test]
    async fn small_non_jpeg_is_uploaded_as_stored() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path());
        store.save(2, PhotoKind::Seal, b"not a jpeg").await.unwrap();
        assert_eq!(
            store.load_for_upload(2, PhotoKind::Seal).await.unwrap(),
            Some(b"not a jpeg".to_vec())
        );
    }

    #[tokio::test]
    async fn oversized_unreadable_photo_is_skipped() {
        let dir = TempDir::new().unwrap();
        let store = FsPhotoStore::new(dir.path()).with_limits(DownscaleLimits {
            max_bytes: 4,
            ..DownscaleLimits::default()
        });
        store.save(2, PhotoKind::Seal, b"not a jpeg").await.unwrap();
        assert_eq!(store.load_for_upload(2, PhotoKind::Seal).await.unwrap(), None);
    }
}
