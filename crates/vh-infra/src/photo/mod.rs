mod downscale;
mod fs_store;

pub use downscale::{downscale_jpeg_if_needed, DownscaleLimits};
pub use fs_store::FsPhotoStore;
