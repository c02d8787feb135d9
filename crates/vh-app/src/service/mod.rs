mod recording;

pub use recording::{RecordingHandyService, DEFAULT_ATTEMPTS};
