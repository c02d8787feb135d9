use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Feedback and communication settings of the handy terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default)]
    pub schema_version: u32,

    #[serde(default)]
    pub buzzer: BuzzerSettings,

    #[serde(default)]
    pub vibrator: VibratorSettings,

    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub comm: CommSettings,

    #[serde(default)]
    pub web_service: WebServiceUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuzzerSettings {
    #[serde(rename = "BuzzerMute")]
    pub mute: bool,
    /// Tone length in milliseconds.
    #[serde(rename = "BuzzerLength")]
    pub length_ms: i32,
    /// 0..=10
    #[serde(rename = "BuzzerVolume")]
    pub volume: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibratorSettings {
    #[serde(rename = "VibratorMute")]
    pub mute: bool,
    #[serde(rename = "VibratorLength")]
    pub length_ms: i32,
    #[serde(rename = "VibratorCount")]
    pub count: i32,
    #[serde(rename = "VibratorInterval")]
    pub interval_ms: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    #[serde(rename = "CameraImageSize")]
    pub image_size: i32,
    #[serde(rename = "CameraFlash")]
    pub flash: i32,
    #[serde(rename = "CameraLight")]
    pub light_mode: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommSettings {
    #[serde(rename = "CommName")]
    pub name: String,
    #[serde(rename = "CommApn")]
    pub apn: String,
    #[serde(rename = "CommUser")]
    pub user: String,
    #[serde(rename = "CommPasswd")]
    pub password: String,
}

/// Endpoints for the production, SCS and test back offices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebServiceUrls {
    #[serde(rename = "WebSvcHonban", default)]
    pub honban: String,
    #[serde(rename = "WebSvcSCS", default)]
    pub scs: String,
    #[serde(rename = "WebSvcTest", default)]
    pub test: String,
}

impl BuzzerSettings {
    pub fn clamped_volume(&self) -> i32 {
        self.volume.clamp(0, 10)
    }

    /// Volume as a 0..=100 tone percentage.
    pub fn tone_percent(&self) -> i32 {
        (self.clamped_volume() * 10).clamp(0, 100)
    }
}

impl VibratorSettings {
    /// On/off waveform in milliseconds: a zero lead-in, then
    /// `interval, length` pairs. `extra` adds pulses on top of the
    /// configured count, which is at least one.
    pub fn pattern(&self, extra: i32) -> Vec<u64> {
        if self.mute {
            return Vec::new();
        }
        let total = self.count.max(1) + extra.max(0);
        let length = self.length_ms.max(0) as u64;
        let interval = self.interval_ms.max(0) as u64;

        (0..total)
            .flat_map(|i| [if i == 0 { 0 } else { interval }, length])
            .collect()
    }
}
