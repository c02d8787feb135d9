use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Container size class, stored as its nominal length in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerSize {
    Ft20,
    Ft40,
}

impl ContainerSize {
    /// Maximum gross load used when the terminal has no explicit limit.
    pub fn max_load_kg(self) -> i32 {
        match self {
            ContainerSize::Ft20 => 24_000,
            ContainerSize::Ft40 => 30_000,
        }
    }

    pub fn as_feet(self) -> i32 {
        match self {
            ContainerSize::Ft20 => 20,
            ContainerSize::Ft40 => 40,
        }
    }

    pub fn from_feet(feet: i32) -> Option<Self> {
        match feet {
            20 => Some(ContainerSize::Ft20),
            40 => Some(ContainerSize::Ft40),
            _ => None,
        }
    }

    /// Load limit: the configured maximum when positive, else the size default.
    pub fn resolve_max_load_kg(self, configured: Option<i32>) -> i32 {
        configured
            .filter(|kg| *kg > 0)
            .unwrap_or_else(|| self.max_load_kg())
    }
}

/// A container registered on the terminal and waiting to be (or already) sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyukkaContainer {
    pub container_id: i32,
    pub booking_no: Option<String>,
    pub container_no: Option<String>,
    pub seal_no: Option<String>,
    pub container_size: Option<ContainerSize>,
    pub container_jyuryo: Option<i32>,
    pub dunnage_jyuryo: Option<i32>,
    pub syukka_status: Option<String>,
    pub data_send_ymdhms: Option<NaiveDateTime>,
}

impl SyukkaContainer {
    pub fn is_sent(&self) -> bool {
        self.data_send_ymdhms.is_some()
    }
}

/// Input of a container registration; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyukkaContainer {
    pub booking_no: Option<String>,
    pub container_no: String,
    pub seal_no: String,
    pub container_size: ContainerSize,
    pub container_jyuryo: i32,
    pub dunnage_jyuryo: i32,
}
