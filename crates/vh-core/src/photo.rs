use std::fmt;

use serde::{Deserialize, Serialize};

/// The two photos attached to a shipped container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    Container,
    Seal,
}

impl PhotoKind {
    pub const ALL: [PhotoKind; 2] = [PhotoKind::Container, PhotoKind::Seal];

    pub fn as_str(self) -> &'static str {
        match self {
            PhotoKind::Container => "container",
            PhotoKind::Seal => "seal",
        }
    }

    /// File name of a container's photo inside the image directory.
    pub fn file_name(self, container_id: i32) -> String {
        format!("container_{}_{}.jpg", container_id, self.as_str())
    }
}

impl fmt::Display for PhotoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
