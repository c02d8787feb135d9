//! Shipment (出荷) domain: plan headers, loaded containers and bundle lines.

mod container;
mod meisai;
mod yotei;

pub use container::{ContainerSize, NewSyukkaContainer, SyukkaContainer};
pub use meisai::{BundleKey, SyukkaMeisai, WorkBundle, WorkSummary};
pub use yotei::Yotei;
