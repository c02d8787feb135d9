mod collation_repo;
mod comm_history_repo;
mod shipment_repo;
mod shipment_work_repo;
mod system_repo;

pub use collation_repo::*;
pub use comm_history_repo::*;
pub use shipment_repo::*;
pub use shipment_work_repo::*;
pub use system_repo::*;

#[cfg(test)]
pub(crate) mod test_support;
