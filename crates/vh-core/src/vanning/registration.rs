use super::error::VanningError;
use crate::container::build_container_no;
use crate::shipment::{ContainerSize, NewSyukkaContainer, WorkSummary};

/// Web-side column for dunnage weight is a tinyint.
const DUNNAGE_LIMIT_KG: i32 = 256;

/// Operator input of the container registration screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRegistration {
    /// Owner code part of the container number (3 letters).
    pub owner_code: String,
    /// Serial part of the container number (6 digits).
    pub serial_no: String,
    pub seal_no: String,
    /// Booking number; falls back to the staged bundles' booking when blank.
    pub booking_no: Option<String>,
    pub container_size: ContainerSize,
    pub container_kg: i32,
    pub dunnage_kg: i32,
    pub max_kg: i32,
}

/// Validated registration, ready to be written in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPlan {
    pub container: NewSyukkaContainer,
    pub bundle_count: i32,
    pub jyuryo: i32,
}

impl ContainerRegistration {
    pub fn remaining_kg(&self, staged: &WorkSummary) -> i32 {
        self.max_kg - (self.container_kg + self.dunnage_kg + staged.jyuryo)
    }

    /// Applies the registration checks in screen order.
    pub fn validate(&self, staged: &WorkSummary) -> Result<RegistrationPlan, VanningError> {
        if staged.bundle_count <= 0 {
            return Err(VanningError::NoBundlesSelected);
        }

        let container_no = build_container_no(&self.owner_code, &self.serial_no)?;

        if self.container_kg <= 0 {
            return Err(VanningError::ContainerWeightMissing);
        }
        if self.dunnage_kg <= 0 {
            return Err(VanningError::DunnageWeightMissing);
        }
        if self.dunnage_kg >= DUNNAGE_LIMIT_KG {
            return Err(VanningError::DunnageTooHeavy);
        }
        if self.remaining_kg(staged) < 0 {
            return Err(VanningError::LoadExceeded);
        }

        let booking_no = self
            .booking_no
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .or_else(|| staged.booking_no.as_deref().map(str::trim))
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        Ok(RegistrationPlan {
            container: NewSyukkaContainer {
                booking_no,
                container_no: container_no.unwrap_or_default(),
                seal_no: self.seal_no.trim().to_string(),
                container_size: self.container_size,
                container_jyuryo: self.container_kg,
                dunnage_jyuryo: self.dunnage_kg,
            },
            bundle_count: staged.bundle_count,
            jyuryo: staged.jyuryo,
        })
    }
}
