use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Arch, CategoryId, DoctorId, LabId, ProductId, StageId, SubcategoryId, ToothNumber,
};

/// A finished slip, handed to whatever submits it to the lab's API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSlip {
    pub slip_id: Uuid,
    pub lab_id: LabId,
    pub doctor_id: DoctorId,
    pub patient_name: String,
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub product_id: ProductId,
    pub stage_ids: Vec<StageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teeth: Vec<ToothNumber>,
    /// Set when the user submitted through the missing-arch warning.
    #[serde(default)]
    pub arch_warning_overridden: bool,
    pub completed_at: DateTime<Utc>,
}

impl CompletedSlip {
    pub fn has_arch_or_teeth(&self) -> bool {
        self.arch.is_some() || !self.teeth.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SlipEvent {
    SlipCompleted { slip: CompletedSlip },
}
