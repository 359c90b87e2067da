//! Selection context: the draft a wizard accumulates one step at a time.
//!
//! Setters touch exactly one field. The only operation that clears more than
//! the field it names is [`SlipDraft::invalidate_dependents_of`], which the
//! wizard calls when a revised upstream value is continued.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared::domain::{
    Arch, CategoryId, DoctorId, LabId, ProductId, StageId, SubcategoryId, ToothNumber,
};

use crate::step::WizardStep;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlipDraft {
    lab: Option<LabId>,
    doctor: Option<DoctorId>,
    patient_name: String,
    category: Option<CategoryId>,
    subcategory: Option<SubcategoryId>,
    product: Option<ProductId>,
    stages: BTreeSet<StageId>,
    arch: Option<Arch>,
    teeth: BTreeSet<ToothNumber>,
}

/// The value a step contributes to the draft, used to detect revisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StepValue {
    Lab(Option<LabId>),
    Doctor(Option<DoctorId>),
    Patient(String),
    Category(Option<CategoryId>),
    Subcategory(Option<SubcategoryId>),
    Product(Option<ProductId>),
    Stages(BTreeSet<StageId>),
}

/// Steps whose selections were derived from `step` and stop applying when it
/// changes.
pub fn dependents_of(step: WizardStep) -> &'static [WizardStep] {
    match step {
        WizardStep::Category => &[WizardStep::Subcategory, WizardStep::Product],
        WizardStep::Subcategory => &[WizardStep::Product],
        WizardStep::Lab
        | WizardStep::Doctor
        | WizardStep::Patient
        | WizardStep::Product
        | WizardStep::Stage => &[],
    }
}

impl SlipDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lab(&self) -> Option<&LabId> {
        self.lab.as_ref()
    }

    pub fn set_lab(&mut self, lab: Option<LabId>) {
        self.lab = lab;
    }

    pub fn doctor(&self) -> Option<&DoctorId> {
        self.doctor.as_ref()
    }

    pub fn set_doctor(&mut self, doctor: Option<DoctorId>) {
        self.doctor = doctor;
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn set_patient_name(&mut self, name: impl Into<String>) {
        self.patient_name = name.into();
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
    }

    pub fn subcategory(&self) -> Option<&SubcategoryId> {
        self.subcategory.as_ref()
    }

    pub fn set_subcategory(&mut self, subcategory: Option<SubcategoryId>) {
        self.subcategory = subcategory;
    }

    pub fn product(&self) -> Option<&ProductId> {
        self.product.as_ref()
    }

    pub fn set_product(&mut self, product: Option<ProductId>) {
        self.product = product;
    }

    pub fn stages(&self) -> &BTreeSet<StageId> {
        &self.stages
    }

    pub fn set_stages(&mut self, stages: impl IntoIterator<Item = StageId>) {
        self.stages = stages.into_iter().collect();
    }

    pub fn add_stage(&mut self, stage: StageId) -> bool {
        self.stages.insert(stage)
    }

    pub fn remove_stage(&mut self, stage: &StageId) -> bool {
        self.stages.remove(stage)
    }

    pub fn arch(&self) -> Option<Arch> {
        self.arch
    }

    pub fn set_arch(&mut self, arch: Option<Arch>) {
        self.arch = arch;
    }

    pub fn teeth(&self) -> &BTreeSet<ToothNumber> {
        &self.teeth
    }

    pub fn set_teeth(&mut self, teeth: impl IntoIterator<Item = ToothNumber>) {
        self.teeth = teeth.into_iter().collect();
    }

    /// Whether the late-stage arch/teeth selection has been made.
    pub fn has_arch_or_teeth(&self) -> bool {
        self.arch.is_some() || !self.teeth.is_empty()
    }

    /// Restores the empty draft. Calling it twice is the same as calling it once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no field holds anything worth confirming before discarding.
    pub fn is_empty(&self) -> bool {
        self.lab.as_ref().map_or(true, LabId::is_blank)
            && self.doctor.as_ref().map_or(true, DoctorId::is_blank)
            && self.patient_name.trim().is_empty()
            && self.category.as_ref().map_or(true, CategoryId::is_blank)
            && self.subcategory.as_ref().map_or(true, SubcategoryId::is_blank)
            && self.product.as_ref().map_or(true, ProductId::is_blank)
            && self.stages.is_empty()
            && !self.has_arch_or_teeth()
    }

    /// Clears every field structurally derived from `step` and returns the
    /// steps that were cleared.
    pub fn invalidate_dependents_of(&mut self, step: WizardStep) -> Vec<WizardStep> {
        let mut cleared = Vec::new();
        for dependent in dependents_of(step) {
            let had_value = match dependent {
                WizardStep::Subcategory => self.subcategory.take().is_some(),
                WizardStep::Product => self.product.take().is_some(),
                _ => false,
            };
            if had_value {
                cleared.push(*dependent);
            }
        }
        cleared
    }

    pub(crate) fn value_at(&self, step: WizardStep) -> StepValue {
        match step {
            WizardStep::Lab => StepValue::Lab(self.lab.clone()),
            WizardStep::Doctor => StepValue::Doctor(self.doctor.clone()),
            WizardStep::Patient => StepValue::Patient(self.patient_name.trim().to_string()),
            WizardStep::Category => StepValue::Category(self.category.clone()),
            WizardStep::Subcategory => StepValue::Subcategory(self.subcategory.clone()),
            WizardStep::Product => StepValue::Product(self.product.clone()),
            WizardStep::Stage => StepValue::Stages(self.stages.clone()),
        }
    }
}
