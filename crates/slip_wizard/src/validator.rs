//! Per-step completeness checks. Pure; a failing check blocks Continue and
//! nothing else.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::domain::ToothNumber;

use crate::{step::WizardStep, store::SlipDraft};

/// What a rejected action was missing, for the inline message under the step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Requirement {
    Lab,
    Doctor,
    PatientName,
    Category,
    Subcategory,
    Product,
    Stages,
    ArchOrTeeth,
    /// The selection is not among the options offered for this step.
    OfferedOption { value: String },
    ToothInArch { tooth: ToothNumber },
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lab => f.write_str("select a lab"),
            Self::Doctor => f.write_str("select a doctor"),
            Self::PatientName => f.write_str("enter the patient's name"),
            Self::Category => f.write_str("select a product category"),
            Self::Subcategory => f.write_str("select a subcategory"),
            Self::Product => f.write_str("select a product"),
            Self::Stages => f.write_str("select at least one stage"),
            Self::ArchOrTeeth => f.write_str("select an arch or at least one tooth"),
            Self::OfferedOption { value } => write!(f, "'{value}' is not an available option"),
            Self::ToothInArch { tooth } => write!(f, "tooth {tooth} is not on the selected arch"),
        }
    }
}

/// The requirement `step` is still missing, if any.
pub fn missing_requirement(step: WizardStep, draft: &SlipDraft) -> Option<Requirement> {
    let satisfied = match step {
        WizardStep::Lab => draft.lab().is_some_and(|id| !id.is_blank()),
        WizardStep::Doctor => draft.doctor().is_some_and(|id| !id.is_blank()),
        WizardStep::Patient => !draft.patient_name().trim().is_empty(),
        WizardStep::Category => draft.category().is_some_and(|id| !id.is_blank()),
        WizardStep::Subcategory => draft.subcategory().is_some_and(|id| !id.is_blank()),
        WizardStep::Product => draft.product().is_some_and(|id| !id.is_blank()),
        WizardStep::Stage => draft.stages().iter().any(|id| !id.is_blank()),
    };
    if satisfied {
        return None;
    }

    Some(match step {
        WizardStep::Lab => Requirement::Lab,
        WizardStep::Doctor => Requirement::Doctor,
        WizardStep::Patient => Requirement::PatientName,
        WizardStep::Category => Requirement::Category,
        WizardStep::Subcategory => Requirement::Subcategory,
        WizardStep::Product => Requirement::Product,
        WizardStep::Stage => Requirement::Stages,
    })
}

pub fn can_advance(step: WizardStep, draft: &SlipDraft) -> bool {
    missing_requirement(step, draft).is_none()
}

/// First step, in wizard order, whose requirement is unmet.
pub fn first_incomplete_step(draft: &SlipDraft) -> Option<(WizardStep, Requirement)> {
    WizardStep::all()
        .iter()
        .find_map(|step| missing_requirement(*step, draft).map(|req| (*step, req)))
}
