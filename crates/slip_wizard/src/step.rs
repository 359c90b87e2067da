use std::fmt;

use serde::{Deserialize, Serialize};

/// A page of the slip wizard. Arch/teeth selection after [`WizardStep::Stage`]
/// is a modal, not a step.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Lab,
    Doctor,
    Patient,
    Category,
    Subcategory,
    Product,
    Stage,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Lab;
    pub const LAST: WizardStep = WizardStep::Stage;

    pub const fn all() -> &'static [WizardStep] {
        &[
            Self::Lab,
            Self::Doctor,
            Self::Patient,
            Self::Category,
            Self::Subcategory,
            Self::Product,
            Self::Stage,
        ]
    }

    /// 1-based position in the wizard.
    pub fn number(self) -> u8 {
        match self {
            Self::Lab => 1,
            Self::Doctor => 2,
            Self::Patient => 3,
            Self::Category => 4,
            Self::Subcategory => 5,
            Self::Product => 6,
            Self::Stage => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Lab),
            2 => Some(Self::Doctor),
            3 => Some(Self::Patient),
            4 => Some(Self::Category),
            5 => Some(Self::Subcategory),
            6 => Some(Self::Product),
            7 => Some(Self::Stage),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Lab => "Select Lab",
            Self::Doctor => "Select Doctor",
            Self::Patient => "Patient",
            Self::Category => "Product Category",
            Self::Subcategory => "Subcategory",
            Self::Product => "Product",
            Self::Stage => "Stages",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}
