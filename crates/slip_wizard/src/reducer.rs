//! Navigation reducer: `(step, intent, draft) -> Transition`.
//!
//! Continue never passes an incomplete step, Back never validates, and Cancel
//! never mutates anything; it only asks the modal layer for confirmation.

use serde::{Deserialize, Serialize};

use crate::{step::WizardStep, store::SlipDraft, validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationIntent {
    Continue,
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    None,
    /// Stage step passed: the arch/teeth modal takes over.
    OpenArchModal,
    /// Cancel (or Back from the first step): confirm before discarding.
    PromptCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next_step: WizardStep,
    pub side_effect: SideEffect,
}

impl Transition {
    fn to(step: WizardStep) -> Self {
        Self {
            next_step: step,
            side_effect: SideEffect::None,
        }
    }

    fn with_effect(step: WizardStep, side_effect: SideEffect) -> Self {
        Self {
            next_step: step,
            side_effect,
        }
    }

    pub fn moved_from(&self, step: WizardStep) -> bool {
        self.next_step != step
    }
}

pub fn transition(step: WizardStep, intent: NavigationIntent, draft: &SlipDraft) -> Transition {
    match intent {
        NavigationIntent::Continue => continue_from(step, draft),
        NavigationIntent::Back => back_from(step),
        NavigationIntent::Cancel => Transition::with_effect(step, SideEffect::PromptCancel),
    }
}

fn continue_from(step: WizardStep, draft: &SlipDraft) -> Transition {
    if !validator::can_advance(step, draft) {
        return Transition::to(step);
    }
    match step {
        WizardStep::Lab => Transition::to(WizardStep::Doctor),
        WizardStep::Doctor => Transition::to(WizardStep::Patient),
        WizardStep::Patient => Transition::to(WizardStep::Category),
        WizardStep::Category => Transition::to(WizardStep::Subcategory),
        WizardStep::Subcategory => Transition::to(WizardStep::Product),
        WizardStep::Product => Transition::to(WizardStep::Stage),
        WizardStep::Stage => Transition::with_effect(WizardStep::Stage, SideEffect::OpenArchModal),
    }
}

fn back_from(step: WizardStep) -> Transition {
    match step {
        WizardStep::Lab => Transition::with_effect(WizardStep::Lab, SideEffect::PromptCancel),
        WizardStep::Doctor => Transition::to(WizardStep::Lab),
        WizardStep::Patient => Transition::to(WizardStep::Doctor),
        WizardStep::Category => Transition::to(WizardStep::Patient),
        WizardStep::Subcategory => Transition::to(WizardStep::Category),
        WizardStep::Product => Transition::to(WizardStep::Subcategory),
        WizardStep::Stage => Transition::to(WizardStep::Product),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
