//! Modal orchestration.
//!
//! Which overlay is visible is derived from the step, the draft and the last
//! intent by [`visible_modal`]. The orchestrator keeps a stack so a modal
//! opened over another can hand control back; only the top is visible.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    reducer::{self, NavigationIntent, SideEffect},
    step::WizardStep,
    store::SlipDraft,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    #[default]
    None,
    CancelConfirmation,
    SubmitWarning,
    ArchSelection,
}

impl ModalKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::None => "",
            Self::CancelConfirmation => "Discard this slip?",
            Self::SubmitWarning => "No arch selected",
            Self::ArchSelection => "Select Arch / Teeth",
        }
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::CancelConfirmation => "cancel_confirmation",
            Self::SubmitWarning => "submit_warning",
            Self::ArchSelection => "arch_selection",
        };
        f.write_str(name)
    }
}

/// The last thing the user asked for, as far as modals are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardIntent {
    Navigate(NavigationIntent),
    /// Final submission, distinct from Continue.
    Submit,
}

impl From<NavigationIntent> for WizardIntent {
    fn from(intent: NavigationIntent) -> Self {
        Self::Navigate(intent)
    }
}

pub fn visible_modal(step: WizardStep, intent: WizardIntent, draft: &SlipDraft) -> ModalKind {
    match intent {
        WizardIntent::Navigate(nav) => match reducer::transition(step, nav, draft).side_effect {
            SideEffect::OpenArchModal => ModalKind::ArchSelection,
            SideEffect::PromptCancel if !draft.is_empty() => ModalKind::CancelConfirmation,
            SideEffect::PromptCancel | SideEffect::None => ModalKind::None,
        },
        WizardIntent::Submit => {
            if draft.has_arch_or_teeth() {
                ModalKind::None
            } else {
                ModalKind::SubmitWarning
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalResponse {
    Confirm,
    Dismiss,
}

/// What the wizard must do once a modal is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Cancel confirmed: reset the draft and close the wizard.
    DiscardDraft,
    /// Arch confirmed: complete the slip with the supplied selection.
    CompleteSlip,
    /// Missing-arch warning overridden: complete the slip without one.
    SubmitAnyway,
    /// Modal dismissed: whatever was underneath is visible again.
    Restore,
}

pub fn resolve(kind: ModalKind, response: ModalResponse) -> Option<ModalOutcome> {
    match (kind, response) {
        (ModalKind::None, _) => None,
        (ModalKind::CancelConfirmation, ModalResponse::Confirm) => Some(ModalOutcome::DiscardDraft),
        (ModalKind::ArchSelection, ModalResponse::Confirm) => Some(ModalOutcome::CompleteSlip),
        (ModalKind::SubmitWarning, ModalResponse::Confirm) => Some(ModalOutcome::SubmitAnyway),
        (_, ModalResponse::Dismiss) => Some(ModalOutcome::Restore),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalOrchestrator {
    stack: Vec<ModalKind>,
}

impl ModalOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> ModalKind {
        self.stack.last().copied().unwrap_or_default()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.visible() == kind && kind != ModalKind::None
    }

    /// Shows `kind` over the current modal. Showing the visible modal again,
    /// or `None`, changes nothing.
    pub fn show(&mut self, kind: ModalKind) {
        if kind != ModalKind::None && self.visible() != kind {
            self.stack.push(kind);
        }
    }

    /// Hides the visible modal and returns what is visible afterwards.
    pub fn dismiss(&mut self) -> ModalKind {
        self.stack.pop();
        self.visible()
    }

    pub fn close_all(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{
        resolve, visible_modal, ModalKind, ModalOrchestrator, ModalOutcome, ModalResponse,
        WizardIntent,
    };
    use crate::{reducer::NavigationIntent, step::WizardStep, store::SlipDraft};
    use shared::domain::Arch;

    fn draft_with_lab_and_doctor() -> SlipDraft {
        let mut draft = SlipDraft::new();
        draft.set_lab(Some("L1".into()));
        draft.set_doctor(Some("D1".into()));
        draft
    }

    #[test]
    fn cancel_with_data_asks_for_confirmation() {
        let kind = visible_modal(
            WizardStep::Patient,
            NavigationIntent::Cancel.into(),
            &draft_with_lab_and_doctor(),
        );
        assert_eq!(kind, ModalKind::CancelConfirmation);
    }

    #[test]
    fn cancel_with_nothing_to_lose_shows_no_modal() {
        let kind = visible_modal(
            WizardStep::Lab,
            NavigationIntent::Cancel.into(),
            &SlipDraft::new(),
        );
        assert_eq!(kind, ModalKind::None);
    }

    #[test]
    fn back_from_first_step_behaves_like_cancel() {
        let kind = visible_modal(
            WizardStep::Lab,
            NavigationIntent::Back.into(),
            &draft_with_lab_and_doctor(),
        );
        assert_eq!(kind, ModalKind::CancelConfirmation);
    }

    #[test]
    fn submit_without_arch_warns_and_with_arch_does_not() {
        let mut draft = draft_with_lab_and_doctor();
        assert_eq!(
            visible_modal(WizardStep::Stage, WizardIntent::Submit, &draft),
            ModalKind::SubmitWarning
        );
        draft.set_arch(Some(Arch::Both));
        assert_eq!(
            visible_modal(WizardStep::Stage, WizardIntent::Submit, &draft),
            ModalKind::None
        );
    }

    #[test]
    fn dismissing_a_stacked_modal_restores_the_one_below() {
        let mut modals = ModalOrchestrator::new();
        modals.show(ModalKind::ArchSelection);
        modals.show(ModalKind::SubmitWarning);
        assert_eq!(modals.visible(), ModalKind::SubmitWarning);

        assert_eq!(modals.dismiss(), ModalKind::ArchSelection);
        assert!(modals.is_open(ModalKind::ArchSelection));
        assert_eq!(modals.dismiss(), ModalKind::None);
        assert_eq!(modals.dismiss(), ModalKind::None);
    }

    #[test]
    fn showing_the_visible_modal_twice_does_not_stack_it() {
        let mut modals = ModalOrchestrator::new();
        modals.show(ModalKind::CancelConfirmation);
        modals.show(ModalKind::CancelConfirmation);
        modals.show(ModalKind::None);
        assert_eq!(modals.dismiss(), ModalKind::None);
    }

    #[test]
    fn responses_map_to_outcomes() {
        assert_eq!(
            resolve(ModalKind::CancelConfirmation, ModalResponse::Confirm),
            Some(ModalOutcome::DiscardDraft)
        );
        assert_eq!(
            resolve(ModalKind::SubmitWarning, ModalResponse::Confirm),
            Some(ModalOutcome::SubmitAnyway)
        );
        assert_eq!(
            resolve(ModalKind::SubmitWarning, ModalResponse::Dismiss),
            Some(ModalOutcome::Restore)
        );
        assert_eq!(
            resolve(ModalKind::ArchSelection, ModalResponse::Confirm),
            Some(ModalOutcome::CompleteSlip)
        );
        assert_eq!(resolve(ModalKind::None, ModalResponse::Confirm), None);
    }
}
