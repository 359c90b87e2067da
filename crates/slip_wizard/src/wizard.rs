//! The slip wizard: one owned instance per open "add slip" flow.
//!
//! Every action takes `&mut self` and either applies completely or returns a
//! [`WizardError`] with the wizard untouched.

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Arch, CategoryId, DoctorId, LabId, ProductId, StageId, SubcategoryId, ToothNumber},
    protocol::CompletedSlip,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    config::WizardSettings,
    error::WizardError,
    modal::{self, ModalKind, ModalOrchestrator, ModalOutcome, ModalResponse, WizardIntent},
    reducer::{self, NavigationIntent, SideEffect},
    step::WizardStep,
    store::{SlipDraft, StepValue},
    validator::{self, Requirement},
};

/// Receives each completed slip. Sending it anywhere, and handling failure, is
/// the implementor's business.
pub trait SlipSubmitter {
    fn submit_slip(&mut self, slip: CompletedSlip);
}

impl SlipSubmitter for Vec<CompletedSlip> {
    fn submit_slip(&mut self, slip: CompletedSlip) {
        self.push(slip);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WizardId(pub Uuid);

impl WizardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WizardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WizardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The value a step's form hands over on Continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepInput {
    Lab(LabId),
    Doctor(DoctorId),
    Patient(String),
    Category(CategoryId),
    Subcategory(SubcategoryId),
    Product(ProductId),
    Stages(Vec<StageId>),
}

impl StepInput {
    pub fn step(&self) -> WizardStep {
        match self {
            Self::Lab(_) => WizardStep::Lab,
            Self::Doctor(_) => WizardStep::Doctor,
            Self::Patient(_) => WizardStep::Patient,
            Self::Category(_) => WizardStep::Category,
            Self::Subcategory(_) => WizardStep::Subcategory,
            Self::Product(_) => WizardStep::Product,
            Self::Stages(_) => WizardStep::Stage,
        }
    }

    fn apply(self, draft: &mut SlipDraft) {
        match self {
            Self::Lab(id) => draft.set_lab(Some(id)),
            Self::Doctor(id) => draft.set_doctor(Some(id)),
            Self::Patient(name) => draft.set_patient_name(name),
            Self::Category(id) => draft.set_category(Some(id)),
            Self::Subcategory(id) => draft.set_subcategory(Some(id)),
            Self::Product(id) => draft.set_product(Some(id)),
            Self::Stages(ids) => draft.set_stages(ids),
        }
    }
}

/// Arch and/or teeth chosen in the arch modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchSelection {
    #[serde(default)]
    pub arch: Option<Arch>,
    #[serde(default)]
    pub teeth: BTreeSet<ToothNumber>,
}

impl ArchSelection {
    pub fn arch(arch: Arch) -> Self {
        Self {
            arch: Some(arch),
            teeth: BTreeSet::new(),
        }
    }

    pub fn teeth(teeth: impl IntoIterator<Item = ToothNumber>) -> Self {
        Self {
            arch: None,
            teeth: teeth.into_iter().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.arch.is_none() && self.teeth.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardResponse {
    StepChanged {
        from: WizardStep,
        to: WizardStep,
        /// Downstream steps whose selections were cleared by a revision.
        cleared: Vec<WizardStep>,
    },
    ModalShown(ModalKind),
    /// A modal was dismissed; `visible` is what shows now.
    ModalClosed { visible: ModalKind },
    /// Draft discarded and wizard closed.
    Closed,
    Submitted { slip_id: Uuid },
}

pub struct SlipWizard<S> {
    id: WizardId,
    settings: WizardSettings,
    catalog: Option<Catalog>,
    submitter: S,
    step: WizardStep,
    draft: SlipDraft,
    committed: HashMap<WizardStep, StepValue>,
    modals: ModalOrchestrator,
    open: bool,
}

impl<S: SlipSubmitter> SlipWizard<S> {
    /// Creates an open wizard on the first step with an empty draft.
    pub fn new(settings: WizardSettings, submitter: S) -> Self {
        let wizard = Self {
            id: WizardId::new(),
            settings,
            catalog: None,
            submitter,
            step: WizardStep::FIRST,
            draft: SlipDraft::new(),
            committed: HashMap::new(),
            modals: ModalOrchestrator::new(),
            open: true,
        };
        info!(wizard_id = %wizard.id, "slip wizard opened");
        wizard
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn set_catalog(&mut self, catalog: Option<Catalog>) {
        self.catalog = catalog;
    }

    pub fn id(&self) -> WizardId {
        self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &SlipDraft {
        &self.draft
    }

    /// Direct access to the selection store. A revised value on the current
    /// step is forward-invalidated on the next Continue. A revised value on an
    /// earlier step sends the next Continue back to that step instead, and a
    /// slip is never completed while any confirmed step differs from its draft
    /// value.
    pub fn draft_mut(&mut self) -> &mut SlipDraft {
        &mut self.draft
    }

    pub fn visible_modal(&self) -> ModalKind {
        self.modals.visible()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn submitter_mut(&mut self) -> &mut S {
        &mut self.submitter
    }

    pub fn can_advance(&self) -> bool {
        validator::can_advance(self.step, &self.draft)
    }

    /// Reopens a closed wizard with a fresh draft.
    pub fn open_wizard(&mut self) -> Result<(), WizardError> {
        if self.open {
            return Err(self.refuse(WizardError::invalid(
                "open_wizard",
                "the wizard is already open",
            )));
        }
        self.reset_state();
        self.open = true;
        info!(wizard_id = %self.id, "slip wizard opened");
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("cancel")?;
        if self.modals.is_open(ModalKind::CancelConfirmation) {
            return Ok(WizardResponse::ModalShown(ModalKind::CancelConfirmation));
        }
        self.prompt_cancel(NavigationIntent::Cancel)
    }

    /// Applies `input` to the current step and continues. A rejected input
    /// is not written to the draft.
    pub fn continue_with(&mut self, input: StepInput) -> Result<WizardResponse, WizardError> {
        self.ensure_open("continue")?;
        self.ensure_no_modal("continue")?;
        if input.step() != self.step {
            return Err(self.refuse(WizardError::invalid(
                "continue",
                format!("input is for step {} but the wizard is on step {}", input.step(), self.step),
            )));
        }

        let mut candidate = self.draft.clone();
        input.apply(&mut candidate);
        self.check_step(&candidate)?;

        self.draft = candidate;
        self.advance()
    }

    /// Continues with whatever the draft already holds for the current step.
    pub fn advance(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("continue")?;
        self.ensure_no_modal("continue")?;
        if let Some(response) = self.reopen_revised_step() {
            return Ok(response);
        }
        self.check_step(&self.draft)?;

        let from = self.step;
        let transition = reducer::transition(from, NavigationIntent::Continue, &self.draft);
        let mut cleared = self.commit(from);

        match transition.side_effect {
            SideEffect::OpenArchModal => {
                self.modals.show(ModalKind::ArchSelection);
                debug!(wizard_id = %self.id, step = %from, "arch selection opened");
                Ok(WizardResponse::ModalShown(ModalKind::ArchSelection))
            }
            SideEffect::None | SideEffect::PromptCancel => {
                let mut to = transition.next_step;
                if let Some(collapsed) = self.collapse_subcategory(to) {
                    cleared.extend(collapsed);
                    to = WizardStep::Product;
                }
                self.step = to;
                debug!(wizard_id = %self.id, from = %from, to = %to, ?cleared, "step advanced");
                Ok(WizardResponse::StepChanged { from, to, cleared })
            }
        }
    }

    pub fn back(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("back")?;
        self.ensure_no_modal("back")?;

        let from = self.step;
        let transition = reducer::transition(from, NavigationIntent::Back, &self.draft);
        if transition.side_effect == SideEffect::PromptCancel {
            return self.prompt_cancel(NavigationIntent::Back);
        }

        self.step = transition.next_step;
        debug!(wizard_id = %self.id, from = %from, to = %self.step, "step back");
        Ok(WizardResponse::StepChanged {
            from,
            to: self.step,
            cleared: Vec::new(),
        })
    }

    pub fn confirm_arch(&mut self, selection: ArchSelection) -> Result<WizardResponse, WizardError> {
        self.ensure_open("confirm_arch")?;
        self.ensure_modal("confirm_arch", ModalKind::ArchSelection)?;

        if selection.is_empty() {
            return Err(self.refuse(WizardError::rejected(
                WizardStep::LAST,
                Requirement::ArchOrTeeth,
            )));
        }
        if let Some(arch) = selection.arch {
            if let Some(tooth) = selection.teeth.iter().find(|tooth| !arch.contains(**tooth)) {
                return Err(self.refuse(WizardError::rejected(
                    WizardStep::LAST,
                    Requirement::ToothInArch { tooth: *tooth },
                )));
            }
        }

        let previous = ArchSelection {
            arch: self.draft.arch(),
            teeth: self.draft.teeth().clone(),
        };
        self.draft.set_arch(selection.arch);
        self.draft.set_teeth(selection.teeth);
        let response = self.respond(ModalKind::ArchSelection, ModalResponse::Confirm);
        if response.is_err() {
            self.draft.set_arch(previous.arch);
            self.draft.set_teeth(previous.teeth);
        }
        response
    }

    pub fn dismiss_arch(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("dismiss_arch")?;
        self.ensure_modal("dismiss_arch", ModalKind::ArchSelection)?;
        self.respond(ModalKind::ArchSelection, ModalResponse::Dismiss)
    }

    /// Final submission from the arch modal, using whatever arch and teeth the
    /// host already wrote through [`SlipWizard::draft_mut`]. Without either
    /// this raises the submit warning instead. Hosts that collect the
    /// selection in the modal itself use [`SlipWizard::confirm_arch`].
    pub fn submit(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("submit")?;
        self.ensure_modal("submit", ModalKind::ArchSelection)?;

        match modal::visible_modal(self.step, WizardIntent::Submit, &self.draft) {
            ModalKind::None => self.complete(false),
            kind => {
                self.modals.show(kind);
                debug!(wizard_id = %self.id, modal = %kind, "submit held back");
                Ok(WizardResponse::ModalShown(kind))
            }
        }
    }

    pub fn override_submit_warning(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("override_submit_warning")?;
        self.ensure_modal("override_submit_warning", ModalKind::SubmitWarning)?;
        self.respond(ModalKind::SubmitWarning, ModalResponse::Confirm)
    }

    pub fn dismiss_submit_warning(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("dismiss_submit_warning")?;
        self.ensure_modal("dismiss_submit_warning", ModalKind::SubmitWarning)?;
        self.respond(ModalKind::SubmitWarning, ModalResponse::Dismiss)
    }

    pub fn confirm_cancel(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("confirm_cancel")?;
        self.ensure_modal("confirm_cancel", ModalKind::CancelConfirmation)?;
        self.respond(ModalKind::CancelConfirmation, ModalResponse::Confirm)
    }

    pub fn dismiss_cancel(&mut self) -> Result<WizardResponse, WizardError> {
        self.ensure_open("dismiss_cancel")?;
        self.ensure_modal("dismiss_cancel", ModalKind::CancelConfirmation)?;
        self.respond(ModalKind::CancelConfirmation, ModalResponse::Dismiss)
    }

    fn respond(
        &mut self,
        kind: ModalKind,
        response: ModalResponse,
    ) -> Result<WizardResponse, WizardError> {
        match modal::resolve(kind, response) {
            Some(ModalOutcome::DiscardDraft) => Ok(self.close()),
            Some(ModalOutcome::CompleteSlip) => self.complete(false),
            Some(ModalOutcome::SubmitAnyway) => self.complete(true),
            Some(ModalOutcome::Restore) => {
                let visible = self.modals.dismiss();
                debug!(wizard_id = %self.id, closed = %kind, visible = %visible, "modal dismissed");
                Ok(WizardResponse::ModalClosed { visible })
            }
            None => Err(self.refuse(WizardError::invalid(
                "respond",
                "no modal is open",
            ))),
        }
    }

    fn prompt_cancel(&mut self, intent: NavigationIntent) -> Result<WizardResponse, WizardError> {
        let kind = match modal::visible_modal(self.step, intent.into(), &self.draft) {
            ModalKind::None if self.settings.confirm_empty_cancel => ModalKind::CancelConfirmation,
            kind => kind,
        };
        if kind == ModalKind::None {
            return Ok(self.close());
        }
        self.modals.show(kind);
        debug!(wizard_id = %self.id, step = %self.step, modal = %kind, "cancel requested");
        Ok(WizardResponse::ModalShown(kind))
    }

    fn complete(&mut self, arch_warning_overridden: bool) -> Result<WizardResponse, WizardError> {
        let slip = self.build_slip(arch_warning_overridden)?;
        let slip_id = slip.slip_id;
        info!(
            wizard_id = %self.id,
            %slip_id,
            lab_id = %slip.lab_id,
            product_id = %slip.product_id,
            arch_warning_overridden,
            "slip completed"
        );
        self.submitter.submit_slip(slip);
        self.close();
        Ok(WizardResponse::Submitted { slip_id })
    }

    fn build_slip(&self, arch_warning_overridden: bool) -> Result<CompletedSlip, WizardError> {
        if let Some(step) = self.first_revised_step(WizardStep::LAST) {
            return Err(self.refuse(WizardError::invalid(
                "submit",
                format!("step {step} was changed after it was continued"),
            )));
        }
        if let Some((step, requirement)) = validator::first_incomplete_step(&self.draft) {
            return Err(self.refuse(WizardError::rejected(step, requirement)));
        }
        for step in WizardStep::all() {
            if let Some(value) = self.unoffered_value(*step, &self.draft) {
                return Err(self.refuse(WizardError::rejected(
                    *step,
                    Requirement::OfferedOption { value },
                )));
            }
        }
        let draft = &self.draft;
        let (
            Some(lab_id),
            Some(doctor_id),
            Some(category_id),
            Some(subcategory_id),
            Some(product_id),
        ) = (
            draft.lab(),
            draft.doctor(),
            draft.category(),
            draft.subcategory(),
            draft.product(),
        )
        else {
            return Err(self.refuse(WizardError::invalid(
                "submit",
                "the draft is incomplete",
            )));
        };

        Ok(CompletedSlip {
            slip_id: Uuid::new_v4(),
            lab_id: lab_id.clone(),
            doctor_id: doctor_id.clone(),
            patient_name: draft.patient_name().trim().to_string(),
            category_id: category_id.clone(),
            subcategory_id: subcategory_id.clone(),
            product_id: product_id.clone(),
            stage_ids: draft.stages().iter().cloned().collect(),
            arch: draft.arch(),
            teeth: draft.teeth().iter().copied().collect(),
            arch_warning_overridden,
            completed_at: Utc::now(),
        })
    }

    fn close(&mut self) -> WizardResponse {
        self.reset_state();
        self.open = false;
        info!(wizard_id = %self.id, "slip wizard closed");
        WizardResponse::Closed
    }

    fn reset_state(&mut self) {
        self.draft.reset();
        self.step = WizardStep::FIRST;
        self.committed.clear();
        self.modals.close_all();
    }

    /// Records the current step's value; a changed value clears its
    /// dependents.
    fn commit(&mut self, step: WizardStep) -> Vec<WizardStep> {
        let value = self.draft.value_at(step);
        let revised = self
            .committed
            .get(&step)
            .is_some_and(|previous| previous != &value);

        let cleared = if revised {
            self.invalidate_dependents_of(step)
        } else {
            Vec::new()
        };
        self.committed.insert(step, value);
        cleared
    }

    fn invalidate_dependents_of(&mut self, step: WizardStep) -> Vec<WizardStep> {
        let cleared = self.draft.invalidate_dependents_of(step);
        for dependent in crate::store::dependents_of(step) {
            self.committed.remove(dependent);
        }
        cleared
    }

    /// The earliest step up to and including `through` whose draft value
    /// differs from the one last continued there.
    fn first_revised_step(&self, through: WizardStep) -> Option<WizardStep> {
        WizardStep::all()
            .iter()
            .copied()
            .take_while(|step| *step <= through)
            .find(|step| {
                self.committed
                    .get(step)
                    .is_some_and(|value| value != &self.draft.value_at(*step))
            })
    }

    /// Moves the cursor back to an earlier step revised through the store and
    /// clears what was derived from it, so it is validated again before the
    /// flow moves on.
    fn reopen_revised_step(&mut self) -> Option<WizardResponse> {
        let from = self.step;
        let revised = self.first_revised_step(from.previous()?)?;

        let cleared = self.invalidate_dependents_of(revised);
        self.committed.remove(&revised);
        self.step = revised;
        debug!(wizard_id = %self.id, from = %from, to = %revised, ?cleared, "revised step reopened");
        Some(WizardResponse::StepChanged {
            from,
            to: revised,
            cleared,
        })
    }

    /// With collapsing enabled, selects and commits a lone subcategory so the
    /// wizard can land on Product directly.
    fn collapse_subcategory(&mut self, landing: WizardStep) -> Option<Vec<WizardStep>> {
        if landing != WizardStep::Subcategory || !self.settings.collapse_single_subcategory {
            return None;
        }
        let category = self.draft.category()?;
        let sole = self
            .catalog
            .as_ref()?
            .sole_subcategory(category)?
            .subcategory_id
            .clone();

        self.draft.set_subcategory(Some(sole));
        Some(self.commit(WizardStep::Subcategory))
    }

    fn check_step(&self, draft: &SlipDraft) -> Result<(), WizardError> {
        if let Some(requirement) = validator::missing_requirement(self.step, draft) {
            return Err(self.refuse(WizardError::rejected(self.step, requirement)));
        }
        if let Some(value) = self.unoffered_value(self.step, draft) {
            return Err(self.refuse(WizardError::rejected(
                self.step,
                Requirement::OfferedOption { value },
            )));
        }
        Ok(())
    }

    /// The value held for `step` when the catalog does not offer it.
    fn unoffered_value(&self, step: WizardStep, draft: &SlipDraft) -> Option<String> {
        if !self.settings.enforce_catalog {
            return None;
        }
        let catalog = self.catalog.as_ref()?;

        match step {
            WizardStep::Lab => draft
                .lab()
                .filter(|lab| !catalog.offers_lab(lab))
                .map(ToString::to_string),
            WizardStep::Doctor => draft
                .doctor()
                .filter(|doctor| !catalog.offers_doctor(doctor, draft.lab()))
                .map(ToString::to_string),
            WizardStep::Patient => None,
            WizardStep::Category => draft
                .category()
                .filter(|category| catalog.category(category).is_none())
                .map(ToString::to_string),
            WizardStep::Subcategory => {
                let subcategory = draft.subcategory()?;
                let offered = draft
                    .category()
                    .and_then(|category| catalog.subcategory_of(category, subcategory));
                offered.is_none().then(|| subcategory.to_string())
            }
            WizardStep::Product => {
                let product = draft.product()?;
                let offered = match (draft.category(), draft.subcategory()) {
                    (Some(category), Some(subcategory)) => {
                        catalog.product_of(category, subcategory, product)
                    }
                    _ => None,
                };
                offered.is_none().then(|| product.to_string())
            }
            WizardStep::Stage => draft
                .stages()
                .iter()
                .find(|stage| !catalog.offers_stage(stage))
                .map(ToString::to_string),
        }
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), WizardError> {
        if self.open {
            Ok(())
        } else {
            Err(self.refuse(WizardError::invalid(action, "the wizard is closed")))
        }
    }

    fn ensure_no_modal(&self, action: &'static str) -> Result<(), WizardError> {
        match self.modals.visible() {
            ModalKind::None => Ok(()),
            kind => Err(self.refuse(WizardError::invalid(
                action,
                format!("the {kind} modal is open"),
            ))),
        }
    }

    fn ensure_modal(&self, action: &'static str, kind: ModalKind) -> Result<(), WizardError> {
        let state = match self.modals.visible() {
            visible if visible == kind && kind != ModalKind::None => return Ok(()),
            ModalKind::None => "no modal is open".to_string(),
            visible => format!("the {visible} modal is open"),
        };
        Err(self.refuse(WizardError::invalid(action, state)))
    }

    fn refuse(&self, err: WizardError) -> WizardError {
        warn!(wizard_id = %self.id, step = %self.step, error = %err, "wizard action refused");
        err
    }
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
