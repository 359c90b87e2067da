//! Headless state machine for the multi-step "add dental slip" flow:
//! lab → doctor → patient → category → subcategory → product → stages, then
//! an arch/teeth modal before the slip is handed off for submission.

pub mod catalog;
pub mod config;
pub mod error;
pub mod modal;
pub mod reducer;
pub mod sessions;
pub mod step;
pub mod store;
pub mod validator;
mod wizard;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;

pub use catalog::Catalog;
pub use config::{load_settings, WizardSettings};
pub use error::{SettingsError, WizardError};
pub use modal::{visible_modal, ModalKind, WizardIntent};
pub use reducer::{transition, NavigationIntent, SideEffect, Transition};
pub use sessions::WizardSessions;
pub use step::WizardStep;
pub use store::SlipDraft;
pub use validator::{can_advance, Requirement};
pub use wizard::{
    ArchSelection, SlipSubmitter, SlipWizard, StepInput, WizardId, WizardResponse,
};
