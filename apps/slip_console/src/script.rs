//! Scripted wizard sessions: a JSON array of actions replayed in order.

use std::collections::BTreeSet;

use serde::Deserialize;
use shared::{
    domain::{Arch, ToothNumber},
    error::ApiError,
};
use slip_wizard::{
    ArchSelection, SlipSubmitter, SlipWizard, StepInput, WizardError, WizardResponse,
};
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Open,
    Continue {
        input: StepInput,
    },
    Advance,
    Back,
    Cancel,
    ConfirmCancel,
    DismissCancel,
    ConfirmArch {
        #[serde(default)]
        arch: Option<Arch>,
        #[serde(default)]
        teeth: BTreeSet<ToothNumber>,
    },
    DismissArch,
    Submit,
    OverrideSubmitWarning,
    DismissSubmitWarning,
}

impl ScriptAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Continue { .. } => "continue",
            Self::Advance => "advance",
            Self::Back => "back",
            Self::Cancel => "cancel",
            Self::ConfirmCancel => "confirm_cancel",
            Self::DismissCancel => "dismiss_cancel",
            Self::ConfirmArch { .. } => "confirm_arch",
            Self::DismissArch => "dismiss_arch",
            Self::Submit => "submit",
            Self::OverrideSubmitWarning => "override_submit_warning",
            Self::DismissSubmitWarning => "dismiss_submit_warning",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: Vec<ApiError>,
}

pub fn parse_script(raw: &str) -> serde_json::Result<Vec<ScriptAction>> {
    serde_json::from_str(raw)
}

/// `Ok(None)` for actions that succeed without a wizard response.
pub fn apply<S: SlipSubmitter>(
    wizard: &mut SlipWizard<S>,
    action: ScriptAction,
) -> Result<Option<WizardResponse>, WizardError> {
    let response = match action {
        ScriptAction::Open => {
            wizard.open_wizard()?;
            return Ok(None);
        }
        ScriptAction::Continue { input } => wizard.continue_with(input)?,
        ScriptAction::Advance => wizard.advance()?,
        ScriptAction::Back => wizard.back()?,
        ScriptAction::Cancel => wizard.cancel()?,
        ScriptAction::ConfirmCancel => wizard.confirm_cancel()?,
        ScriptAction::DismissCancel => wizard.dismiss_cancel()?,
        ScriptAction::ConfirmArch { arch, teeth } => {
            wizard.confirm_arch(ArchSelection { arch, teeth })?
        }
        ScriptAction::DismissArch => wizard.dismiss_arch()?,
        ScriptAction::Submit => wizard.submit()?,
        ScriptAction::OverrideSubmitWarning => wizard.override_submit_warning()?,
        ScriptAction::DismissSubmitWarning => wizard.dismiss_submit_warning()?,
    };
    Ok(Some(response))
}

/// Applies every action; rejected ones are recorded and skipped.
pub fn run_script<S: SlipSubmitter>(
    wizard: &mut SlipWizard<S>,
    actions: Vec<ScriptAction>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        match apply(wizard, action) {
            Ok(response) => {
                summary.applied += 1;
                info!(index, action = name, ?response, step = %wizard.step(), "action applied");
            }
            Err(err) => {
                warn!(index, action = name, error = %err, "action rejected");
                summary.rejected.push(ApiError::from(&err));
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::{parse_script, run_script, ScriptAction};
    use shared::{error::ErrorCode, protocol::CompletedSlip};
    use slip_wizard::{Catalog, ModalKind, SlipWizard, WizardSettings, WizardStep};

    fn catalog() -> Catalog {
        serde_json::from_str(include_str!("../demos/catalog.json")).expect("demo catalog")
    }

    #[test]
    fn demo_script_submits_one_slip() {
        let actions = parse_script(include_str!("../demos/session.json")).expect("demo script");
        let mut wizard = SlipWizard::new(WizardSettings::default(), Vec::<CompletedSlip>::new())
            .with_catalog(catalog());

        let summary = run_script(&mut wizard, actions);

        assert_eq!(wizard.submitter().len(), 1);
        assert_eq!(summary.rejected.len(), 1);
        assert!(matches!(summary.rejected[0].code, ErrorCode::Validation));
        assert!(!wizard.is_open());
    }

    #[test]
    fn parses_tagged_actions() {
        let actions = parse_script(
            r#"[
                { "action": "continue", "input": { "lab": "L1" } },
                { "action": "confirm_arch", "arch": "upper", "teeth": [3, 4] },
                { "action": "override_submit_warning" }
            ]"#,
        )
        .expect("script");

        assert!(matches!(actions[0], ScriptAction::Continue { .. }));
        match &actions[1] {
            ScriptAction::ConfirmArch { arch, teeth } => {
                assert!(arch.is_some());
                assert_eq!(teeth.len(), 2);
            }
            other => panic!("unexpected action {other:?}"),
        }
        assert_eq!(actions[2].name(), "override_submit_warning");
    }

    #[test]
    fn out_of_range_tooth_fails_to_parse() {
        assert!(parse_script(r#"[{ "action": "confirm_arch", "teeth": [33] }]"#).is_err());
    }

    #[test]
    fn rejected_actions_do_not_stop_the_run() {
        let actions = parse_script(
            r#"[
                { "action": "advance" },
                { "action": "continue", "input": { "lab": "L1" } },
                { "action": "submit" },
                { "action": "back" },
                { "action": "cancel" }
            ]"#,
        )
        .expect("script");
        let mut wizard = SlipWizard::new(WizardSettings::default(), Vec::<CompletedSlip>::new())
            .with_catalog(catalog());

        let summary = run_script(&mut wizard, actions);

        assert_eq!(summary.applied, 3);
        assert_eq!(summary.rejected.len(), 2);
        assert!(matches!(summary.rejected[0].code, ErrorCode::Validation));
        assert!(matches!(summary.rejected[1].code, ErrorCode::InvalidTransition));
        assert_eq!(wizard.visible_modal(), ModalKind::CancelConfirmation);
        assert_eq!(wizard.step(), WizardStep::Lab);
    }
}
