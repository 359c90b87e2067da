use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

use crate::{step::WizardStep, validator::Requirement};

/// A wizard action that was turned away. The wizard is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot continue from step {step}: {requirement}")]
    ValidationRejected {
        step: WizardStep,
        requirement: Requirement,
    },
    #[error("{action} is not available while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },
}

impl WizardError {
    pub(crate) fn rejected(step: WizardStep, requirement: Requirement) -> Self {
        Self::ValidationRejected { step, requirement }
    }

    pub(crate) fn invalid(action: &'static str, state: impl Into<String>) -> Self {
        Self::InvalidTransition {
            action,
            state: state.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationRejected { .. })
    }
}

impl From<&WizardError> for ApiError {
    fn from(value: &WizardError) -> Self {
        let code = match value {
            WizardError::ValidationRejected { .. } => ErrorCode::Validation,
            WizardError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
        };
        ApiError::new(code, value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
