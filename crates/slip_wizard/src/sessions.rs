//! Independently owned wizards, one per open "add slip" flow.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    catalog::Catalog,
    config::WizardSettings,
    wizard::{SlipSubmitter, SlipWizard, WizardId},
};

pub struct WizardSessions<S> {
    settings: WizardSettings,
    wizards: HashMap<WizardId, SlipWizard<S>>,
}

impl<S: SlipSubmitter> WizardSessions<S> {
    pub fn new(settings: WizardSettings) -> Self {
        Self {
            settings,
            wizards: HashMap::new(),
        }
    }

    /// Opens a new wizard with its own draft, step cursor and submitter.
    pub fn open(&mut self, catalog: Option<Catalog>, submitter: S) -> WizardId {
        let mut wizard = SlipWizard::new(self.settings.clone(), submitter);
        wizard.set_catalog(catalog);
        let id = wizard.id();
        self.wizards.insert(id, wizard);
        debug!(wizard_id = %id, open = self.wizards.len(), "wizard session added");
        id
    }

    pub fn get(&self, id: WizardId) -> Option<&SlipWizard<S>> {
        self.wizards.get(&id)
    }

    pub fn get_mut(&mut self, id: WizardId) -> Option<&mut SlipWizard<S>> {
        self.wizards.get_mut(&id)
    }

    pub fn remove(&mut self, id: WizardId) -> Option<SlipWizard<S>> {
        self.wizards.remove(&id)
    }

    /// Drops wizards that were closed by cancel or submission.
    pub fn prune_closed(&mut self) -> usize {
        let before = self.wizards.len();
        self.wizards.retain(|_, wizard| wizard.is_open());
        let pruned = before - self.wizards.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.wizards.len(), "closed wizard sessions pruned");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.wizards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wizards.is_empty()
    }
}
