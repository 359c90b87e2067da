use super::{transition, NavigationIntent, SideEffect, Transition};
use crate::{step::WizardStep, store::SlipDraft};

fn complete_draft() -> SlipDraft {
    let mut draft = SlipDraft::new();
    draft.set_lab(Some("L1".into()));
    draft.set_doctor(Some("D1".into()));
    draft.set_patient_name("Jane Doe");
    draft.set_category(Some("crowns".into()));
    draft.set_subcategory(Some("zirconia".into()));
    draft.set_product(Some("full-contour".into()));
    draft.set_stages(["extraction".into()]);
    draft
}

#[test]
fn continue_on_incomplete_step_stays_put() {
    let draft = SlipDraft::new();
    for step in &WizardStep::all()[..6] {
        let next = transition(*step, NavigationIntent::Continue, &draft);
        assert_eq!(next.next_step, *step);
        assert_eq!(next.side_effect, SideEffect::None);
    }
}

#[test]
fn continue_with_lab_missing_is_rejected() {
    let next = transition(WizardStep::Lab, NavigationIntent::Continue, &SlipDraft::new());
    assert_eq!(next.next_step, WizardStep::Lab);
    assert!(!next.moved_from(WizardStep::Lab));
}

#[test]
fn continue_with_lab_selected_moves_to_doctor() {
    let mut draft = SlipDraft::new();
    draft.set_lab(Some("L1".into()));
    let next = transition(WizardStep::Lab, NavigationIntent::Continue, &draft);
    assert_eq!(
        next,
        Transition {
            next_step: WizardStep::Doctor,
            side_effect: SideEffect::None,
        }
    );
}

#[test]
fn continue_walks_the_whole_table_with_a_complete_draft() {
    let draft = complete_draft();
    let mut step = WizardStep::Lab;
    let mut visited = vec![step];
    loop {
        let next = transition(step, NavigationIntent::Continue, &draft);
        if next.side_effect == SideEffect::OpenArchModal {
            break;
        }
        assert!(next.moved_from(step));
        step = next.next_step;
        visited.push(step);
    }
    assert_eq!(visited, WizardStep::all());
}

#[test]
fn product_step_needs_a_product_before_stage() {
    let mut draft = complete_draft();
    draft.set_product(None);
    let next = transition(WizardStep::Product, NavigationIntent::Continue, &draft);
    assert_eq!(next.next_step, WizardStep::Product);
}

#[test]
fn stage_step_opens_arch_modal_without_moving() {
    let draft = complete_draft();
    let next = transition(WizardStep::Stage, NavigationIntent::Continue, &draft);
    assert_eq!(next.next_step, WizardStep::Stage);
    assert_eq!(next.side_effect, SideEffect::OpenArchModal);
}

#[test]
fn stage_step_without_stages_does_not_open_modal() {
    let mut draft = complete_draft();
    draft.set_stages([]);
    let next = transition(WizardStep::Stage, NavigationIntent::Continue, &draft);
    assert_eq!(next.side_effect, SideEffect::None);
}

#[test]
fn back_decrements_without_validation_or_mutation() {
    let draft = SlipDraft::new();
    let before = draft.clone();
    for step in &WizardStep::all()[1..] {
        let next = transition(*step, NavigationIntent::Back, &draft);
        assert_eq!(next.next_step.number(), step.number() - 1);
        assert_eq!(next.side_effect, SideEffect::None);
    }
    assert_eq!(draft, before);
}

#[test]
fn back_from_lab_prompts_cancel_instead_of_step_zero() {
    let next = transition(WizardStep::Lab, NavigationIntent::Back, &complete_draft());
    assert_eq!(next.next_step, WizardStep::Lab);
    assert_eq!(next.side_effect, SideEffect::PromptCancel);
}

#[test]
fn cancel_keeps_the_step_from_anywhere() {
    let draft = complete_draft();
    for step in WizardStep::all() {
        let next = transition(*step, NavigationIntent::Cancel, &draft);
        assert_eq!(next.next_step, *step);
        assert_eq!(next.side_effect, SideEffect::PromptCancel);
    }
}
