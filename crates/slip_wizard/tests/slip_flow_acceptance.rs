use shared::{domain::Arch, protocol::CompletedSlip};
use slip_wizard::{
    can_advance, transition, visible_modal, ArchSelection, Catalog, ModalKind, NavigationIntent,
    SideEffect, SlipDraft, SlipWizard, StepInput, WizardSettings, WizardStep,
};

fn catalog() -> Catalog {
    serde_json::from_str(
        r#"{
            "labs": [{ "lab_id": "L1", "name": "Northside Dental Lab" }],
            "doctors": [{ "doctor_id": "D1", "name": "Dr. Alvarez" }],
            "categories": [
                {
                    "category_id": "A",
                    "name": "Crowns",
                    "subcategories": [
                        { "subcategory_id": "S", "name": "Zirconia",
                          "products": [{ "product_id": "P", "name": "Full Contour" }] }
                    ]
                },
                {
                    "category_id": "B",
                    "name": "Bridges",
                    "subcategories": [
                        { "subcategory_id": "T", "name": "PFM",
                          "products": [{ "product_id": "Q", "name": "Three Unit" }] }
                    ]
                }
            ],
            "stages": [{ "stage_id": "extraction", "name": "Extraction" }]
        }"#,
    )
    .expect("catalog json")
}

#[test]
fn scenario_continue_on_empty_lab_step_is_rejected() {
    let next = transition(WizardStep::Lab, NavigationIntent::Continue, &SlipDraft::new());
    assert_eq!(next.next_step, WizardStep::Lab);
}

#[test]
fn scenario_continue_with_lab_moves_to_step_two() {
    let mut draft = SlipDraft::new();
    draft.set_lab(Some("L1".into()));
    let next = transition(WizardStep::Lab, NavigationIntent::Continue, &draft);
    assert_eq!(next.next_step.number(), 2);
}

#[test]
fn scenario_stage_continue_opens_arch_modal_and_holds_step() {
    let mut draft = SlipDraft::new();
    draft.set_lab(Some("L1".into()));
    draft.set_doctor(Some("D1".into()));
    draft.set_patient_name("Jane Doe");
    draft.set_category(Some("A".into()));
    draft.set_subcategory(Some("S".into()));
    draft.set_product(Some("P".into()));
    draft.set_stages(["extraction".into()]);

    let next = transition(WizardStep::Stage, NavigationIntent::Continue, &draft);
    assert_eq!(next.side_effect, SideEffect::OpenArchModal);
    assert_eq!(next.next_step, WizardStep::Stage);
    assert_eq!(
        visible_modal(WizardStep::Stage, NavigationIntent::Continue.into(), &draft),
        ModalKind::ArchSelection
    );
}

#[test]
fn scenario_cancel_at_patient_step_confirms_then_resets() {
    let mut wizard =
        SlipWizard::new(WizardSettings::default(), Vec::<CompletedSlip>::new()).with_catalog(catalog());
    wizard.continue_with(StepInput::Lab("L1".into())).expect("lab");
    wizard.continue_with(StepInput::Doctor("D1".into())).expect("doctor");
    assert_eq!(wizard.step().number(), 3);

    wizard.cancel().expect("cancel");
    assert_eq!(wizard.visible_modal(), ModalKind::CancelConfirmation);

    wizard.confirm_cancel().expect("confirm");
    assert_eq!(wizard.draft(), &SlipDraft::default());
    assert!(!wizard.is_open());
}

#[test]
fn failing_drafts_never_advance_on_steps_one_to_six() {
    let mut draft = SlipDraft::new();
    draft.set_stages(["extraction".into()]);
    for step in &WizardStep::all()[..6] {
        assert!(!can_advance(*step, &draft));
        assert_eq!(
            transition(*step, NavigationIntent::Continue, &draft).next_step,
            *step
        );
    }
}

#[test]
fn category_change_forward_invalidates_through_the_wizard() {
    let mut wizard =
        SlipWizard::new(WizardSettings::default(), Vec::<CompletedSlip>::new()).with_catalog(catalog());
    for input in [
        StepInput::Lab("L1".into()),
        StepInput::Doctor("D1".into()),
        StepInput::Patient("Jane Doe".to_string()),
        StepInput::Category("A".into()),
        StepInput::Subcategory("S".into()),
        StepInput::Product("P".into()),
    ] {
        wizard.continue_with(input).expect("accepted");
    }
    while wizard.step() != WizardStep::Category {
        wizard.back().expect("back");
    }

    wizard
        .continue_with(StepInput::Category("B".into()))
        .expect("category B");
    assert_eq!(wizard.draft().subcategory(), None);
    assert_eq!(wizard.draft().product(), None);
}

#[test]
fn full_flow_hands_one_slip_to_the_submitter() {
    let mut wizard =
        SlipWizard::new(WizardSettings::default(), Vec::<CompletedSlip>::new()).with_catalog(catalog());
    for input in [
        StepInput::Lab("L1".into()),
        StepInput::Doctor("D1".into()),
        StepInput::Patient("  Jane Doe ".to_string()),
        StepInput::Category("B".into()),
        StepInput::Subcategory("T".into()),
        StepInput::Product("Q".into()),
        StepInput::Stages(vec!["extraction".into()]),
    ] {
        wizard.continue_with(input).expect("accepted");
    }
    assert_eq!(wizard.visible_modal(), ModalKind::ArchSelection);

    wizard
        .confirm_arch(ArchSelection::arch(Arch::Both))
        .expect("arch confirmed");

    let slips = wizard.submitter();
    assert_eq!(slips.len(), 1);
    assert_eq!(slips[0].patient_name, "Jane Doe");
    assert_eq!(slips[0].product_id.as_str(), "Q");
    assert_eq!(slips[0].arch, Some(Arch::Both));

    let json = serde_json::to_value(&slips[0]).expect("serialize");
    assert_eq!(json["arch"], "both");
    assert_eq!(json["stage_ids"][0], "extraction");
}
