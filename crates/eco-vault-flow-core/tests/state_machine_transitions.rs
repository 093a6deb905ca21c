use eco_vault_flow_core::{flow_transition, FlowAction, FlowError, FlowStep};

const ACTIONS: [FlowAction; 5] = [
    FlowAction::Advance,
    FlowAction::Retreat,
    FlowAction::SubmissionSucceeded,
    FlowAction::SubmissionFailed,
    FlowAction::Reset,
];

#[test]
fn happy_path_walks_every_step_in_order() {
    let (s1, _) = flow_transition(FlowStep::Amount, FlowAction::Advance).expect("amount");
    assert_eq!(s1, FlowStep::Privacy);
    let (s2, _) = flow_transition(s1, FlowAction::Advance).expect("privacy");
    assert_eq!(s2, FlowStep::Confirm);
    let (s3, _) = flow_transition(s2, FlowAction::Advance).expect("confirm");
    assert_eq!(s3, FlowStep::Processing);
    let (s4, t4) = flow_transition(s3, FlowAction::SubmissionSucceeded).expect("processing");
    assert_eq!(s4, FlowStep::Complete);
    assert_eq!(t4.from, FlowStep::Processing);
    assert_eq!(t4.to, FlowStep::Complete);
    let (s5, _) = flow_transition(s4, FlowAction::Reset).expect("reset");
    assert_eq!(s5, FlowStep::Amount);
}

#[test]
fn failed_submission_returns_to_confirm() {
    let (next, _) =
        flow_transition(FlowStep::Processing, FlowAction::SubmissionFailed).expect("failure");
    assert_eq!(next, FlowStep::Confirm);
}

#[test]
fn retreat_moves_exactly_one_step_back() {
    assert_eq!(
        flow_transition(FlowStep::Confirm, FlowAction::Retreat)
            .expect("confirm back")
            .0,
        FlowStep::Privacy
    );
    assert_eq!(
        flow_transition(FlowStep::Privacy, FlowAction::Retreat)
            .expect("privacy back")
            .0,
        FlowStep::Amount
    );
}

#[test]
fn retreat_is_rejected_from_amount_processing_and_complete() {
    for step in [FlowStep::Amount, FlowStep::Processing, FlowStep::Complete] {
        let err = flow_transition(step, FlowAction::Retreat).expect_err("must fail");
        assert_eq!(
            err,
            FlowError::IllegalTransition {
                from: step,
                action: FlowAction::Retreat
            }
        );
    }
}

#[test]
fn only_defined_edges_are_accepted() {
    let defined = [
        (FlowStep::Amount, FlowAction::Advance, FlowStep::Privacy),
        (FlowStep::Privacy, FlowAction::Advance, FlowStep::Confirm),
        (FlowStep::Confirm, FlowAction::Advance, FlowStep::Processing),
        (
            FlowStep::Processing,
            FlowAction::SubmissionSucceeded,
            FlowStep::Complete,
        ),
        (
            FlowStep::Processing,
            FlowAction::SubmissionFailed,
            FlowStep::Confirm,
        ),
        (FlowStep::Complete, FlowAction::Reset, FlowStep::Amount),
        (FlowStep::Privacy, FlowAction::Retreat, FlowStep::Amount),
        (FlowStep::Confirm, FlowAction::Retreat, FlowStep::Privacy),
    ];

    let mut accepted = 0;
    for step in FlowStep::ALL {
        for action in ACTIONS {
            let expected = defined
                .iter()
                .find(|(from, act, _)| *from == step && *act == action)
                .map(|(_, _, to)| *to);
            match (flow_transition(step, action), expected) {
                (Ok((next, _)), Some(to)) => {
                    assert_eq!(next, to);
                    accepted += 1;
                }
                (Err(err), None) => {
                    assert!(err.to_string().contains("illegal flow transition"));
                }
                (got, want) => panic!("{step:?} via {action:?}: got {got:?}, want {want:?}"),
            }
        }
    }
    assert_eq!(accepted, defined.len());
}

#[test]
fn complete_is_terminal_except_for_reset() {
    for action in ACTIONS {
        let result = flow_transition(FlowStep::Complete, action);
        assert_eq!(result.is_ok(), action == FlowAction::Reset);
    }
}
