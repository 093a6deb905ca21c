use serde::{Deserialize, Serialize};

use crate::domain::FlowStep;
use crate::error::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowAction {
    Advance,
    Retreat,
    SubmissionSucceeded,
    SubmissionFailed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTransition {
    pub from: FlowStep,
    pub to: FlowStep,
    pub action: FlowAction,
}

// Graph only; amount and in-flight checks live in the controller.
pub fn flow_transition(
    current: FlowStep,
    action: FlowAction,
) -> Result<(FlowStep, StepTransition), FlowError> {
    use FlowAction::*;
    use FlowStep::*;

    let next = match (current, action) {
        (Amount, Advance) => Privacy,
        (Privacy, Advance) => Confirm,
        (Confirm, Advance) => Processing,
        (Processing, SubmissionSucceeded) => Complete,
        (Processing, SubmissionFailed) => Confirm,
        (Complete, Reset) => Amount,
        (Privacy, Retreat) => Amount,
        (Confirm, Retreat) => Privacy,
        (from, action) => return Err(FlowError::IllegalTransition { from, action }),
    };
    Ok((
        next,
        StepTransition {
            from: current,
            to: next,
            action,
        },
    ))
}
