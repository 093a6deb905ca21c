use alloy::primitives::B256;
use thiserror::Error;

use crate::domain::{FlowStep, SubmissionId};
use crate::state_machine::FlowAction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("wallet not connected")]
    WalletNotConnected,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("illegal flow transition from {from:?} via {action:?}")]
    IllegalTransition { from: FlowStep, action: FlowAction },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("trade inputs are locked in step {0:?}")]
    Locked(FlowStep),
    #[error("stale submission outcome ignored: {0}")]
    StaleSubmission(SubmissionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("contract call rejected: {0}")]
    Rejected(String),
    #[error("transaction reverted: {0}")]
    Reverted(B256),
    #[error("submission timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("submission cancelled")]
    Cancelled,
    #[error("invalid contract call: {0}")]
    InvalidCall(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown privacy level: {0}")]
pub struct UnknownPrivacyLevel(pub String);
