pub mod amount;
pub mod confirmation;
pub mod controller;
pub mod domain;
pub mod error;
pub mod executor;
pub mod ports;
pub mod privacy;
pub mod state_machine;

pub use amount::{compute_total, parse_quantity, to_minor_units, AmountEntry, UNIT_PRICE};
pub use confirmation::{ConfirmationSummary, ConfirmationView, MASK};
pub use controller::{Advance, StepFlowController};
pub use domain::{
    ContractCall, FlowStep, Notice, NoticeKind, PrivacyLevel, PrivacyTier, ReceiptStatus,
    SubmissionId, SubmissionReceipt, SubmissionResult, TradeIntent,
};
pub use error::{FlowError, SubmissionError, UnknownPrivacyLevel};
pub use executor::{
    stage_label, ExecutorSettings, SubmissionExecutor, SubmissionTicket,
    INITIATE_TRADE_SIGNATURE,
};
pub use ports::{ContractCallPort, NotifierPort, PortError, WalletSessionPort};
pub use privacy::PrivacyLevelSelector;
pub use state_machine::{flow_transition, FlowAction, StepTransition};
