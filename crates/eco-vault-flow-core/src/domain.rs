use std::fmt;

use alloy::primitives::{keccak256, Address, B256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::UNIT_PRICE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Amount,
    Privacy,
    Confirm,
    Processing,
    Complete,
}

impl FlowStep {
    pub const ALL: [FlowStep; 5] = [
        FlowStep::Amount,
        FlowStep::Privacy,
        FlowStep::Confirm,
        FlowStep::Processing,
        FlowStep::Complete,
    ];

    pub fn index(self) -> usize {
        match self {
            FlowStep::Amount => 0,
            FlowStep::Privacy => 1,
            FlowStep::Confirm => 2,
            FlowStep::Processing => 3,
            FlowStep::Complete => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FlowStep::Amount => "Amount",
            FlowStep::Privacy => "Privacy",
            FlowStep::Confirm => "Confirm",
            FlowStep::Processing => "Processing",
            FlowStep::Complete => "Complete",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FlowStep::Amount => "Select carbon credits",
            FlowStep::Privacy => "Configure anonymity",
            FlowStep::Confirm => "Review transaction",
            FlowStep::Processing => "Executing trade",
            FlowStep::Complete => "Trade successful",
        }
    }

    pub fn accepts_edits(self) -> bool {
        matches!(
            self,
            FlowStep::Amount | FlowStep::Privacy | FlowStep::Confirm
        )
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    Standard,
    #[default]
    Enhanced,
    Maximum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyTier {
    pub level: PrivacyLevel,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

impl TradeIntent {
    pub fn unit_price() -> Decimal {
        UNIT_PRICE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub progress_percent: u8,
    pub result_token: Option<B256>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub tx_hash: B256,
    pub quantity: Decimal,
    pub total: Decimal,
    pub privacy: PrivacyLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub contract_address: Address,
    pub function_signature: String,
    pub args: Vec<U256>,
    pub from: Option<Address>,
}

impl ContractCall {
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.function_signature.as_bytes());
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&hash.as_slice()[0..4]);
        selector
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}
