use std::time::Duration;

use alloy::primitives::{Address, U256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::amount::to_minor_units;
use crate::domain::{
    ContractCall, PrivacyLevel, ReceiptStatus, SubmissionId, SubmissionReceipt, TradeIntent,
};
use crate::error::SubmissionError;
use crate::ports::ContractCallPort;

pub const INITIATE_TRADE_SIGNATURE: &str = "initiateTrade(uint256,uint256,uint256)";

pub const PROGRESS_PROVING: u8 = 20;
pub const PROGRESS_ENCRYPTED: u8 = 40;
pub const PROGRESS_PREPARED: u8 = 60;
pub const PROGRESS_BROADCAST: u8 = 80;
pub const PROGRESS_CONFIRMED: u8 = 100;

pub fn stage_label(percent: u8) -> &'static str {
    match percent {
        0..=29 => "Generating privacy proofs...",
        30..=59 => "Encrypting transaction data...",
        60..=89 => "Broadcasting to network...",
        _ => "Finalizing transaction...",
    }
}

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub contract_address: Address,
    pub credit_id: u64,
    pub timeout: Duration,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            contract_address: Address::ZERO,
            credit_id: 1,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    id: SubmissionId,
    intent: TradeIntent,
    privacy: PrivacyLevel,
    account: Option<Address>,
    cancel: CancellationToken,
}

impl SubmissionTicket {
    pub fn new(
        id: SubmissionId,
        intent: TradeIntent,
        privacy: PrivacyLevel,
        account: Option<Address>,
    ) -> Self {
        Self {
            id,
            intent,
            privacy,
            account,
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn intent(&self) -> &TradeIntent {
        &self.intent
    }

    pub fn privacy(&self) -> PrivacyLevel {
        self.privacy
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

pub struct SubmissionExecutor<C>
where
    C: ContractCallPort,
{
    contract: C,
    settings: ExecutorSettings,
}

impl<C> SubmissionExecutor<C>
where
    C: ContractCallPort,
{
    pub fn new(contract: C, settings: ExecutorSettings) -> Self {
        Self { contract, settings }
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    pub fn build_call(&self, ticket: &SubmissionTicket) -> Result<ContractCall, SubmissionError> {
        let intent = ticket.intent();
        let amount = to_minor_units(intent.quantity).ok_or_else(|| {
            SubmissionError::InvalidCall(format!("quantity not representable: {}", intent.quantity))
        })?;
        let price = to_minor_units(intent.total).ok_or_else(|| {
            SubmissionError::InvalidCall(format!("total not representable: {}", intent.total))
        })?;
        Ok(ContractCall {
            contract_address: self.settings.contract_address,
            function_signature: INITIATE_TRADE_SIGNATURE.to_owned(),
            args: vec![
                U256::from(self.settings.credit_id),
                U256::from(amount),
                U256::from(price),
            ],
            from: ticket.account(),
        })
    }

    pub async fn execute<F>(
        &self,
        ticket: &SubmissionTicket,
        mut on_progress: F,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        F: FnMut(u8),
    {
        let after_ms = u64::try_from(self.settings.timeout.as_millis()).unwrap_or(u64::MAX);
        let work = self.run(ticket, &mut on_progress);
        tokio::select! {
            biased;
            _ = ticket.cancel_token().cancelled() => {
                warn!(submission = %ticket.id(), "submission cancelled");
                Err(SubmissionError::Cancelled)
            }
            res = tokio::time::timeout(self.settings.timeout, work) => match res {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(submission = %ticket.id(), after_ms, "submission timed out");
                    Err(SubmissionError::Timeout { after_ms })
                }
            },
        }
    }

    async fn run<F>(
        &self,
        ticket: &SubmissionTicket,
        on_progress: &mut F,
    ) -> Result<SubmissionReceipt, SubmissionError>
    where
        F: FnMut(u8),
    {
        on_progress(PROGRESS_PROVING);
        let call = self.build_call(ticket)?;
        on_progress(PROGRESS_ENCRYPTED);
        debug!(
            submission = %ticket.id(),
            contract = %call.contract_address,
            args = ?call.args,
            "prepared trade call"
        );
        on_progress(PROGRESS_PREPARED);

        let tx_hash = self
            .contract
            .submit(&call)
            .await
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        on_progress(PROGRESS_BROADCAST);
        info!(submission = %ticket.id(), %tx_hash, "trade call broadcast");

        let status = self
            .contract
            .wait_for_receipt(tx_hash)
            .await
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        if status == ReceiptStatus::Reverted {
            return Err(SubmissionError::Reverted(tx_hash));
        }
        on_progress(PROGRESS_CONFIRMED);

        Ok(SubmissionReceipt {
            tx_hash,
            quantity: ticket.intent().quantity,
            total: ticket.intent().total,
            privacy: ticket.privacy(),
        })
    }
}
