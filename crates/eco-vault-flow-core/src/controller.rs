use alloy::primitives::{Address, B256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::amount::AmountEntry;
use crate::confirmation::{ConfirmationSummary, ConfirmationView};
use crate::domain::{
    FlowStep, NoticeKind, PrivacyLevel, SubmissionId, SubmissionReceipt, SubmissionResult,
    TradeIntent,
};
use crate::error::{FlowError, SubmissionError};
use crate::executor::{SubmissionExecutor, SubmissionTicket};
use crate::ports::{ContractCallPort, NotifierPort, WalletSessionPort};
use crate::privacy::PrivacyLevelSelector;
use crate::state_machine::{flow_transition, FlowAction, StepTransition};

const WALLET_REQUIRED: &str =
    "Wallet Required: connect your wallet to start private carbon credit trading";

#[derive(Debug, Clone)]
pub enum Advance {
    Moved(FlowStep),
    Submitted(SubmissionTicket),
}

#[derive(Debug)]
struct InFlight {
    id: SubmissionId,
    cancel: CancellationToken,
}

pub struct StepFlowController<W, N>
where
    W: WalletSessionPort,
    N: NotifierPort,
{
    wallet: W,
    notifier: N,
    step: FlowStep,
    amount: AmountEntry,
    privacy: PrivacyLevelSelector,
    confirmation: ConfirmationView,
    result: SubmissionResult,
    in_flight: Option<InFlight>,
    next_submission: u64,
    last_error: Option<FlowError>,
    transitions: Vec<StepTransition>,
}

impl<W, N> StepFlowController<W, N>
where
    W: WalletSessionPort,
    N: NotifierPort,
{
    pub fn open(wallet: W, notifier: N) -> Result<Self, FlowError> {
        if !wallet.is_connected() {
            notifier.notify(NoticeKind::Warning, WALLET_REQUIRED);
            return Err(FlowError::WalletNotConnected);
        }
        Ok(Self {
            wallet,
            notifier,
            step: FlowStep::Amount,
            amount: AmountEntry::default(),
            privacy: Default::default(),
            confirmation: ConfirmationView::default(),
            result: SubmissionResult::default(),
            in_flight: None,
            next_submission: 1,
            last_error: None,
            transitions: Vec::new(),
        })
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn account(&self) -> Option<Address> {
        self.wallet.account_address()
    }

    pub fn amount(&self) -> &AmountEntry {
        &self.amount
    }

    pub fn intent(&self) -> Option<TradeIntent> {
        self.amount.intent().ok()
    }

    pub fn total_display(&self) -> String {
        self.amount.total_display()
    }

    pub fn privacy(&self) -> PrivacyLevel {
        self.privacy.selected()
    }

    pub fn privacy_selector(&self) -> &PrivacyLevelSelector {
        &self.privacy
    }

    pub fn confirmation(&self) -> &ConfirmationView {
        &self.confirmation
    }

    pub fn result(&self) -> &SubmissionResult {
        &self.result
    }

    pub fn result_token(&self) -> Option<B256> {
        self.result.result_token
    }

    pub fn last_error(&self) -> Option<&FlowError> {
        self.last_error.as_ref()
    }

    pub fn transitions(&self) -> &[StepTransition] {
        &self.transitions
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn enter_quantity(&mut self, raw: impl Into<String>) -> Result<(), FlowError> {
        self.ensure_editable()?;
        self.amount.set(raw);
        Ok(())
    }

    pub fn select_privacy(&mut self, level: PrivacyLevel) -> Result<(), FlowError> {
        self.ensure_editable()?;
        self.privacy.select(level);
        Ok(())
    }

    pub fn toggle_masking(&mut self) -> bool {
        self.confirmation.toggle()
    }

    pub fn confirmation_summary(&self) -> Option<ConfirmationSummary> {
        self.intent()
            .map(|intent| self.confirmation.summary(&intent, self.privacy()))
    }

    pub fn advance(&mut self) -> Result<Advance, FlowError> {
        match self.step {
            FlowStep::Processing => Err(FlowError::SubmissionInFlight),
            FlowStep::Confirm => self.submit().map(Advance::Submitted),
            FlowStep::Complete => {
                let transition = self.apply(FlowAction::Advance)?;
                Ok(Advance::Moved(transition.to))
            }
            FlowStep::Amount => {
                self.ensure_wallet()?;
                self.validated_intent()?;
                let transition = self.apply(FlowAction::Advance)?;
                Ok(Advance::Moved(transition.to))
            }
            FlowStep::Privacy => {
                self.ensure_wallet()?;
                let transition = self.apply(FlowAction::Advance)?;
                Ok(Advance::Moved(transition.to))
            }
        }
    }

    pub fn retreat(&mut self) -> Result<FlowStep, FlowError> {
        self.apply(FlowAction::Retreat).map(|t| t.to)
    }

    pub fn reset(&mut self) -> Result<FlowStep, FlowError> {
        let transition = self.apply(FlowAction::Reset)?;
        self.amount.clear();
        self.privacy = Default::default();
        self.confirmation = ConfirmationView::default();
        self.result = SubmissionResult::default();
        self.last_error = None;
        Ok(transition.to)
    }

    pub fn submit(&mut self) -> Result<SubmissionTicket, FlowError> {
        if self.in_flight.is_some() {
            return Err(FlowError::SubmissionInFlight);
        }
        if self.step != FlowStep::Confirm {
            return Err(FlowError::IllegalTransition {
                from: self.step,
                action: FlowAction::Advance,
            });
        }
        self.ensure_wallet()?;
        let intent = self.validated_intent()?;
        self.apply(FlowAction::Advance)?;

        let id = SubmissionId(self.next_submission);
        self.next_submission = self.next_submission.saturating_add(1);
        let ticket = SubmissionTicket::new(id, intent, self.privacy(), self.account());
        self.in_flight = Some(InFlight {
            id,
            cancel: ticket.cancel_token().clone(),
        });
        self.result = SubmissionResult::default();
        self.last_error = None;
        info!(submission = %id, privacy = %ticket.privacy(), "submission started");
        Ok(ticket)
    }

    pub fn record_progress(&mut self, id: SubmissionId, percent: u8) -> bool {
        if !self.is_current(id) || self.step != FlowStep::Processing {
            return false;
        }
        let percent = percent.min(100);
        if percent <= self.result.progress_percent {
            return false;
        }
        self.result.progress_percent = percent;
        debug!(submission = %id, percent, "submission progress");
        true
    }

    pub fn finish_submission(
        &mut self,
        id: SubmissionId,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<FlowStep, FlowError> {
        if !self.is_current(id) {
            debug!(submission = %id, "ignoring outcome of a stale submission");
            return Err(FlowError::StaleSubmission(id));
        }
        match outcome {
            Ok(receipt) => {
                let transition = self.apply(FlowAction::SubmissionSucceeded)?;
                self.in_flight = None;
                self.result.progress_percent = 100;
                self.result.result_token = Some(receipt.tx_hash);
                let hash = receipt.tx_hash.to_string();
                self.notifier.notify(
                    NoticeKind::Success,
                    &format!(
                        "Trade Executed Successfully: private transaction completed with hash {}...",
                        &hash[..hash.len().min(10)]
                    ),
                );
                info!(submission = %id, tx_hash = %receipt.tx_hash, "submission complete");
                Ok(transition.to)
            }
            Err(err) => {
                self.apply(FlowAction::SubmissionFailed)?;
                self.in_flight = None;
                self.result = SubmissionResult::default();
                warn!(submission = %id, error = %err, "submission failed");
                self.notifier.notify(
                    NoticeKind::Error,
                    &format!("Trade Failed: failed to execute private trade ({err}), please try again"),
                );
                let err = FlowError::Submission(err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn cancel_submission(&mut self) -> Result<FlowStep, FlowError> {
        let Some(in_flight) = self.in_flight.as_ref() else {
            return Err(FlowError::IllegalTransition {
                from: self.step,
                action: FlowAction::SubmissionFailed,
            });
        };
        let id = in_flight.id;
        in_flight.cancel.cancel();
        let transition = self.apply(FlowAction::SubmissionFailed)?;
        self.in_flight = None;
        self.result = SubmissionResult::default();
        self.last_error = Some(FlowError::Submission(SubmissionError::Cancelled));
        warn!(submission = %id, "submission cancelled by user");
        self.notifier.notify(
            NoticeKind::Warning,
            "Trade Cancelled: the private trade was not executed",
        );
        Ok(transition.to)
    }

    pub async fn execute_with<C>(
        &mut self,
        executor: &SubmissionExecutor<C>,
    ) -> Result<FlowStep, FlowError>
    where
        C: ContractCallPort,
    {
        let ticket = self.submit()?;
        let id = ticket.id();
        let outcome = executor
            .execute(&ticket, |percent| {
                self.record_progress(id, percent);
            })
            .await;
        self.finish_submission(id, outcome)
    }

    fn is_current(&self, id: SubmissionId) -> bool {
        self.in_flight.as_ref().is_some_and(|x| x.id == id)
    }

    fn ensure_wallet(&mut self) -> Result<(), FlowError> {
        if self.wallet.is_connected() {
            return Ok(());
        }
        self.notifier.notify(NoticeKind::Warning, WALLET_REQUIRED);
        self.last_error = Some(FlowError::WalletNotConnected);
        Err(FlowError::WalletNotConnected)
    }

    fn ensure_editable(&self) -> Result<(), FlowError> {
        if self.step.accepts_edits() {
            Ok(())
        } else {
            Err(FlowError::Locked(self.step))
        }
    }

    fn validated_intent(&mut self) -> Result<TradeIntent, FlowError> {
        match self.amount.intent() {
            Ok(intent) => Ok(intent),
            Err(err) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    "Invalid Amount: please enter a valid amount of carbon credits",
                );
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn apply(&mut self, action: FlowAction) -> Result<StepTransition, FlowError> {
        let (next, transition) = flow_transition(self.step, action)?;
        debug!(from = ?transition.from, to = ?next, ?action, "flow transition");
        self.step = next;
        self.transitions.push(transition);
        Ok(transition)
    }
}

impl<W, N> Drop for StepFlowController<W, N>
where
    W: WalletSessionPort,
    N: NotifierPort,
{
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}
