//! Bridge between the command line and the flow crates.
//! The shell only talks to the controller and the executor through this type.

use std::future::Future;

use alloy::primitives::{address, Address, B256};
use eyre::{eyre, WrapErr};
use tracing::{info, warn};

use eco_vault_flow_adapters::{
    ContractCallAdapter, FlowAdapterConfig, TracingNotifier, WalletSessionAdapter,
};
use eco_vault_flow_core::{
    ConfirmationSummary, PrivacyLevel, StepFlowController, SubmissionError, SubmissionExecutor,
};

/// Session account used in development when `ECO_VAULT_ACCOUNT` is unset.
pub const DEMO_ACCOUNT: Address = address!("1000000000000000000000000000000000000001");

type ShellFlow = StepFlowController<WalletSessionAdapter, TracingNotifier>;

pub struct BuyShell {
    flow: ShellFlow,
    executor: SubmissionExecutor<ContractCallAdapter>,
}

impl BuyShell {
    pub fn open(config: &FlowAdapterConfig) -> eyre::Result<Self> {
        let wallet = WalletSessionAdapter::default();
        match config.account {
            Some(account) => wallet.connect(account)?,
            None if !config.strict_runtime_required() => wallet.connect(DEMO_ACCOUNT)?,
            None => {}
        }

        let flow = StepFlowController::open(wallet, TracingNotifier)
            .wrap_err("connect a wallet (ECO_VAULT_ACCOUNT) to trade")?;
        let contract = ContractCallAdapter::with_config(config.clone());
        info!(
            mode = contract.mode_name(),
            contract = %config.contract_address,
            chain_id = config.chain_id,
            "trade contract ready"
        );

        Ok(Self {
            flow,
            executor: SubmissionExecutor::new(contract, config.executor_settings()),
        })
    }

    /// Walks Amount → Privacy → Confirm and returns what the buyer confirms.
    pub fn prepare(
        &mut self,
        quantity: &str,
        privacy: PrivacyLevel,
        reveal: bool,
    ) -> eyre::Result<ConfirmationSummary> {
        self.flow.enter_quantity(quantity)?;
        self.flow.advance()?;
        self.flow.select_privacy(privacy)?;
        self.flow.advance()?;
        if reveal {
            self.flow.toggle_masking();
        }
        self.flow
            .confirmation_summary()
            .ok_or_else(|| eyre!("no valid trade to confirm"))
    }

    /// Submits the confirmed trade. Ctrl-C cancels it and returns to Confirm.
    pub async fn execute<F>(&mut self, on_progress: F) -> eyre::Result<B256>
    where
        F: FnMut(u8),
    {
        // SIGINT stays captured for the rest of the process once registered;
        // the shell exits right after a single trade.
        let interrupt = async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };
        self.execute_until(interrupt, on_progress).await
    }

    async fn execute_until<I, F>(&mut self, interrupt: I, mut on_progress: F) -> eyre::Result<B256>
    where
        I: Future<Output = ()>,
        F: FnMut(u8),
    {
        let ticket = self.flow.submit()?;
        let id = ticket.id();
        let cancel = ticket.cancel_token().clone();

        let outcome = {
            let flow = &mut self.flow;
            let run = self.executor.execute(&ticket, |percent| {
                if flow.record_progress(id, percent) {
                    on_progress(percent);
                }
            });
            tokio::pin!(run);
            tokio::pin!(interrupt);
            tokio::select! {
                biased;
                _ = &mut interrupt => {
                    cancel.cancel();
                    (&mut run).await
                }
                outcome = &mut run => outcome,
            }
        };

        if matches!(outcome, Err(SubmissionError::Cancelled)) {
            warn!(submission = %id, "interrupted");
            self.flow.cancel_submission()?;
            return Err(eyre!("trade cancelled"));
        }
        self.flow.finish_submission(id, outcome)?;
        self.flow
            .result_token()
            .ok_or_else(|| eyre!("trade completed without a transaction hash"))
    }

    pub fn flow(&self) -> &ShellFlow {
        &self.flow
    }
}
