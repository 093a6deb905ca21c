#![allow(dead_code)]

use std::time::Duration;

use alloy::primitives::Address;

use eco_vault_flow_adapters::{
    ContractCallAdapter, FlowAdapterConfig, RecordingNotifier, WalletSessionAdapter,
};
use eco_vault_flow_core::{
    ExecutorSettings, PrivacyLevel, StepFlowController, SubmissionExecutor,
};

pub type TestFlow = StepFlowController<WalletSessionAdapter, RecordingNotifier>;

pub fn buyer_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid buyer address")
}

pub fn trade_contract_address() -> Address {
    "0x1234567890123456789012345678901234567890"
        .parse()
        .expect("valid contract address")
}

pub fn test_config() -> FlowAdapterConfig {
    FlowAdapterConfig {
        contract_address: trade_contract_address(),
        account: Some(buyer_address()),
        submission_timeout_ms: 5_000,
        ..FlowAdapterConfig::default()
    }
}

pub fn deterministic_executor() -> SubmissionExecutor<ContractCallAdapter> {
    let cfg = test_config();
    SubmissionExecutor::new(
        ContractCallAdapter::with_config(cfg.clone()),
        cfg.executor_settings(),
    )
}

pub fn executor_with(
    adapter: ContractCallAdapter,
    timeout: Duration,
) -> SubmissionExecutor<ContractCallAdapter> {
    SubmissionExecutor::new(
        adapter,
        ExecutorSettings {
            timeout,
            ..test_config().executor_settings()
        },
    )
}

pub fn open_flow() -> (TestFlow, RecordingNotifier, WalletSessionAdapter) {
    let wallet = WalletSessionAdapter::connected(buyer_address());
    let notifier = RecordingNotifier::default();
    let flow = StepFlowController::open(wallet.clone(), notifier.clone()).expect("open flow");
    (flow, notifier, wallet)
}

pub fn flow_at_confirm(quantity: &str, privacy: PrivacyLevel) -> (TestFlow, RecordingNotifier) {
    let (mut flow, notifier, _) = open_flow();
    flow.enter_quantity(quantity).expect("enter quantity");
    flow.advance().expect("amount -> privacy");
    flow.select_privacy(privacy).expect("select privacy");
    flow.advance().expect("privacy -> confirm");
    (flow, notifier)
}
