#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{keccak256, Address, B256};

use eco_vault_flow_core::{
    ContractCall, ContractCallPort, ExecutorSettings, Notice, NoticeKind, NotifierPort,
    PortError, ReceiptStatus, StepFlowController, SubmissionExecutor, WalletSessionPort,
};

#[derive(Debug, Clone, Default)]
pub struct TestNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl TestNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices lock").clone()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().into_iter().map(|x| x.kind).collect()
    }
}

impl NotifierPort for TestNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().expect("notices lock").push(Notice {
            kind,
            message: message.to_owned(),
        });
    }
}

/// Wallet session shared between the test and the flow under test.
#[derive(Debug, Clone, Default)]
pub struct TestWallet {
    account: Arc<Mutex<Option<Address>>>,
}

impl TestWallet {
    pub fn connected_as(account: Address) -> Self {
        Self {
            account: Arc::new(Mutex::new(Some(account))),
        }
    }

    pub fn connect(&self, account: Address) {
        *self.account.lock().expect("wallet lock") = Some(account);
    }

    pub fn disconnect(&self) {
        *self.account.lock().expect("wallet lock") = None;
    }
}

impl WalletSessionPort for TestWallet {
    fn is_connected(&self) -> bool {
        self.account.lock().expect("wallet lock").is_some()
    }

    fn account_address(&self) -> Option<Address> {
        *self.account.lock().expect("wallet lock")
    }
}

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

pub fn connected_wallet() -> TestWallet {
    TestWallet::connected_as(buyer_address())
}

pub type TestFlow = StepFlowController<TestWallet, TestNotifier>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Succeed,
    RejectSubmit,
    Revert,
    ReceiptNeverArrives,
}

#[derive(Debug)]
pub struct ScriptedContract {
    script: Mutex<Script>,
    calls: Mutex<Vec<ContractCall>>,
    nonce: AtomicU64,
}

impl ScriptedContract {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
            nonce: AtomicU64::new(0),
        }
    }

    pub fn set_script(&self, script: Script) {
        *self.script.lock().expect("script lock") = script;
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn script(&self) -> Script {
        *self.script.lock().expect("script lock")
    }
}

impl ContractCallPort for ScriptedContract {
    async fn submit(&self, call: &ContractCall) -> Result<B256, PortError> {
        self.calls.lock().expect("calls lock").push(call.clone());
        if self.script() == Script::RejectSubmit {
            return Err(PortError::Transport("user rejected the request".to_owned()));
        }
        let n = self.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(keccak256(n.to_be_bytes()))
    }

    async fn wait_for_receipt(&self, _tx_hash: B256) -> Result<ReceiptStatus, PortError> {
        let script = self.script();
        match script {
            Script::Revert => Ok(ReceiptStatus::Reverted),
            Script::ReceiptNeverArrives => std::future::pending().await,
            Script::Succeed | Script::RejectSubmit => Ok(ReceiptStatus::Success),
        }
    }
}

pub fn executor(script: Script) -> SubmissionExecutor<ScriptedContract> {
    SubmissionExecutor::new(
        ScriptedContract::new(script),
        ExecutorSettings {
            contract_address: trade_contract_address(),
            credit_id: 1,
            timeout: Duration::from_secs(5),
        },
    )
}

pub fn open_flow() -> (TestFlow, TestNotifier) {
    let notifier = TestNotifier::default();
    let flow = StepFlowController::open(connected_wallet(), notifier.clone()).expect("open flow");
    (flow, notifier)
}

/// Drives a fresh flow to the confirm step with the given inputs.
pub fn flow_at_confirm(
    quantity: &str,
    privacy: eco_vault_flow_core::PrivacyLevel,
) -> (TestFlow, TestNotifier) {
    let (mut flow, notifier) = open_flow();
    flow.enter_quantity(quantity).expect("enter quantity");
    flow.advance().expect("amount -> privacy");
    flow.select_privacy(privacy).expect("select privacy");
    flow.advance().expect("privacy -> confirm");
    (flow, notifier)
}
