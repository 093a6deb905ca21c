use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use alloy::primitives::{keccak256, Bytes, B256};
use serde_json::Value;
use tracing::{debug, info, warn};

use eco_vault_flow_core::{ContractCall, ContractCallPort, PortError, ReceiptStatus};

use crate::calldata::encode_call;
use crate::FlowAdapterConfig;

#[derive(Debug, Clone)]
pub struct ContractCallAdapter {
    mode: ContractMode,
    state: Arc<Mutex<ContractState>>,
}

#[derive(Debug, Clone)]
enum ContractMode {
    Disabled(String),
    Deterministic,
    Rpc(RpcRuntime),
}

#[derive(Debug, Clone)]
struct RpcRuntime {
    base_url: String,
    client: reqwest::Client,
    chain_id: u64,
    poll_interval: Duration,
    max_polls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedCall {
    pub tx_hash: B256,
    pub call: ContractCall,
    pub calldata: Bytes,
}

#[derive(Debug, Default)]
struct ContractState {
    nonce: u64,
    submitted: Vec<SubmittedCall>,
    receipts: HashMap<B256, ReceiptStatus>,
    reject_next: Option<String>,
    revert_next: bool,
    receipt_delay: Option<Duration>,
}

impl Default for ContractCallAdapter {
    fn default() -> Self {
        Self::with_config(FlowAdapterConfig::default())
    }
}

impl ContractCallAdapter {
    pub fn with_config(config: FlowAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.rpc_url {
            let timeout = Duration::from_millis(config.rpc_timeout_ms);
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => ContractMode::Rpc(RpcRuntime {
                    base_url: base_url.clone(),
                    client,
                    chain_id: config.chain_id,
                    poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
                    max_polls: config.receipt_max_polls.max(1),
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ContractMode::Disabled(format!(
                            "failed to initialize contract RPC client in production profile: {e}"
                        ))
                    } else {
                        warn!(error = %e, "contract RPC client unavailable, using deterministic mode");
                        ContractMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ContractMode::Disabled(
                "contract RPC URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ContractMode::Deterministic
        };

        Self {
            mode,
            state: Arc::new(Mutex::new(ContractState::default())),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            ContractMode::Disabled(_) => "disabled",
            ContractMode::Deterministic => "deterministic",
            ContractMode::Rpc(_) => "rpc",
        }
    }

    pub fn submitted_calls(&self) -> Result<Vec<SubmittedCall>, PortError> {
        Ok(self.lock()?.submitted.clone())
    }

    pub fn debug_reject_next(&self, reason: impl Into<String>) -> Result<(), PortError> {
        self.lock()?.reject_next = Some(reason.into());
        Ok(())
    }

    pub fn debug_revert_next(&self) -> Result<(), PortError> {
        self.lock()?.revert_next = true;
        Ok(())
    }

    pub fn debug_delay_receipts(&self, delay: Duration) -> Result<(), PortError> {
        self.lock()?.receipt_delay = Some(delay);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContractState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("contract lock poisoned: {e}")))
    }

    fn record_submission(
        &self,
        tx_hash: B256,
        call: &ContractCall,
        calldata: Bytes,
    ) -> Result<(), PortError> {
        self.lock()?.submitted.push(SubmittedCall {
            tx_hash,
            call: call.clone(),
            calldata,
        });
        Ok(())
    }

    fn submit_deterministic(&self, call: &ContractCall) -> Result<B256, PortError> {
        let calldata = encode_call(call)?;
        let tx_hash = {
            let mut g = self.lock()?;
            if let Some(reason) = g.reject_next.take() {
                return Err(PortError::Policy(reason));
            }
            g.nonce = g.nonce.saturating_add(1);
            let mut seed = calldata.to_vec();
            seed.extend_from_slice(&g.nonce.to_be_bytes());
            let tx_hash = keccak256(seed);
            let status = if std::mem::take(&mut g.revert_next) {
                ReceiptStatus::Reverted
            } else {
                ReceiptStatus::Success
            };
            g.receipts.insert(tx_hash, status);
            tx_hash
        };
        self.record_submission(tx_hash, call, calldata)?;
        debug!(%tx_hash, "deterministic trade call accepted");
        Ok(tx_hash)
    }

    fn deterministic_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<(Option<Duration>, ReceiptStatus), PortError> {
        let g = self.lock()?;
        let status = g
            .receipts
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| PortError::NotFound(format!("unknown transaction: {tx_hash}")))?;
        Ok((g.receipt_delay, status))
    }

    async fn submit_rpc(&self, rpc: &RpcRuntime, call: &ContractCall) -> Result<B256, PortError> {
        let from = call
            .from
            .ok_or_else(|| PortError::Policy("NO_CONNECTED_ACCOUNT".to_owned()))?;
        let calldata = encode_call(call)?;
        let tx = serde_json::json!({
            "from": from,
            "to": call.contract_address,
            "data": calldata,
            "chainId": format!("0x{:x}", rpc.chain_id),
        });
        let result = rpc_call(rpc, "eth_sendTransaction", serde_json::json!([tx])).await?;
        let raw = result.as_str().ok_or_else(|| {
            PortError::Transport("eth_sendTransaction must return tx hash".to_owned())
        })?;
        let tx_hash: B256 = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))?;
        self.record_submission(tx_hash, call, calldata)?;
        info!(%tx_hash, "trade call sent over rpc");
        Ok(tx_hash)
    }

    async fn wait_rpc(&self, rpc: &RpcRuntime, tx_hash: B256) -> Result<ReceiptStatus, PortError> {
        for attempt in 1..=rpc.max_polls {
            let receipt =
                rpc_call(rpc, "eth_getTransactionReceipt", serde_json::json!([tx_hash])).await?;
            if !receipt.is_null() {
                return receipt_status(&receipt);
            }
            debug!(%tx_hash, attempt, "receipt not yet available");
            if attempt < rpc.max_polls {
                tokio::time::sleep(rpc.poll_interval).await;
            }
        }
        Err(PortError::Transport(format!(
            "receipt for {tx_hash} not available after {} polls",
            rpc.max_polls
        )))
    }
}

impl ContractCallPort for ContractCallAdapter {
    async fn submit(&self, call: &ContractCall) -> Result<B256, PortError> {
        match &self.mode {
            ContractMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ContractMode::Deterministic => self.submit_deterministic(call),
            ContractMode::Rpc(rpc) => self.submit_rpc(rpc, call).await,
        }
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<ReceiptStatus, PortError> {
        match &self.mode {
            ContractMode::Disabled(reason) => Err(PortError::Policy(reason.clone())),
            ContractMode::Deterministic => {
                let (delay, status) = self.deterministic_receipt(tx_hash)?;
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(status)
            }
            ContractMode::Rpc(rpc) => self.wait_rpc(rpc, tx_hash).await,
        }
    }
}

async fn rpc_call(rpc: &RpcRuntime, method: &str, params: Value) -> Result<Value, PortError> {
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });
    let response = rpc
        .client
        .post(&rpc.base_url)
        .json(&payload)
        .send()
        .await
        .map_err(|e| PortError::Transport(format!("rpc request failed: {e}")))?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| PortError::Transport(format!("rpc json decode failed: {e}")))?;
    if !status.is_success() {
        return Err(PortError::Transport(format!(
            "rpc status {}: {}",
            status, body
        )));
    }
    if let Some(err) = body.get("error") {
        return Err(PortError::Transport(format!("rpc returned error: {err}")));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| PortError::Transport("rpc missing result".to_owned()))
}

fn receipt_status(receipt: &Value) -> Result<ReceiptStatus, PortError> {
    let status = receipt
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| PortError::Transport("receipt missing status".to_owned()))?;
    match status {
        "0x1" => Ok(ReceiptStatus::Success),
        "0x0" => Ok(ReceiptStatus::Reverted),
        other => Err(PortError::Validation(format!(
            "unexpected receipt status: {other}"
        ))),
    }
}
