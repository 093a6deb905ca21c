use std::future::Future;

use alloy::primitives::{Address, B256};
use thiserror::Error;

use crate::domain::{ContractCall, NoticeKind, ReceiptStatus};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub trait WalletSessionPort {
    fn is_connected(&self) -> bool;
    fn account_address(&self) -> Option<Address>;
}

pub trait ContractCallPort {
    fn submit(&self, call: &ContractCall)
        -> impl Future<Output = Result<B256, PortError>> + Send;
    fn wait_for_receipt(
        &self,
        tx_hash: B256,
    ) -> impl Future<Output = Result<ReceiptStatus, PortError>> + Send;
}

pub trait NotifierPort {
    fn notify(&self, kind: NoticeKind, message: &str);
}
