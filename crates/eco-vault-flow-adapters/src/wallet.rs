use std::sync::{Arc, Mutex};

use alloy::primitives::Address;

use eco_vault_flow_core::{PortError, WalletSessionPort};

#[derive(Debug, Clone, Default)]
pub struct WalletSessionAdapter {
    inner: Arc<Mutex<WalletSessionState>>,
}

#[derive(Debug, Default)]
struct WalletSessionState {
    connected: bool,
    account: Option<Address>,
}

impl WalletSessionAdapter {
    pub fn connected(account: Address) -> Self {
        let adapter = Self::default();
        let _ = adapter.connect(account);
        adapter
    }

    pub fn connect(&self, account: Address) -> Result<(), PortError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("wallet lock poisoned: {e}")))?;
        g.connected = true;
        g.account = Some(account);
        Ok(())
    }

    pub fn disconnect(&self) -> Result<(), PortError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("wallet lock poisoned: {e}")))?;
        g.connected = false;
        g.account = None;
        Ok(())
    }
}

impl WalletSessionPort for WalletSessionAdapter {
    fn is_connected(&self) -> bool {
        self.inner.lock().map(|g| g.connected).unwrap_or(false)
    }

    fn account_address(&self) -> Option<Address> {
        self.inner.lock().ok().and_then(|g| g.account)
    }
}
