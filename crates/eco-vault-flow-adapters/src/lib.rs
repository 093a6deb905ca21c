pub mod calldata;
pub mod config;
pub mod contract;
pub mod notifier;
pub mod wallet;

pub use config::{ConfigError, FlowAdapterConfig, RuntimeProfile};
pub use contract::{ContractCallAdapter, SubmittedCall};
pub use notifier::{RecordingNotifier, TracingNotifier};
pub use wallet::WalletSessionAdapter;
