mod amount;
pub mod api;
mod config;
mod dto;
mod engine;
mod error;
pub mod logging;
pub mod notification;
mod stores;

pub use amount::Amount;
pub use config::{Config, ConfigError, DEFAULT_BIND_ADDR};
pub use dto::{AccountResponse, CreateAccountRequest, TransferParams};
pub use engine::Engine;
pub use error::Error;
pub use notification::{spawn_notification_worker, ChannelNotifier, LoggingNotifier, Notifier};
pub use stores::{Account, AccountPair, AccountsStore};
