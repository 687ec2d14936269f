//! ToggleBox SDK for Rust.

#![warn(missing_docs)]

mod backup;
mod builder;
mod client;
mod constants;
mod errors;
mod eval;
mod fetch;
mod model;
mod modes;
mod strategy;
mod utils;

pub use backup::BackupStore;
pub use builder::ClientBuilder;
pub use client::Client;
pub use constants::PKG_VERSION;
pub use errors::{ClientError, ErrorKind};
pub use model::toggle::{StrategyBinding, Toggle};
pub use modes::PollingMode;
pub use strategy::{Strategy, DEFAULT_STRATEGY_NAME};
