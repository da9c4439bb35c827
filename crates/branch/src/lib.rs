//! `bankbranch-branch`: the branch registry, its configuration and the CLI.

pub mod bank;
pub mod cli;
pub mod config;

pub use bank::{Bank, Statement, TransactionReceipt, TransferRequest};
pub use config::{BranchConfig, ConfigError};
