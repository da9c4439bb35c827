//! Branch configuration (defaults + environment overrides).

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bankbranch_accounts::CheckingLimits;
use bankbranch_clients::DailyLimits;
use bankbranch_core::{BranchCode, Money};

pub const ENV_BRANCH_CODE: &str = "BANKBRANCH_BRANCH_CODE";
pub const ENV_DAILY_TRANSACTION_LIMIT: &str = "BANKBRANCH_DAILY_TRANSACTION_LIMIT";
pub const ENV_DAILY_TRANSFER_LIMIT: &str = "BANKBRANCH_DAILY_TRANSFER_LIMIT";
pub const ENV_WITHDRAWAL_CEILING: &str = "BANKBRANCH_WITHDRAWAL_CEILING";
pub const ENV_MAX_WITHDRAWALS: &str = "BANKBRANCH_MAX_WITHDRAWALS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings applied to every client and checking account the branch creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchConfig {
    pub branch_code: BranchCode,
    pub daily_transaction_limit: u32,
    pub daily_transfer_limit: u32,
    pub withdrawal_ceiling: Money,
    pub max_withdrawals: u32,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            branch_code: BranchCode::default(),
            daily_transaction_limit: 10,
            daily_transfer_limit: 5,
            withdrawal_ceiling: Money::units(500),
            max_withdrawals: 50,
        }
    }
}

impl BranchConfig {
    /// Defaults overridden by `BANKBRANCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`BranchConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = read(&lookup, ENV_BRANCH_CODE) {
            config.branch_code =
                BranchCode::new(raw.trim()).map_err(|e| invalid(ENV_BRANCH_CODE, &raw, e))?;
        }
        if let Some(v) = parse(&lookup, ENV_DAILY_TRANSACTION_LIMIT)? {
            config.daily_transaction_limit = v;
        }
        if let Some(v) = parse(&lookup, ENV_DAILY_TRANSFER_LIMIT)? {
            config.daily_transfer_limit = v;
        }
        if let Some(v) = parse::<Money, _>(&lookup, ENV_WITHDRAWAL_CEILING)? {
            if !v.is_positive() {
                return Err(invalid(ENV_WITHDRAWAL_CEILING, &v.to_string(), "must be positive"));
            }
            config.withdrawal_ceiling = v;
        }
        if let Some(v) = parse(&lookup, ENV_MAX_WITHDRAWALS)? {
            config.max_withdrawals = v;
        }

        Ok(config)
    }

    pub fn daily_limits(&self) -> DailyLimits {
        DailyLimits {
            transactions: self.daily_transaction_limit,
            transfers: self.daily_transfer_limit,
        }
    }

    pub fn checking_limits(&self) -> CheckingLimits {
        CheckingLimits {
            withdrawal_ceiling: self.withdrawal_ceiling,
            max_withdrawals: self.max_withdrawals,
        }
    }
}

fn read<F>(lookup: &F, var: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var);
    if value.is_none() {
        tracing::debug!(var, "not set; using default");
    }
    value
}

fn parse<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    read(lookup, var)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| invalid(var, &raw, e)))
        .transpose()
}

fn invalid(var: &'static str, value: &str, reason: impl core::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_the_branch_rules() {
        let config = BranchConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BranchConfig::default());
        assert_eq!(config.branch_code.as_str(), "0001");
        assert_eq!(config.daily_limits(), DailyLimits::default());
        assert_eq!(config.checking_limits().withdrawal_ceiling, Money::units(500));
        assert_eq!(config.checking_limits().max_withdrawals, 50);
    }

    #[test]
    fn overrides_are_applied() {
        let config = BranchConfig::from_lookup(lookup(&[
            (ENV_BRANCH_CODE, "0042"),
            (ENV_DAILY_TRANSACTION_LIMIT, "3"),
            (ENV_DAILY_TRANSFER_LIMIT, " 1 "),
            (ENV_WITHDRAWAL_CEILING, "250,50"),
            (ENV_MAX_WITHDRAWALS, "3"),
        ]))
        .unwrap();

        assert_eq!(config.branch_code.as_str(), "0042");
        assert_eq!(config.daily_transaction_limit, 3);
        assert_eq!(config.daily_transfer_limit, 1);
        assert_eq!(config.withdrawal_ceiling, Money::from_cents(25_050));
        assert_eq!(config.max_withdrawals, 3);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = BranchConfig::from_lookup(lookup(&[(ENV_DAILY_TRANSACTION_LIMIT, "ten")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: ENV_DAILY_TRANSACTION_LIMIT, .. }
        ));

        assert!(BranchConfig::from_lookup(lookup(&[(ENV_WITHDRAWAL_CEILING, "0")])).is_err());
        assert!(BranchConfig::from_lookup(lookup(&[(ENV_BRANCH_CODE, "abc")])).is_err());
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(BranchConfig::default()).unwrap();
        assert_eq!(json["branch_code"], "0001");
        assert_eq!(json["withdrawal_ceiling"], 50_000);
    }
}
