use crate::error::BankError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two sub-balances an operation targets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountKind::Savings),
            "checking" => Ok(AccountKind::Checking),
            _ => Err(BankError::InvalidAccountType),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Savings => write!(f, "savings"),
            AccountKind::Checking => write!(f, "checking"),
        }
    }
}

/// Point-in-time view of an account's two cash balances.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BalanceSnapshot {
    pub savings: Decimal,
    pub checking: Decimal,
}

/// One position in an account's portfolio: dollars currently invested in a
/// stock, not a share count.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Holding {
    pub name: String,
    pub invested: Decimal,
}

/// A quoted instrument on the market.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub name: String,
    pub price: Decimal,
}

/// What a ledger entry records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum EntryKind {
    Deposit(AccountKind),
    Withdraw(AccountKind),
    Interest,
    Buy(String),
    Sell(String),
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Deposit(kind) => write!(f, "deposit to {kind}"),
            EntryKind::Withdraw(kind) => write!(f, "withdrawal from {kind}"),
            EntryKind::Interest => write!(f, "interest"),
            EntryKind::Buy(stock) => write!(f, "buy {stock}"),
            EntryKind::Sell(stock) => write!(f, "sell {stock}"),
        }
    }
}

/// One row of an account's transaction history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LedgerEntry {
    pub id: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub timestamp: String,
}
