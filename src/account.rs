//! Per-user financial state: two cash balances plus a portfolio of dollar
//! amounts invested per stock, with a ledger of every successful mutation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{BankError, Result};
use crate::models::{AccountKind, BalanceSnapshot, EntryKind, Holding, LedgerEntry};

#[derive(Debug, Clone)]
pub struct Account {
    id: String,
    credential_hash: String,
    savings: Decimal,
    checking: Decimal,
    interest_rate: Decimal,
    portfolio: HashMap<String, Decimal>,
    ledger: Vec<LedgerEntry>,
}

impl Account {
    /// A fresh account with zero balances. The credential arrives already
    /// hashed; this type never sees plaintext.
    pub fn new(id: &str, credential_hash: String, interest_rate: Decimal) -> Self {
        Self {
            id: id.to_string(),
            credential_hash,
            savings: Decimal::ZERO,
            checking: Decimal::ZERO,
            interest_rate,
            portfolio: HashMap::new(),
            ledger: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn credential_hash(&self) -> &str {
        &self.credential_hash
    }

    fn balance_mut(&mut self, kind: AccountKind) -> &mut Decimal {
        match kind {
            AccountKind::Savings => &mut self.savings,
            AccountKind::Checking => &mut self.checking,
        }
    }

    /// Add to the named balance.
    pub fn deposit(&mut self, amount: Decimal, kind: AccountKind) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        *self.balance_mut(kind) += amount;
        self.record(EntryKind::Deposit(kind), amount);
        Ok(())
    }

    /// Take from the named balance. Fails without side effects when the
    /// balance cannot cover the amount.
    pub fn withdraw(&mut self, amount: Decimal, kind: AccountKind) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        let balance = self.balance_mut(kind);
        if *balance < amount {
            return Err(BankError::InsufficientFunds);
        }
        *balance -= amount;
        self.record(EntryKind::Withdraw(kind), amount);
        Ok(())
    }

    /// Compound the savings balance by the account's rate. Repeated calls
    /// compound further. Returns the interest credited.
    pub fn apply_interest(&mut self) -> Decimal {
        let earned = self.savings * self.interest_rate;
        self.savings += earned;
        self.record(EntryKind::Interest, earned);
        earned
    }

    /// Move money from savings into the portfolio. Purchases are funded from
    /// savings only, never checking.
    pub fn buy_stock(&mut self, name: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        if self.savings < amount {
            return Err(BankError::InsufficientFunds);
        }
        self.savings -= amount;
        *self.portfolio.entry(name.to_string()).or_insert(Decimal::ZERO) += amount;
        self.record(EntryKind::Buy(name.to_string()), amount);
        Ok(())
    }

    /// Move invested dollars back into savings, pruning the holding when it
    /// reaches exactly zero. Proceeds always land in savings, mirroring where
    /// purchases are funded from. Fails without side effects.
    pub fn sell_stock(&mut self, name: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        let held = match self.portfolio.get(name) {
            Some(held) => *held,
            None => return Err(BankError::UnknownHolding(name.to_string())),
        };
        if held < amount {
            return Err(BankError::InsufficientHolding(name.to_string()));
        }

        let remaining = held - amount;
        if remaining.is_zero() {
            self.portfolio.remove(name);
        } else {
            self.portfolio.insert(name.to_string(), remaining);
        }
        self.savings += amount;
        self.record(EntryKind::Sell(name.to_string()), amount);
        Ok(())
    }

    pub fn balances(&self) -> BalanceSnapshot {
        BalanceSnapshot {
            savings: self.savings,
            checking: self.checking,
        }
    }

    /// All current non-zero holdings, sorted by name for stable display.
    pub fn holdings(&self) -> Vec<Holding> {
        let mut holdings: Vec<Holding> = self
            .portfolio
            .iter()
            .map(|(name, invested)| Holding {
                name: name.clone(),
                invested: *invested,
            })
            .collect();
        holdings.sort_by(|a, b| a.name.cmp(&b.name));
        holdings
    }

    /// Transaction history, oldest first.
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    fn record(&mut self, kind: EntryKind, amount: Decimal) {
        self.ledger.push(LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            amount,
            timestamp: chrono::Local::now().to_rfc3339(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> Account {
        Account::new("alice", "hash".to_string(), dec!(0.03))
    }

    #[test]
    fn deposit_and_withdraw_track_each_balance_independently() {
        let mut acct = account();

        acct.deposit(dec!(100), AccountKind::Savings).unwrap();
        acct.deposit(dec!(25.50), AccountKind::Checking).unwrap();
        acct.withdraw(dec!(40), AccountKind::Savings).unwrap();

        let balances = acct.balances();
        assert_eq!(balances.savings, dec!(60.00));
        assert_eq!(balances.checking, dec!(25.50));
    }

    #[test]
    fn withdraw_then_deposit_restores_the_balance_exactly() {
        let mut acct = account();
        acct.deposit(dec!(73.21), AccountKind::Checking).unwrap();

        acct.withdraw(dec!(12.34), AccountKind::Checking).unwrap();
        acct.deposit(dec!(12.34), AccountKind::Checking).unwrap();

        assert_eq!(acct.balances().checking, dec!(73.21));
    }

    #[test]
    fn overdraw_fails_and_changes_nothing() {
        let mut acct = account();
        acct.deposit(dec!(10), AccountKind::Savings).unwrap();

        assert!(matches!(
            acct.withdraw(dec!(10.01), AccountKind::Savings),
            Err(BankError::InsufficientFunds)
        ));
        assert_eq!(acct.balances().savings, dec!(10));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let mut acct = account();

        assert!(matches!(
            acct.deposit(dec!(0), AccountKind::Savings),
            Err(BankError::InvalidAmount)
        ));
        assert!(matches!(
            acct.withdraw(dec!(-5), AccountKind::Checking),
            Err(BankError::InvalidAmount)
        ));
        assert!(matches!(
            acct.buy_stock("Tesla", dec!(0)),
            Err(BankError::InvalidAmount)
        ));
    }

    #[test]
    fn interest_compounds_savings_only() {
        let mut acct = account();
        acct.deposit(dec!(60), AccountKind::Savings).unwrap();
        acct.deposit(dec!(50), AccountKind::Checking).unwrap();

        let earned = acct.apply_interest();

        assert_eq!(earned, dec!(1.80));
        assert_eq!(acct.balances().savings, dec!(61.80));
        assert_eq!(acct.balances().checking, dec!(50));

        // a second application compounds on the new balance
        acct.apply_interest();
        assert_eq!(acct.balances().savings, dec!(63.654));
    }

    #[test]
    fn buy_then_sell_round_trips_savings_and_prunes_the_holding() {
        let mut acct = account();
        acct.deposit(dec!(61.80), AccountKind::Savings).unwrap();

        acct.buy_stock("Tesla", dec!(50)).unwrap();
        assert_eq!(acct.balances().savings, dec!(11.80));
        assert_eq!(acct.holdings(), vec![Holding { name: "Tesla".to_string(), invested: dec!(50) }]);

        acct.sell_stock("Tesla", dec!(50)).unwrap();
        assert_eq!(acct.balances().savings, dec!(61.80));
        assert!(acct.holdings().is_empty());
    }

    #[test]
    fn partial_sell_keeps_the_remainder_invested() {
        let mut acct = account();
        acct.deposit(dec!(100), AccountKind::Savings).unwrap();
        acct.buy_stock("Nvidia", dec!(80)).unwrap();

        acct.sell_stock("Nvidia", dec!(30)).unwrap();

        assert_eq!(acct.balances().savings, dec!(50));
        assert_eq!(acct.holdings()[0].invested, dec!(50));
    }

    #[test]
    fn buying_is_funded_from_savings_never_checking() {
        let mut acct = account();
        acct.deposit(dec!(500), AccountKind::Checking).unwrap();

        assert!(matches!(
            acct.buy_stock("Apple", dec!(100)),
            Err(BankError::InsufficientFunds)
        ));
        assert_eq!(acct.balances().checking, dec!(500));
        assert!(acct.holdings().is_empty());
    }

    #[test]
    fn failed_sells_never_mutate_state() {
        let mut acct = account();
        acct.deposit(dec!(100), AccountKind::Savings).unwrap();
        acct.buy_stock("Meta", dec!(40)).unwrap();

        assert!(matches!(
            acct.sell_stock("Tesla", dec!(10)),
            Err(BankError::UnknownHolding(_))
        ));
        assert!(matches!(
            acct.sell_stock("Meta", dec!(40.01)),
            Err(BankError::InsufficientHolding(_))
        ));

        assert_eq!(acct.balances().savings, dec!(60));
        assert_eq!(acct.holdings()[0].invested, dec!(40));
    }

    #[test]
    fn ledger_records_every_successful_mutation() {
        let mut acct = account();
        acct.deposit(dec!(100), AccountKind::Savings).unwrap();
        acct.withdraw(dec!(40), AccountKind::Savings).unwrap();
        acct.apply_interest();
        acct.buy_stock("Tesla", dec!(10)).unwrap();
        acct.sell_stock("Tesla", dec!(10)).unwrap();

        // a failed operation leaves no trace
        let _ = acct.withdraw(dec!(9999), AccountKind::Savings);

        let kinds: Vec<&EntryKind> = acct.ledger().iter().map(|e| &e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &EntryKind::Deposit(AccountKind::Savings),
                &EntryKind::Withdraw(AccountKind::Savings),
                &EntryKind::Interest,
                &EntryKind::Buy("Tesla".to_string()),
                &EntryKind::Sell("Tesla".to_string()),
            ]
        );
    }
}
