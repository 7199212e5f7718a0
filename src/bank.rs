//! The account registry and session state machine. Commands from the shell
//! route through here; nothing reaches an [`Account`] without an active
//! session.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::account::Account;
use crate::auth;
use crate::config::Config;
use crate::error::{BankError, Result};
use crate::models::{AccountKind, BalanceSnapshot, Holding, LedgerEntry};

/// A signed-in session. Carries the account id rather than a reference into
/// the registry, so a session can never dangle if accounts ever become
/// removable.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    account_id: String,
    started_at: String,
}

impl Session {
    fn open(account_id: &str) -> Self {
        Self {
            token: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            started_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }
}

/// Registry of accounts keyed by id, owning every [`Account`], plus at most
/// one active session at a time.
pub struct BankDirectory {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
    interest_rate: Decimal,
}

impl BankDirectory {
    pub fn new(config: &Config) -> Self {
        Self {
            accounts: HashMap::new(),
            session: None,
            interest_rate: config.interest_rate,
        }
    }

    /// Register a new account. The secret is hashed before it is stored;
    /// the session state is left untouched.
    pub fn create_account(&mut self, id: &str, secret: &str) -> Result<()> {
        if self.accounts.contains_key(id) {
            return Err(BankError::DuplicateId);
        }
        let hash = auth::hash_secret(secret)?;
        self.accounts
            .insert(id.to_string(), Account::new(id, hash, self.interest_rate));
        tracing::info!("account created for {id}");
        Ok(())
    }

    /// Authenticate and open a session, evicting any prior one. Unknown ids
    /// and wrong secrets fail identically.
    pub fn sign_in(&mut self, id: &str, secret: &str) -> Result<()> {
        let account = self
            .accounts
            .get(id)
            .ok_or(BankError::AuthenticationFailed)?;
        if !auth::verify_secret(secret, account.credential_hash()) {
            return Err(BankError::AuthenticationFailed);
        }

        if let Some(prior) = &self.session {
            tracing::info!("evicting session for {}", prior.account_id());
        }
        self.session = Some(Session::open(id));
        tracing::info!("{id} signed in");
        Ok(())
    }

    /// Close the active session.
    pub fn sign_out(&mut self) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                tracing::info!("{} signed out", session.account_id());
                Ok(())
            }
            None => Err(BankError::NoActiveSession),
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn current(&self) -> Result<&Account> {
        let session = self.session.as_ref().ok_or(BankError::NotAuthenticated)?;
        self.accounts
            .get(session.account_id())
            .ok_or(BankError::NotAuthenticated)
    }

    fn current_mut(&mut self) -> Result<&mut Account> {
        let session = self.session.as_ref().ok_or(BankError::NotAuthenticated)?;
        let id = session.account_id().to_string();
        self.accounts
            .get_mut(&id)
            .ok_or(BankError::NotAuthenticated)
    }

    pub fn deposit(&mut self, amount: Decimal, kind: AccountKind) -> Result<()> {
        self.current_mut()?.deposit(amount, kind)
    }

    pub fn withdraw(&mut self, amount: Decimal, kind: AccountKind) -> Result<()> {
        self.current_mut()?.withdraw(amount, kind)
    }

    pub fn apply_interest(&mut self) -> Result<()> {
        let earned = self.current_mut()?.apply_interest();
        tracing::debug!("interest credited: {earned}");
        Ok(())
    }

    pub fn balances(&self) -> Result<BalanceSnapshot> {
        Ok(self.current()?.balances())
    }

    pub fn buy_stock(&mut self, name: &str, amount: Decimal) -> Result<()> {
        self.current_mut()?.buy_stock(name, amount)
    }

    pub fn sell_stock(&mut self, name: &str, amount: Decimal) -> Result<()> {
        self.current_mut()?.sell_stock(name, amount)
    }

    pub fn portfolio(&self) -> Result<Vec<Holding>> {
        Ok(self.current()?.holdings())
    }

    pub fn transactions(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.current()?.ledger().to_vec())
    }
}
