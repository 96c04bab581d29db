use std::fmt;

use serde::{Deserialize, Serialize};

use super::Cents;

/// The one account kind allowed to carry a negative balance. Services use it
/// to track net money lent out.
pub const SERVICE_KIND: &str = "service";

/// A named money container owned by a customer.
///
/// The kind is an open set of tags ("checking", "savings", ...); only
/// [`SERVICE_KIND`] accounts may go below zero. The balance is private so the
/// invariant can only be touched through [`Account::deposit`] and
/// [`Account::withdraw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAccount")]
pub struct Account {
    #[serde(rename = "type")]
    kind: String,
    balance: Cents,
}

impl Account {
    /// Open an account. Non-service kinds must start at or above zero.
    pub fn new(kind: impl Into<String>, balance: Cents) -> Result<Self, AccountError> {
        let kind = kind.into();
        if kind != SERVICE_KIND && balance < 0 {
            return Err(AccountError::InvalidBalance { kind, balance });
        }
        Ok(Self { kind, balance })
    }

    /// A zero-balance account of the special service kind.
    pub fn service() -> Self {
        Self {
            kind: SERVICE_KIND.to_string(),
            balance: 0,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn is_service(&self) -> bool {
        self.kind == SERVICE_KIND
    }

    /// Add to the balance unconditionally.
    pub fn deposit(&mut self, amount: Cents) {
        self.balance += amount;
    }

    /// Subtract from the balance. Refused when a non-service account lacks
    /// the funds; service accounts may go arbitrarily negative.
    pub fn withdraw(&mut self, amount: Cents) -> Result<(), AccountError> {
        if amount > self.balance && !self.is_service() {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawAccount {
    #[serde(rename = "type")]
    kind: String,
    balance: Cents,
}

impl TryFrom<RawAccount> for Account {
    type Error = AccountError;

    // Persisted accounts go through the same check as fresh ones.
    fn try_from(raw: RawAccount) -> Result<Self, Self::Error> {
        Account::new(raw.kind, raw.balance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    InvalidBalance { kind: String, balance: Cents },
    InsufficientFunds { balance: Cents, requested: Cents },
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::InvalidBalance { kind, balance } => write!(
                f,
                "a '{}' account cannot open with a balance of {} cents; only service accounts may be negative",
                kind, balance
            ),
            AccountError::InsufficientFunds { balance, requested } => write!(
                f,
                "insufficient funds: balance is {} cents, requested {} cents",
                balance, requested
            ),
        }
    }
}

impl std::error::Error for AccountError {}
