use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Account, AccountError, Cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Freshly requested, not yet reviewed. The only removable state.
    Application,
    /// Cleared for lending and collecting. There is no transition back.
    Approved,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Application => "application",
            ServiceStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line of credit. The internal service-kind account records the net amount
/// lent out: a balance of -300 means 300 cents are on loan.
///
/// The account is owned exclusively by the service; it has no identity of its
/// own and moves money only through [`Service::lend`] and [`Service::collect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawService")]
pub struct Service {
    limit: Cents,
    status: ServiceStatus,
    account: Account,
}

impl Service {
    /// Open a new application with a zero-balance internal account.
    pub fn new(limit: Cents) -> Result<Self, ServiceError> {
        Self::from_parts(limit, Account::service(), ServiceStatus::Application)
    }

    /// Rebuild a service from its stored pieces.
    pub fn from_parts(
        limit: Cents,
        account: Account,
        status: ServiceStatus,
    ) -> Result<Self, ServiceError> {
        if limit < 0 {
            return Err(ServiceError::InvalidLimit(limit));
        }
        Ok(Self {
            limit,
            status,
            account,
        })
    }

    pub fn limit(&self) -> Cents {
        self.limit
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    /// The internal account's balance; negative when money is out on loan.
    pub fn balance(&self) -> Cents {
        self.account.balance()
    }

    /// Clear the service for use. Approving twice is a no-op.
    pub fn approve(&mut self) {
        self.status = ServiceStatus::Approved;
    }

    /// Pull `amount` out of `from_account` and book it against the loan.
    /// A refused withdrawal surfaces as [`ServiceError::CollectionFailed`]
    /// with neither account touched.
    pub fn collect(&mut self, amount: Cents, from_account: &mut Account) -> Result<(), ServiceError> {
        if self.status != ServiceStatus::Approved {
            return Err(ServiceError::NotApproved);
        }
        from_account
            .withdraw(amount)
            .map_err(ServiceError::CollectionFailed)?;
        self.account.deposit(amount);
        Ok(())
    }

    /// Lend `amount` into `to_account`, driving the internal balance further
    /// negative. Refused when the loan would pass below `-limit`.
    pub fn lend(&mut self, amount: Cents, to_account: &mut Account) -> Result<(), ServiceError> {
        if self.status != ServiceStatus::Approved {
            return Err(ServiceError::NotApproved);
        }
        if self.account.balance() - amount < -self.limit {
            return Err(ServiceError::CreditLimitExceeded {
                limit: self.limit,
                balance: self.account.balance(),
                requested: amount,
            });
        }
        self.account
            .withdraw(amount)
            .expect("service-kind accounts never refuse a withdrawal");
        to_account.deposit(amount);
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawService {
    limit: Cents,
    status: ServiceStatus,
    account: Account,
}

impl TryFrom<RawService> for Service {
    type Error = ServiceError;

    fn try_from(raw: RawService) -> Result<Self, Self::Error> {
        Service::from_parts(raw.limit, raw.account, raw.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    InvalidLimit(Cents),
    NotApproved,
    CreditLimitExceeded {
        limit: Cents,
        balance: Cents,
        requested: Cents,
    },
    CollectionFailed(AccountError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidLimit(limit) => {
                write!(f, "credit limit cannot be negative (got {} cents)", limit)
            }
            ServiceError::NotApproved => write!(f, "service is not approved"),
            ServiceError::CreditLimitExceeded {
                limit,
                balance,
                requested,
            } => write!(
                f,
                "lending {} cents would exceed the credit limit ({} cents, {} cents already out)",
                requested, limit, -balance
            ),
            ServiceError::CollectionFailed(source) => {
                write!(f, "unable to collect funds: {}", source)
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::CollectionFailed(source) => Some(source),
            _ => None,
        }
    }
}
