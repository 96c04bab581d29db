use thiserror::Error;

use crate::domain::{format_cents, AccountError, Cents, ServiceError};
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(usize),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(usize),

    #[error("Account {account} not found for customer {customer}")]
    AccountNotFound { customer: usize, account: usize },

    #[error("Service {service} not found for customer {customer}")]
    ServiceNotFound { customer: usize, service: usize },

    #[error("Customer {index} has a total balance of ${}, not $0.00", format_cents(*balance))]
    CustomerHasBalance { index: usize, balance: Cents },

    #[error(
        "Account {account} of customer {customer} has a balance of ${}, not $0.00",
        format_cents(*balance)
    )]
    AccountHasBalance {
        customer: usize,
        account: usize,
        balance: Cents,
    },

    #[error("Service {service} of customer {customer} is not a pending application")]
    NotAnApplication { customer: usize, service: usize },

    #[error("Amount must be positive, got ${}", format_cents(*amount))]
    InvalidAmount { amount: Cents },

    #[error("{0}")]
    Account(#[from] AccountError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Storage(#[from] StorageError),
}
