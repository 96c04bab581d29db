// Each test file compiles this module separately, so helpers unused by one
// file would otherwise warn.
#![allow(dead_code)]

use anyhow::Result;
use tempfile::TempDir;
use teller::domain::{Account, Customer, Employee, Service};
use teller::storage::{Repository, Snapshot};

/// Helper to create a repository backed by a temporary directory.
pub fn temp_repo() -> Result<(Repository, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("bank.json");
    Ok((Repository::new(path), temp_dir))
}

/// One customer with a funded checking account, one employee, and a couple of
/// globals the core should never touch.
pub fn sample_snapshot() -> Snapshot {
    let mut customer = Customer::new("Ada", "Lovelace", "1 Analytical Row");
    customer
        .accounts
        .push(Account::new("checking", 10_000).unwrap());
    customer.accounts.push(Account::new("savings", 0).unwrap());

    let mut snapshot = Snapshot::default();
    snapshot.customers.push(customer);
    snapshot.employees.push(Employee::new("Richard", "Feynman"));
    snapshot
        .globals
        .insert("branch".to_string(), serde_json::json!("downtown"));
    snapshot
}

/// A customer holding `balance` cents in checking and one pending application
/// for a line of credit of `limit` cents.
pub fn applicant(balance: i64, limit: i64) -> Customer {
    let mut customer = Customer::new("Mary", "Somerville", "2 Burntisland Way");
    customer
        .accounts
        .push(Account::new("checking", balance).unwrap());
    customer.services.push(Service::new(limit).unwrap());
    customer
}
