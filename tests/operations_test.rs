mod common;

use teller::application::ops;
use teller::application::AppError;
use teller::domain::AccountError;
use teller::storage::Snapshot;

use common::sample_snapshot;

#[test]
fn test_add_and_remove_employee() {
    let mut snapshot = Snapshot::default();

    ops::add_employee(&mut snapshot, "Bill", "Gates");
    ops::add_employee(&mut snapshot, "Steve", "Jobs");
    assert_eq!(snapshot.employees.len(), 2);

    let removed = ops::remove_employee(&mut snapshot, 0).unwrap();
    assert_eq!(removed.first_name, "Bill");

    // removal shifted the remaining employee down to index 0
    assert_eq!(snapshot.employees[0].first_name, "Steve");
}

#[test]
fn test_remove_employee_out_of_range() {
    let mut snapshot = Snapshot::default();
    assert!(matches!(
        ops::remove_employee(&mut snapshot, 0),
        Err(AppError::EmployeeNotFound(0))
    ));
}

#[test]
fn test_add_customer_starts_empty() {
    let mut snapshot = Snapshot::default();
    ops::add_customer(&mut snapshot, "Albert", "Einstein", "1 Zurich Place");

    let customer = &snapshot.customers[0];
    assert_eq!(customer.address, "1 Zurich Place");
    assert!(customer.accounts.is_empty());
    assert!(customer.services.is_empty());
    assert_eq!(customer.total_balance(), 0);
}

#[test]
fn test_remove_customer_with_balance_is_refused() {
    let mut snapshot = sample_snapshot();

    let err = ops::remove_customer(&mut snapshot, 0).unwrap_err();
    assert!(matches!(
        err,
        AppError::CustomerHasBalance {
            index: 0,
            balance: 10_000
        }
    ));
    // the customer is still there
    assert_eq!(snapshot.customers.len(), 1);
    assert_eq!(snapshot.customers[0].first_name, "Ada");
}

#[test]
fn test_remove_settled_customer() {
    let mut snapshot = sample_snapshot();
    ops::add_customer(&mut snapshot, "Emmy", "Noether", "3 Invariant Lane");

    let removed = ops::remove_customer(&mut snapshot, 1).unwrap();
    assert_eq!(removed.first_name, "Emmy");
    assert_eq!(snapshot.customers.len(), 1);
}

#[test]
fn test_open_and_close_account() {
    let mut snapshot = Snapshot::default();
    ops::add_customer(&mut snapshot, "Grace", "Hopper", "1 Navy Yard");

    ops::add_account(&mut snapshot, 0, "savings").unwrap();
    assert_eq!(snapshot.customers[0].accounts[0].kind(), "savings");
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 0);

    let closed = ops::remove_account(&mut snapshot, 0, 0).unwrap();
    assert_eq!(closed.kind(), "savings");
    assert!(snapshot.customers[0].accounts.is_empty());
}

#[test]
fn test_close_account_with_balance_is_refused() {
    let mut snapshot = sample_snapshot();

    let err = ops::remove_account(&mut snapshot, 0, 0).unwrap_err();
    assert!(matches!(
        err,
        AppError::AccountHasBalance {
            customer: 0,
            account: 0,
            balance: 10_000
        }
    ));
    assert_eq!(snapshot.customers[0].accounts.len(), 2);
}

#[test]
fn test_deposit_and_withdraw() {
    let mut snapshot = sample_snapshot();

    let balance = ops::deposit(&mut snapshot, 0, 0, 2_500).unwrap();
    assert_eq!(balance, 12_500);

    let balance = ops::withdraw(&mut snapshot, 0, 0, 12_000).unwrap();
    assert_eq!(balance, 500);
}

#[test]
fn test_withdraw_to_zero_then_refused() {
    let mut snapshot = sample_snapshot();

    assert_eq!(ops::withdraw(&mut snapshot, 0, 0, 10_000).unwrap(), 0);

    let err = ops::withdraw(&mut snapshot, 0, 0, 10_000).unwrap_err();
    assert!(matches!(
        err,
        AppError::Account(AccountError::InsufficientFunds {
            balance: 0,
            requested: 10_000
        })
    ));
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 0);
}

#[test]
fn test_deposit_resolution_errors() {
    let mut snapshot = sample_snapshot();

    assert!(matches!(
        ops::deposit(&mut snapshot, 5, 0, 100),
        Err(AppError::CustomerNotFound(5))
    ));
    assert!(matches!(
        ops::deposit(&mut snapshot, 0, 9, 100),
        Err(AppError::AccountNotFound {
            customer: 0,
            account: 9
        })
    ));
}

#[test]
fn test_transfer_moves_money() {
    let mut snapshot = sample_snapshot();

    ops::transfer(&mut snapshot, 0, 0, 1, 4_000).unwrap();
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 6_000);
    assert_eq!(snapshot.customers[0].accounts[1].balance(), 4_000);
}

#[test]
fn test_transfer_insufficient_funds_touches_nothing() {
    let mut snapshot = sample_snapshot();

    let err = ops::transfer(&mut snapshot, 0, 1, 0, 1).unwrap_err();
    assert!(matches!(
        err,
        AppError::Account(AccountError::InsufficientFunds { .. })
    ));
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 10_000);
    assert_eq!(snapshot.customers[0].accounts[1].balance(), 0);
}

#[test]
fn test_transfer_bad_destination_touches_nothing() {
    let mut snapshot = sample_snapshot();

    let err = ops::transfer(&mut snapshot, 0, 0, 7, 1_000).unwrap_err();
    assert!(matches!(
        err,
        AppError::AccountNotFound {
            customer: 0,
            account: 7
        }
    ));
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 10_000);
}

#[test]
fn test_transfer_rejects_non_positive_amounts() {
    let mut snapshot = sample_snapshot();

    assert!(matches!(
        ops::transfer(&mut snapshot, 0, 0, 1, 0),
        Err(AppError::InvalidAmount { amount: 0 })
    ));
    assert!(matches!(
        ops::transfer(&mut snapshot, 0, 0, 1, -500),
        Err(AppError::InvalidAmount { amount: -500 })
    ));
    assert_eq!(snapshot.customers[0].accounts[0].balance(), 10_000);
}
