//! The operations layer: every CLI-facing verb, expressed against an
//! in-memory [`Snapshot`]. Verbs validate their preconditions up front, so a
//! failed operation leaves the snapshot exactly as it found it.

use log::warn;

use crate::domain::{Account, Cents, Customer, Employee, Service, ServiceStatus};
use crate::storage::{Repository, Snapshot};

use super::AppError;

/// Load the snapshot, run one operation against it, and persist the result.
/// The save is skipped when the operation fails; failed verbs leave the
/// snapshot unmodified, so there is nothing to flush.
pub fn with_snapshot<T>(
    repo: &Repository,
    op: impl FnOnce(&mut Snapshot) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut snapshot = repo.load()?;
    let value = op(&mut snapshot)?;
    repo.save(&snapshot)?;
    Ok(value)
}

pub fn resolve_customer(snapshot: &Snapshot, index: usize) -> Result<&Customer, AppError> {
    snapshot
        .customers
        .get(index)
        .ok_or(AppError::CustomerNotFound(index))
}

fn resolve_customer_mut(snapshot: &mut Snapshot, index: usize) -> Result<&mut Customer, AppError> {
    snapshot
        .customers
        .get_mut(index)
        .ok_or(AppError::CustomerNotFound(index))
}

pub fn resolve_account(
    snapshot: &Snapshot,
    customer: usize,
    account: usize,
) -> Result<&Account, AppError> {
    resolve_customer(snapshot, customer)?
        .accounts
        .get(account)
        .ok_or(AppError::AccountNotFound { customer, account })
}

fn resolve_account_mut(
    snapshot: &mut Snapshot,
    customer: usize,
    account: usize,
) -> Result<&mut Account, AppError> {
    resolve_customer_mut(snapshot, customer)?
        .accounts
        .get_mut(account)
        .ok_or(AppError::AccountNotFound { customer, account })
}

pub fn resolve_service(
    snapshot: &Snapshot,
    customer: usize,
    service: usize,
) -> Result<&Service, AppError> {
    resolve_customer(snapshot, customer)?
        .services
        .get(service)
        .ok_or(AppError::ServiceNotFound { customer, service })
}

fn check_amount(amount: Cents) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount { amount });
    }
    Ok(())
}

pub fn add_employee(snapshot: &mut Snapshot, first_name: &str, last_name: &str) {
    snapshot.employees.push(Employee::new(first_name, last_name));
}

/// Removal shifts the indices of every employee after the removed one.
pub fn remove_employee(snapshot: &mut Snapshot, index: usize) -> Result<Employee, AppError> {
    if index >= snapshot.employees.len() {
        return Err(AppError::EmployeeNotFound(index));
    }
    Ok(snapshot.employees.remove(index))
}

pub fn add_customer(snapshot: &mut Snapshot, first_name: &str, last_name: &str, address: &str) {
    snapshot
        .customers
        .push(Customer::new(first_name, last_name, address));
}

/// A customer leaves the bank only once everything is settled: the total
/// balance across accounts and services must be exactly zero. Removal shifts
/// the indices of every customer after the removed one.
pub fn remove_customer(snapshot: &mut Snapshot, index: usize) -> Result<Customer, AppError> {
    let balance = resolve_customer(snapshot, index)?.total_balance();
    if balance != 0 {
        return Err(AppError::CustomerHasBalance { index, balance });
    }
    Ok(snapshot.customers.remove(index))
}

/// Open a zero-balance account of the given kind.
pub fn add_account(snapshot: &mut Snapshot, customer: usize, kind: &str) -> Result<(), AppError> {
    let account = Account::new(kind, 0)?;
    resolve_customer_mut(snapshot, customer)?.accounts.push(account);
    Ok(())
}

/// Close an account. Only an exactly-zero balance may be closed.
pub fn remove_account(
    snapshot: &mut Snapshot,
    customer: usize,
    account: usize,
) -> Result<Account, AppError> {
    let balance = resolve_account(snapshot, customer, account)?.balance();
    if balance != 0 {
        return Err(AppError::AccountHasBalance {
            customer,
            account,
            balance,
        });
    }
    Ok(snapshot.customers[customer].accounts.remove(account))
}

/// Returns the new balance.
pub fn deposit(
    snapshot: &mut Snapshot,
    customer: usize,
    account: usize,
    amount: Cents,
) -> Result<Cents, AppError> {
    check_amount(amount)?;
    let account = resolve_account_mut(snapshot, customer, account)?;
    account.deposit(amount);
    Ok(account.balance())
}

/// Returns the new balance.
pub fn withdraw(
    snapshot: &mut Snapshot,
    customer: usize,
    account: usize,
    amount: Cents,
) -> Result<Cents, AppError> {
    check_amount(amount)?;
    let account = resolve_account_mut(snapshot, customer, account)?;
    account.withdraw(amount)?;
    Ok(account.balance())
}

/// Move money between two accounts of the same customer. The withdrawal runs
/// first; if it is refused, the destination is never touched.
pub fn transfer(
    snapshot: &mut Snapshot,
    customer: usize,
    source: usize,
    destination: usize,
    amount: Cents,
) -> Result<(), AppError> {
    check_amount(amount)?;
    // resolve the destination before withdrawing so a bad index cannot strand
    // money outside any account
    resolve_account(snapshot, customer, destination)?;
    resolve_account_mut(snapshot, customer, source)?.withdraw(amount)?;
    snapshot.customers[customer].accounts[destination].deposit(amount);
    Ok(())
}

/// File an application for a new line of credit.
pub fn apply_for_service(
    snapshot: &mut Snapshot,
    customer: usize,
    limit: Cents,
) -> Result<(), AppError> {
    let service = Service::new(limit)?;
    resolve_customer_mut(snapshot, customer)?.services.push(service);
    Ok(())
}

/// The answer to an approval request. A refusal is an answer, not an error;
/// the caller reports it and the application stays pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Approved,
    Refused {
        total_balance: Cents,
        total_limit: Cents,
    },
}

/// Approve an application when the customer's holdings cover their combined
/// credit exposure, the limit under review included. Approving an
/// already-approved service is a no-op.
pub fn approve_application(
    snapshot: &mut Snapshot,
    customer: usize,
    service: usize,
) -> Result<ApprovalOutcome, AppError> {
    let customer_entry = resolve_customer_mut(snapshot, customer)?;
    if service >= customer_entry.services.len() {
        return Err(AppError::ServiceNotFound { customer, service });
    }

    let total_balance = customer_entry.total_balance();
    let total_limit = customer_entry.total_limit();
    if total_balance < total_limit {
        warn!(
            "refusing service {} for customer {}: balance {} does not cover exposure {}",
            service, customer, total_balance, total_limit
        );
        return Ok(ApprovalOutcome::Refused {
            total_balance,
            total_limit,
        });
    }

    customer_entry.services[service].approve();
    Ok(ApprovalOutcome::Approved)
}

/// Deny a pending application, removing it. Approved services have no removal
/// path at all; denying one fails without touching it.
pub fn deny_application(
    snapshot: &mut Snapshot,
    customer: usize,
    service: usize,
) -> Result<Service, AppError> {
    let status = resolve_service(snapshot, customer, service)?.status();
    if status != ServiceStatus::Application {
        return Err(AppError::NotAnApplication { customer, service });
    }
    Ok(snapshot.customers[customer].services.remove(service))
}

/// Draw borrowed money from a service into one of the customer's accounts.
pub fn borrow_from_service(
    snapshot: &mut Snapshot,
    customer: usize,
    service: usize,
    account: usize,
    amount: Cents,
) -> Result<(), AppError> {
    check_amount(amount)?;
    let Customer {
        accounts, services, ..
    } = resolve_customer_mut(snapshot, customer)?;
    let service_entry = services
        .get_mut(service)
        .ok_or(AppError::ServiceNotFound { customer, service })?;
    let account_entry = accounts
        .get_mut(account)
        .ok_or(AppError::AccountNotFound { customer, account })?;

    service_entry.lend(amount, account_entry)?;
    Ok(())
}

/// Pay money from one of the customer's accounts back into a service.
pub fn pay_to_service(
    snapshot: &mut Snapshot,
    customer: usize,
    service: usize,
    account: usize,
    amount: Cents,
) -> Result<(), AppError> {
    check_amount(amount)?;
    let Customer {
        accounts, services, ..
    } = resolve_customer_mut(snapshot, customer)?;
    let service_entry = services
        .get_mut(service)
        .ok_or(AppError::ServiceNotFound { customer, service })?;
    let account_entry = accounts
        .get_mut(account)
        .ok_or(AppError::AccountNotFound { customer, account })?;

    service_entry.collect(amount, account_entry)?;
    Ok(())
}

/// A pending application together with where it lives and the totals its
/// review decision looks at, captured at scan time.
#[derive(Debug, Clone)]
pub struct ApplicationEntry<'a> {
    pub customer_index: usize,
    pub service_index: usize,
    pub customer: &'a Customer,
    pub service: &'a Service,
    pub total_balance: Cents,
    pub total_limit: Cents,
}

/// Every pending application across the whole bank, lazily.
pub fn list_applications(snapshot: &Snapshot) -> impl Iterator<Item = ApplicationEntry<'_>> {
    snapshot
        .customers
        .iter()
        .enumerate()
        .flat_map(|(customer_index, customer)| {
            let total_balance = customer.total_balance();
            let total_limit = customer.total_limit();
            customer
                .services
                .iter()
                .enumerate()
                .filter(|(_, service)| service.status() == ServiceStatus::Application)
                .map(move |(service_index, service)| ApplicationEntry {
                    customer_index,
                    service_index,
                    customer,
                    service,
                    total_balance,
                    total_limit,
                })
        })
}
