use serde::{Deserialize, Serialize};

use super::{Account, Cents, Service};

/// One person's standing with the bank: identity plus the accounts and credit
/// services they own. Accounts and services belong to exactly one customer.
///
/// Customers, accounts, and services are addressed by position in their lists;
/// removing an entry shifts the indices of everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "f_name")]
    pub first_name: String,
    #[serde(rename = "l_name")]
    pub last_name: String,
    pub address: String,
    pub accounts: Vec<Account>,
    pub services: Vec<Service>,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            accounts: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Net worth: every account balance plus every service's internal balance.
    /// Zero for a customer with nothing open.
    pub fn total_balance(&self) -> Cents {
        let accounts: Cents = self.accounts.iter().map(|account| account.balance()).sum();
        let services: Cents = self.services.iter().map(|service| service.balance()).sum();
        accounts + services
    }

    /// Combined credit ceiling over every service, pending or approved.
    /// Always computed on demand, never stored.
    pub fn total_limit(&self) -> Cents {
        self.services.iter().map(|service| service.limit()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceStatus, SERVICE_KIND};

    #[test]
    fn test_new_customer_is_empty() {
        let customer = Customer::new("Albert", "Einstein", "1 Zurich Place");
        assert_eq!(customer.first_name, "Albert");
        assert_eq!(customer.last_name, "Einstein");
        assert_eq!(customer.address, "1 Zurich Place");
        assert!(customer.accounts.is_empty());
        assert!(customer.services.is_empty());
        assert_eq!(customer.total_balance(), 0);
        assert_eq!(customer.total_limit(), 0);
    }

    #[test]
    fn test_total_balance() {
        let mut customer = Customer::new("Alex", "Trebek", "1 Jeopardy Ave");
        customer.accounts.push(Account::new("checking", 0).unwrap());
        customer.services.push(Service::new(100).unwrap());
        assert_eq!(customer.total_balance(), 0);

        customer.accounts[0].deposit(100);
        assert_eq!(customer.total_balance(), 100);
    }

    #[test]
    fn test_total_balance_counts_debt() {
        let mut customer = Customer::new("Pat", "Sajak", "1 Wheel Way");
        customer.accounts.push(Account::new("checking", 0).unwrap());
        let debt = Account::new(SERVICE_KIND, -100).unwrap();
        customer
            .services
            .push(Service::from_parts(100, debt, ServiceStatus::Approved).unwrap());

        assert_eq!(customer.total_balance(), -100);
    }

    #[test]
    fn test_total_limit_sums_every_service() {
        let mut customer = Customer::new("Carl", "Sagan", "1 Main Street");
        customer.services.push(Service::new(100).unwrap());
        let mut approved = Service::new(50).unwrap();
        approved.approve();
        customer.services.push(approved);

        assert_eq!(customer.total_limit(), 150);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut customer = Customer::new("Jeremy", "Clarkson", "1 Diddly Squat Road");
        customer.accounts.push(Account::new("checking", 0).unwrap());
        customer.services.push(Service::new(100).unwrap());

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "f_name": "Jeremy",
                "l_name": "Clarkson",
                "address": "1 Diddly Squat Road",
                "accounts": [{"type": "checking", "balance": 0}],
                "services": [{
                    "limit": 100,
                    "status": "application",
                    "account": {"type": "service", "balance": 0}
                }]
            })
        );

        let parsed: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, customer);
    }
}
