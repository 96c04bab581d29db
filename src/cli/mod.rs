use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::ops::{self, ApprovalOutcome};
use crate::domain::{format_cents, parse_cents, Cents};
use crate::storage::{Repository, Snapshot};

/// Teller - a small bank ledger on a flat file
#[derive(Parser)]
#[command(name = "teller")]
#[command(about = "Simulate a bank: customers, employees, accounts, and credit services")]
#[command(version)]
pub struct Cli {
    /// Bank file path
    #[arg(short, long, default_value = "bank.json")]
    pub file: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty bank file
    Init,

    /// Employee management commands
    #[command(subcommand)]
    Employee(EmployeeCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// List employees
    List,

    /// Hire an employee
    Add {
        first_name: String,
        last_name: String,
    },

    /// Remove an employee by index
    Remove { employee_index: usize },

    /// Credit application review commands
    #[command(subcommand)]
    Application(ApplicationCommands),
}

#[derive(Subcommand)]
pub enum ApplicationCommands {
    /// List pending credit applications across all customers
    List,

    /// Approve a pending application
    Approve {
        customer_index: usize,
        service_index: usize,
    },

    /// Deny a pending application, removing it
    Deny {
        customer_index: usize,
        service_index: usize,
    },
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List customers with their total balances
    List,

    /// Register a customer
    Add {
        first_name: String,
        last_name: String,
        address: String,
    },

    /// Remove a customer by index (total balance must be zero)
    Remove { customer_index: usize },

    /// Account commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Credit service commands
    #[command(subcommand)]
    Service(ServiceCommands),
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List a customer's accounts
    List { customer_index: usize },

    /// Open a zero-balance account of the given kind (e.g. "checking")
    Add { customer_index: usize, kind: String },

    /// Close an account (balance must be zero)
    Remove {
        customer_index: usize,
        account_index: usize,
    },

    /// Deposit into an account
    Deposit {
        customer_index: usize,
        account_index: usize,
        /// Amount as a decimal string, e.g. "50.00" or "50"
        amount: String,
    },

    /// Withdraw from an account
    Withdraw {
        customer_index: usize,
        account_index: usize,
        /// Amount as a decimal string, e.g. "50.00" or "50"
        amount: String,
    },

    /// Move money between two accounts of the same customer
    Transfer {
        customer_index: usize,
        source_account_index: usize,
        destination_account_index: usize,
        /// Amount as a decimal string, e.g. "50.00" or "50"
        amount: String,
    },
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List a customer's credit services
    List { customer_index: usize },

    /// Apply for a new line of credit
    Apply {
        customer_index: usize,
        /// Credit limit as a decimal string, e.g. "500.00"
        limit: String,
    },

    /// Draw borrowed money from a service into an account
    Borrow {
        customer_index: usize,
        service_index: usize,
        account_index: usize,
        /// Amount as a decimal string, e.g. "50.00" or "50"
        amount: String,
    },

    /// Pay an account's money back into a service
    Pay {
        customer_index: usize,
        service_index: usize,
        account_index: usize,
        /// Amount as a decimal string, e.g. "50.00" or "50"
        amount: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let repo = Repository::new(&self.file);

        match self.command {
            Commands::Init => run_init(&repo),
            Commands::Employee(cmd) => run_employee_command(&repo, cmd),
            Commands::Customer(cmd) => run_customer_command(&repo, cmd),
        }
    }
}

fn parse_amount(input: &str) -> Result<Cents> {
    parse_cents(input).context("Invalid amount format. Use '50.00' or '50'")
}

fn run_init(repo: &Repository) -> Result<()> {
    if repo.exists() {
        bail!("Bank file already exists: {}", repo.path().display());
    }
    repo.save(&Snapshot::default())?;
    println!("Created empty bank file: {}", repo.path().display());
    Ok(())
}

fn run_employee_command(repo: &Repository, cmd: EmployeeCommands) -> Result<()> {
    match cmd {
        EmployeeCommands::List => {
            ops::with_snapshot(repo, |snapshot| {
                println!("Listing {} employees", snapshot.employees.len());
                for (index, employee) in snapshot.employees.iter().enumerate() {
                    println!("{}: {}, {}", index, employee.first_name, employee.last_name);
                }
                Ok(())
            })?;
        }

        EmployeeCommands::Add {
            first_name,
            last_name,
        } => {
            ops::with_snapshot(repo, |snapshot| {
                ops::add_employee(snapshot, &first_name, &last_name);
                Ok(())
            })?;
            println!("Hired employee: {} {}", first_name, last_name);
        }

        EmployeeCommands::Remove { employee_index } => {
            let employee =
                ops::with_snapshot(repo, |snapshot| ops::remove_employee(snapshot, employee_index))?;
            println!(
                "Removed employee {}: {} {}",
                employee_index, employee.first_name, employee.last_name
            );
        }

        EmployeeCommands::Application(cmd) => run_application_command(repo, cmd)?,
    }

    Ok(())
}

fn run_application_command(repo: &Repository, cmd: ApplicationCommands) -> Result<()> {
    match cmd {
        ApplicationCommands::List => {
            ops::with_snapshot(repo, |snapshot| {
                let entries: Vec<_> = ops::list_applications(snapshot).collect();
                println!("Listing {} pending applications", entries.len());
                for entry in entries {
                    println!(
                        "customer {} service {}: {} {} requests a ${} limit (balance ${}, committed ${})",
                        entry.customer_index,
                        entry.service_index,
                        entry.customer.first_name,
                        entry.customer.last_name,
                        format_cents(entry.service.limit()),
                        format_cents(entry.total_balance),
                        format_cents(entry.total_limit),
                    );
                }
                Ok(())
            })?;
        }

        ApplicationCommands::Approve {
            customer_index,
            service_index,
        } => {
            let outcome = ops::with_snapshot(repo, |snapshot| {
                ops::approve_application(snapshot, customer_index, service_index)
            })?;
            match outcome {
                ApprovalOutcome::Approved => {
                    println!(
                        "Approved service {} for customer {}",
                        service_index, customer_index
                    );
                }
                ApprovalOutcome::Refused {
                    total_balance,
                    total_limit,
                } => {
                    println!(
                        "Refused: customer {} holds ${} against ${} of committed credit",
                        customer_index,
                        format_cents(total_balance),
                        format_cents(total_limit)
                    );
                }
            }
        }

        ApplicationCommands::Deny {
            customer_index,
            service_index,
        } => {
            let service = ops::with_snapshot(repo, |snapshot| {
                ops::deny_application(snapshot, customer_index, service_index)
            })?;
            println!(
                "Denied application {} (limit ${}) for customer {}",
                service_index,
                format_cents(service.limit()),
                customer_index
            );
        }
    }

    Ok(())
}

fn run_customer_command(repo: &Repository, cmd: CustomerCommands) -> Result<()> {
    match cmd {
        CustomerCommands::List => {
            ops::with_snapshot(repo, |snapshot| {
                println!("Listing {} customers", snapshot.customers.len());
                for (index, customer) in snapshot.customers.iter().enumerate() {
                    println!(
                        "{}: {}, {}, {}, ${}",
                        index,
                        customer.first_name,
                        customer.last_name,
                        customer.address,
                        format_cents(customer.total_balance())
                    );
                }
                Ok(())
            })?;
        }

        CustomerCommands::Add {
            first_name,
            last_name,
            address,
        } => {
            ops::with_snapshot(repo, |snapshot| {
                ops::add_customer(snapshot, &first_name, &last_name, &address);
                Ok(())
            })?;
            println!("Registered customer: {} {}", first_name, last_name);
        }

        CustomerCommands::Remove { customer_index } => {
            let customer =
                ops::with_snapshot(repo, |snapshot| ops::remove_customer(snapshot, customer_index))?;
            println!(
                "Removed customer {}: {} {}",
                customer_index, customer.first_name, customer.last_name
            );
        }

        CustomerCommands::Account(cmd) => run_account_command(repo, cmd)?,

        CustomerCommands::Service(cmd) => run_service_command(repo, cmd)?,
    }

    Ok(())
}

fn run_account_command(repo: &Repository, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::List { customer_index } => {
            ops::with_snapshot(repo, |snapshot| {
                let customer = ops::resolve_customer(snapshot, customer_index)?;
                println!(
                    "Listing {} accounts for {} {}",
                    customer.accounts.len(),
                    customer.first_name,
                    customer.last_name
                );
                for (index, account) in customer.accounts.iter().enumerate() {
                    println!(
                        "{}: {}, ${}",
                        index,
                        account.kind(),
                        format_cents(account.balance())
                    );
                }
                Ok(())
            })?;
        }

        AccountCommands::Add {
            customer_index,
            kind,
        } => {
            ops::with_snapshot(repo, |snapshot| {
                ops::add_account(snapshot, customer_index, &kind)
            })?;
            println!("Opened {} account for customer {}", kind, customer_index);
        }

        AccountCommands::Remove {
            customer_index,
            account_index,
        } => {
            let account = ops::with_snapshot(repo, |snapshot| {
                ops::remove_account(snapshot, customer_index, account_index)
            })?;
            println!(
                "Closed {} account {} of customer {}",
                account.kind(),
                account_index,
                customer_index
            );
        }

        AccountCommands::Deposit {
            customer_index,
            account_index,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let balance = ops::with_snapshot(repo, |snapshot| {
                ops::deposit(snapshot, customer_index, account_index, amount)
            })?;
            println!(
                "Deposited ${} into account {} of customer {} (balance now ${})",
                format_cents(amount),
                account_index,
                customer_index,
                format_cents(balance)
            );
        }

        AccountCommands::Withdraw {
            customer_index,
            account_index,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            let balance = ops::with_snapshot(repo, |snapshot| {
                ops::withdraw(snapshot, customer_index, account_index, amount)
            })?;
            println!(
                "Withdrew ${} from account {} of customer {} (balance now ${})",
                format_cents(amount),
                account_index,
                customer_index,
                format_cents(balance)
            );
        }

        AccountCommands::Transfer {
            customer_index,
            source_account_index,
            destination_account_index,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            ops::with_snapshot(repo, |snapshot| {
                ops::transfer(
                    snapshot,
                    customer_index,
                    source_account_index,
                    destination_account_index,
                    amount,
                )
            })?;
            println!(
                "Transferred ${} from account {} to account {} of customer {}",
                format_cents(amount),
                source_account_index,
                destination_account_index,
                customer_index
            );
        }
    }

    Ok(())
}

fn run_service_command(repo: &Repository, cmd: ServiceCommands) -> Result<()> {
    match cmd {
        ServiceCommands::List { customer_index } => {
            ops::with_snapshot(repo, |snapshot| {
                let customer = ops::resolve_customer(snapshot, customer_index)?;
                println!(
                    "Listing {} services for {} {}",
                    customer.services.len(),
                    customer.first_name,
                    customer.last_name
                );
                for (index, service) in customer.services.iter().enumerate() {
                    println!(
                        "{}: limit ${}, balance ${}, {}",
                        index,
                        format_cents(service.limit()),
                        format_cents(service.balance()),
                        service.status()
                    );
                }
                Ok(())
            })?;
        }

        ServiceCommands::Apply {
            customer_index,
            limit,
        } => {
            let limit = parse_amount(&limit)?;
            ops::with_snapshot(repo, |snapshot| {
                ops::apply_for_service(snapshot, customer_index, limit)
            })?;
            println!(
                "Filed application for a ${} line of credit for customer {}",
                format_cents(limit),
                customer_index
            );
        }

        ServiceCommands::Borrow {
            customer_index,
            service_index,
            account_index,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            ops::with_snapshot(repo, |snapshot| {
                ops::borrow_from_service(
                    snapshot,
                    customer_index,
                    service_index,
                    account_index,
                    amount,
                )
            })?;
            println!(
                "Borrowed ${} from service {} into account {} of customer {}",
                format_cents(amount),
                service_index,
                account_index,
                customer_index
            );
        }

        ServiceCommands::Pay {
            customer_index,
            service_index,
            account_index,
            amount,
        } => {
            let amount = parse_amount(&amount)?;
            ops::with_snapshot(repo, |snapshot| {
                ops::pay_to_service(
                    snapshot,
                    customer_index,
                    service_index,
                    account_index,
                    amount,
                )
            })?;
            println!(
                "Paid ${} from account {} into service {} of customer {}",
                format_cents(amount),
                account_index,
                service_index,
                customer_index
            );
        }
    }

    Ok(())
}
