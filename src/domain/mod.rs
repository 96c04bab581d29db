mod account;
mod customer;
mod employee;
mod money;
mod service;

pub use account::*;
pub use customer::*;
pub use employee::*;
pub use money::*;
pub use service::*;
