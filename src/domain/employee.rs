use serde::{Deserialize, Serialize};

/// An identity record for bank staff. Employees have no behavior; they are
/// addressed by position in the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "f_name")]
    pub first_name: String,
    #[serde(rename = "l_name")]
    pub last_name: String,
}

impl Employee {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
