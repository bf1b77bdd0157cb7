//! Customer directory records.

use crate::ids::{CustomerId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Customer membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Membership {
    /// Entry tier.
    #[default]
    Bronze,
    /// Mid tier.
    Silver,
    /// Top tier.
    Gold,
}

impl Membership {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Membership::Bronze => "Bronze",
            Membership::Silver => "Silver",
            Membership::Gold => "Gold",
        }
    }
}

/// A customer record. Looked up, never created, by the checkout workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// The authentication-side user this customer belongs to.
    pub user_id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Optional birth date.
    pub birth_date: Option<NaiveDate>,
    /// Membership tier.
    pub membership: Membership,
}

impl Customer {
    /// Create a new bronze-tier customer.
    pub fn new(
        user_id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::generate(),
            user_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: String::new(),
            birth_date: None,
            membership: Membership::default(),
        }
    }

    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
