pub mod auth;
pub mod consultations;
pub mod lawyers;
pub mod questions;
pub mod schedule;
pub mod services;
pub mod uploads;

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.limit) < self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Lawyer,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => f.write_str("client"),
            Self::Lawyer => f.write_str("lawyer"),
            Self::Admin => f.write_str("admin"),
        }
    }
}
