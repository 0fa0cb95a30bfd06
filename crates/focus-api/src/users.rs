//! User accounts
//!
//! A user owns tracked intervals and a timezone preference. Accounts are
//! created through the HTTP API or the admin CLI.

use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub timezone: String,
}

/// Payload for creating a user (no ID until stored)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub timezone: String,
}
