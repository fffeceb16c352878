//! Profile configuration loaded from environment variables.
//!
//! The profile describes the local user. It is used to create the first `users` row
//! when the store is empty. All variables are optional.

/// Name used when `PAYBOB_USER_NAME` is not set
pub const DEFAULT_PROFILE_NAME: &str = "PayBob User";

/// The local user's details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    /// Display name
    pub name: String,
    /// Optional email address
    pub email: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            email: None,
            phone: None,
        }
    }
}

/// Reads `PAYBOB_USER_NAME`, `PAYBOB_USER_EMAIL` and `PAYBOB_USER_PHONE`.
///
/// Blank values count as unset.
#[must_use]
pub fn get_profile() -> ProfileConfig {
    ProfileConfig {
        name: non_blank_var("PAYBOB_USER_NAME").unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()),
        email: non_blank_var("PAYBOB_USER_EMAIL"),
        phone: non_blank_var("PAYBOB_USER_PHONE"),
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
