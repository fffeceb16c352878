use thiserror::Error;

/// Input rejected before anything is written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Amount missing, unparseable, non-finite, zero or negative
    #[error("Invalid amount: '{input}' is not a positive number")]
    InvalidAmount {
        /// The text as entered
        input: String,
    },

    /// Required text field empty after trimming
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Label of the offending field
        field: &'static str,
    },
}

/// Unified error type for every `PayBob` operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input failed validation; nothing was written
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed; the attempted change was discarded
    #[error("Could not save: {0}")]
    Store(#[from] sea_orm::DbErr),

    /// No balance with this ID
    #[error("Balance not found: {id}")]
    BalanceNotFound {
        /// Requested balance ID
        id: i64,
    },

    /// No group with this ID
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// Requested group ID
        id: i64,
    },

    /// No user with this ID
    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested user ID
        id: i64,
    },

    /// The user already belongs to the group
    #[error("User {user_id} is already a member of group {group_id}")]
    AlreadyMember {
        /// Group ID
        group_id: i64,
        /// User ID
        user_id: i64,
    },

    /// config.toml could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Filesystem error, e.g. creating the database directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by caller input; the caller should re-prompt with the
    /// same input rather than report a failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
