//! User business logic.
//!
//! Users are created explicitly or from the configured profile on first start.

use crate::{
    config::profile::ProfileConfig,
    core::validate,
    entities::{User, user},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Form values for a new user.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    /// Display name, required
    pub name: String,
    /// Optional email
    pub email: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
}

impl From<&ProfileConfig> for UserInput {
    fn from(profile: &ProfileConfig) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }
}

/// Creates a user.
///
/// # Errors
/// Returns a validation error if the name is empty, or a store error if the insert fails.
pub async fn create_user(db: &DatabaseConnection, input: UserInput) -> Result<user::Model> {
    let name = validate::require_text(&input.name, "Name")?;

    let model = user::ActiveModel {
        name: Set(name),
        email: Set(validate::optional_text(input.email.as_deref())),
        phone: Set(validate::optional_text(input.phone.as_deref())),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Finds a user by ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Returns the oldest user, creating one from `profile` when the table is empty.
pub async fn ensure_profile_user(
    db: &DatabaseConnection,
    profile: &ProfileConfig,
) -> Result<user::Model> {
    if let Some(existing) = User::find().order_by_asc(user::Column::Id).one(db).await? {
        return Ok(existing);
    }

    let created = create_user(db, UserInput::from(profile)).await?;
    info!(user_id = created.id, name = %created.name, "Created profile user");
    Ok(created)
}
