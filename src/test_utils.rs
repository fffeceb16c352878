//! Shared test utilities for `PayBob`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        balance::{self, BalanceInput},
        group::{self, ExpenseInput, GroupInput},
        user::{self, UserInput},
    },
    entities,
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Fixed reference time (2025-07-25 12:00 UTC) for pure aggregation tests.
pub fn sample_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_753_444_800, 0).unwrap_or_default()
}

/// Builds an active, untagged balance without touching a database.
pub fn sample_balance(
    id: i64,
    person: &str,
    amount: f64,
    is_owed_to_me: bool,
) -> entities::balance::Model {
    entities::balance::Model {
        id,
        user_id: None,
        amount,
        description: format!("Balance {id}"),
        is_owed_to_me,
        other_person_name: person.to_string(),
        other_person_contact: None,
        due_date: None,
        tags: entities::balance::Tags::default(),
        created_at: sample_time(),
        updated_at: sample_time(),
        is_settled: false,
        notes: None,
    }
}

/// Builds an active group with no expenses.
pub fn sample_group(id: i64, name: &str) -> entities::group::Model {
    entities::group::Model {
        id,
        name: name.to_string(),
        description: None,
        created_at: sample_time(),
        is_active: true,
        total_expenses: 0.0,
    }
}

/// Form input with only the required fields filled.
pub fn balance_input(
    amount: &str,
    description: &str,
    person: &str,
    is_owed_to_me: bool,
) -> BalanceInput {
    BalanceInput {
        amount: amount.to_string(),
        description: description.to_string(),
        is_owed_to_me,
        other_person_name: person.to_string(),
        ..Default::default()
    }
}

/// Expense input with an equal split and no category.
pub fn expense_input(amount: &str, description: &str, paid_by: &str) -> ExpenseInput {
    ExpenseInput {
        amount: amount.to_string(),
        description: description.to_string(),
        paid_by: paid_by.to_string(),
        ..Default::default()
    }
}

/// Creates a test balance with sensible defaults.
///
/// # Defaults
/// * description: "Test balance"
/// * no contact, due date, tags or notes
pub async fn create_test_balance(
    db: &DatabaseConnection,
    person: &str,
    amount: f64,
    is_owed_to_me: bool,
) -> Result<entities::balance::Model> {
    balance::create_balance(
        db,
        balance_input(&amount.to_string(), "Test balance", person, is_owed_to_me),
    )
    .await
}

/// Sets up a test database with one balance (Alex owes the user 25.0).
pub async fn setup_with_balance() -> Result<(DatabaseConnection, entities::balance::Model)> {
    let db = setup_test_db().await?;
    let balance = create_test_balance(&db, "Alex", 25.0, true).await?;
    Ok((db, balance))
}

/// Creates a test user with no contact details.
pub async fn create_test_user(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        UserInput {
            name: name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates an active test group without a description.
pub async fn create_test_group(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::group::Model> {
    group::create_group(
        db,
        GroupInput {
            name: name.to_string(),
            description: None,
        },
    )
    .await
}
