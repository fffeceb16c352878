//! Balance business logic - Handles all balance-related operations.
//!
//! This module provides functions for recording, editing, settling and deleting balances.
//! Every mutation validates its input first and only then touches the store, so a
//! rejected form leaves the database exactly as it was. Functions return the written
//! record so callers can re-render without an extra query.

use crate::{
    core::{category::normalize_tag, transaction, validate},
    entities::{Balance, Transaction, balance, transaction::TransactionKind},
    errors::{Error, Result, ValidationError},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Description written on the transaction created by [`settle_balance`].
pub const SETTLEMENT_DESCRIPTION: &str = "Balance settled";

/// Form values for creating or editing a balance.
///
/// `amount` is the raw text the user typed; it is parsed during validation.
#[derive(Debug, Clone, Default)]
pub struct BalanceInput {
    /// Amount as entered, must parse to a positive number
    pub amount: String,
    /// What the debt is for
    pub description: String,
    /// `true` when the other person owes the user. Fixed at creation
    pub is_owed_to_me: bool,
    /// Name of the other party
    pub other_person_name: String,
    /// Phone or email of the other party
    pub other_person_contact: Option<String>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Selected categories; blank entries are dropped
    pub tags: Vec<String>,
    /// Optional notes
    pub notes: Option<String>,
    /// Owning user, if any
    pub user_id: Option<i64>,
}

/// Input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidBalance {
    amount: f64,
    description: String,
    is_owed_to_me: bool,
    other_person_name: String,
    other_person_contact: Option<String>,
    due_date: Option<DateTime<Utc>>,
    tags: balance::Tags,
    notes: Option<String>,
}

impl BalanceInput {
    /// Checks the amount, description and name, in that order, and normalises
    /// the optional fields.
    pub(crate) fn validate(&self) -> std::result::Result<ValidBalance, ValidationError> {
        let amount = validate::parse_amount(&self.amount)?;
        let description = validate::require_text(&self.description, "Description")?;
        let other_person_name = validate::require_text(&self.other_person_name, "Name")?;

        Ok(ValidBalance {
            amount,
            description,
            is_owed_to_me: self.is_owed_to_me,
            other_person_name,
            other_person_contact: validate::optional_text(self.other_person_contact.as_deref()),
            due_date: self.due_date,
            tags: self.tags.iter().filter_map(|t| normalize_tag(t)).collect(),
            notes: validate::optional_text(self.notes.as_deref()),
        })
    }
}

/// Retrieves every balance, most recently updated first.
///
/// This is the collection the summary functions in `core::summary` operate on.
pub async fn get_all_balances(db: &DatabaseConnection) -> Result<Vec<balance::Model>> {
    Balance::find()
        .order_by_desc(balance::Column::UpdatedAt)
        .order_by_desc(balance::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a balance by its unique ID.
pub async fn get_balance_by_id(
    db: &DatabaseConnection,
    balance_id: i64,
) -> Result<Option<balance::Model>> {
    Balance::find_by_id(balance_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a new unsettled balance.
///
/// # Errors
/// Returns a validation error without touching the store if:
/// - The amount is missing, not a number, or not strictly positive
/// - The description or the other person's name is empty
///
/// Returns [`Error::Store`] if the insert fails.
#[instrument(skip(db, input), fields(person = %input.other_person_name))]
pub async fn create_balance(
    db: &DatabaseConnection,
    input: BalanceInput,
) -> Result<balance::Model> {
    let valid = input.validate()?;
    insert_balance(db, input.user_id, valid).await
}

/// Inserts an already validated balance. Works inside a database transaction.
pub(crate) async fn insert_balance<C>(
    db: &C,
    user_id: Option<i64>,
    valid: ValidBalance,
) -> Result<balance::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();

    let model = balance::ActiveModel {
        user_id: Set(user_id),
        amount: Set(valid.amount),
        description: Set(valid.description),
        is_owed_to_me: Set(valid.is_owed_to_me),
        other_person_name: Set(valid.other_person_name),
        other_person_contact: Set(valid.other_person_contact),
        due_date: Set(valid.due_date),
        tags: Set(valid.tags),
        created_at: Set(now),
        updated_at: Set(now),
        is_settled: Set(false),
        notes: Set(valid.notes),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(balance_id = created.id, amount = created.amount, "Balance recorded");
    Ok(created)
}

/// Overwrites a balance's editable fields and refreshes `updated_at`.
///
/// `id`, `created_at`, the direction and the settled flag are left alone, so
/// `input.is_owed_to_me` is ignored. Settled balances can still be edited here; hiding
/// the edit action for them is up to the caller.
///
/// # Errors
/// Same validation as [`create_balance`], plus [`Error::BalanceNotFound`].
#[instrument(skip(db, input))]
pub async fn edit_balance(
    db: &DatabaseConnection,
    balance_id: i64,
    input: BalanceInput,
) -> Result<balance::Model> {
    let valid = input.validate()?;

    let mut balance: balance::ActiveModel = Balance::find_by_id(balance_id)
        .one(db)
        .await?
        .ok_or(Error::BalanceNotFound { id: balance_id })?
        .into();

    balance.amount = Set(valid.amount);
    balance.description = Set(valid.description);
    balance.other_person_name = Set(valid.other_person_name);
    balance.other_person_contact = Set(valid.other_person_contact);
    balance.due_date = Set(valid.due_date);
    balance.tags = Set(valid.tags);
    balance.notes = Set(valid.notes);
    balance.updated_at = Set(Utc::now());

    let updated = balance.update(db).await?;
    debug!(balance_id, "Balance edited");
    Ok(updated)
}

/// Marks a balance as settled and appends a `settlement` transaction for its full amount.
///
/// Both writes commit together. There is no way back: nothing un-settles a balance.
/// Settling an already settled balance changes nothing and returns it as stored.
///
/// # Errors
/// Returns [`Error::BalanceNotFound`] if the balance does not exist, or
/// [`Error::Store`] if the commit fails (in which case nothing is written).
#[instrument(skip(db))]
pub async fn settle_balance(db: &DatabaseConnection, balance_id: i64) -> Result<balance::Model> {
    let txn = db.begin().await?;

    let existing = Balance::find_by_id(balance_id)
        .one(&txn)
        .await?
        .ok_or(Error::BalanceNotFound { id: balance_id })?;

    if existing.is_settled {
        warn!(balance_id, "Balance already settled, nothing to do");
        return Ok(existing);
    }

    let amount = existing.amount;
    let mut balance: balance::ActiveModel = existing.into();
    balance.is_settled = Set(true);
    balance.updated_at = Set(Utc::now());
    let settled = balance.update(&txn).await?;

    transaction::insert_transaction(
        &txn,
        balance_id,
        TransactionKind::Settlement,
        amount,
        SETTLEMENT_DESCRIPTION,
    )
    .await?;

    txn.commit().await?;
    info!(balance_id, amount, "Balance settled");
    Ok(settled)
}

/// Deletes a balance together with its transactions.
///
/// # Errors
/// Returns [`Error::BalanceNotFound`] if the balance does not exist (including when it
/// was already deleted).
#[instrument(skip(db))]
pub async fn delete_balance(db: &DatabaseConnection, balance_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let balance = Balance::find_by_id(balance_id)
        .one(&txn)
        .await?
        .ok_or(Error::BalanceNotFound { id: balance_id })?;

    let removed = Transaction::delete_many()
        .filter(crate::entities::transaction::Column::BalanceId.eq(balance_id))
        .exec(&txn)
        .await?;
    balance.delete(&txn).await?;

    txn.commit().await?;
    info!(
        balance_id,
        transactions_removed = removed.rows_affected,
        "Balance deleted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::summary::derive_dashboard_totals;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_create_balance_validation() -> Result<()> {
        // No query results configured: any store access would fail the test
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for amount in ["0", "-5", "", "abc"] {
            let result = create_balance(&db, balance_input(amount, "Lunch", "Alex", true)).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::Validation(ValidationError::InvalidAmount { .. })
            ));
        }

        let result = create_balance(&db, balance_input("10", "  ", "Alex", true)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation(ValidationError::EmptyField {
                field: "Description"
            })
        ));

        let result = create_balance(&db, balance_input("10", "Lunch", "", true)).await;
        let err = result.unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyField { field: "Name" })
        ));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_amount_stores_nothing() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(create_balance(&db, balance_input("0", "Lunch", "Alex", true)).await.is_err());
        assert!(create_balance(&db, balance_input("-5", "Lunch", "Alex", true)).await.is_err());

        assert!(get_all_balances(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_balance_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let input = BalanceInput {
            other_person_contact: Some("   ".to_string()),
            tags: vec!["Food".to_string(), " Gift ".to_string(), " ".to_string()],
            notes: Some("pay back friday".to_string()),
            ..balance_input("25.50", " Coffee ", " Alex ", false)
        };
        let balance = create_balance(&db, input).await?;

        assert_eq!(balance.amount, 25.5);
        assert_eq!(balance.description, "Coffee");
        assert_eq!(balance.other_person_name, "Alex");
        assert!(!balance.is_owed_to_me);
        assert!(!balance.is_settled);
        assert_eq!(balance.other_person_contact, None);
        assert_eq!(balance.notes.as_deref(), Some("pay back friday"));
        assert_eq!(balance.created_at, balance.updated_at);
        let tags: Vec<&str> = balance.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["Food", "Gift"]);

        // Verify persistence, including the JSON tag column
        let stored = get_balance_by_id(&db, balance.id).await?.unwrap();
        assert_eq!(stored, balance);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_balance_integration() -> Result<()> {
        let (db, original) = setup_with_balance().await?;

        let due = sample_time();
        let input = BalanceInput {
            due_date: Some(due),
            tags: vec!["Rent".to_string()],
            ..balance_input("80", "Rent share", "Sarah", true)
        };
        let edited = edit_balance(&db, original.id, input).await?;

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.created_at, original.created_at);
        assert!(edited.updated_at >= original.updated_at);
        assert_eq!(edited.amount, 80.0);
        assert_eq!(edited.description, "Rent share");
        assert_eq!(edited.other_person_name, "Sarah");
        assert_eq!(edited.due_date, Some(due));

        let stored = get_balance_by_id(&db, original.id).await?.unwrap();
        assert_eq!(stored, edited);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_balance_keeps_direction() -> Result<()> {
        let (db, original) = setup_with_balance().await?;
        assert!(original.is_owed_to_me);

        let flipped = balance_input("30", "Lunch", "Alex", false);
        let edited = edit_balance(&db, original.id, flipped).await?;

        assert!(edited.is_owed_to_me);
        assert_eq!(edited.amount, 30.0);
        let stored = get_balance_by_id(&db, original.id).await?.unwrap();
        assert!(stored.is_owed_to_me);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_balance_validation_keeps_record() -> Result<()> {
        let (db, original) = setup_with_balance().await?;

        let result = edit_balance(&db, original.id, balance_input("-1", "x", "y", true)).await;
        assert!(result.unwrap_err().is_validation());

        let stored = get_balance_by_id(&db, original.id).await?.unwrap();
        assert_eq!(stored, original);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_balance_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = edit_balance(&db, 999, balance_input("10", "Lunch", "Alex", true)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BalanceNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_settle_balance_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let owed = create_test_balance(&db, "Sarah", 50.0, true).await?;
        create_test_balance(&db, "Alex", 25.0, false).await?;

        let settled = settle_balance(&db, owed.id).await?;
        assert!(settled.is_settled);
        assert!(settled.updated_at >= owed.updated_at);

        let transactions = transaction::get_transactions_for_balance(&db, owed.id).await?;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 50.0);
        assert_eq!(transactions[0].description, SETTLEMENT_DESCRIPTION);
        assert_eq!(transactions[0].kind(), Some(TransactionKind::Settlement));

        // The settled balance no longer counts toward either side
        let balances = get_all_balances(&db).await?;
        let totals = derive_dashboard_totals(&balances);
        assert_eq!(totals.total_owed_to_me, 0.0);
        assert_eq!(totals.total_owed_by_me, 25.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_settle_twice_writes_one_transaction() -> Result<()> {
        let (db, balance) = setup_with_balance().await?;

        let first = settle_balance(&db, balance.id).await?;
        let second = settle_balance(&db, balance.id).await?;
        assert_eq!(first, second);

        let transactions = transaction::get_transactions_for_balance(&db, balance.id).await?;
        assert_eq!(transactions.len(), 1);

        Ok(())
    }

    fn committed(log: &[sea_orm::Transaction]) -> bool {
        log.iter()
            .flat_map(sea_orm::Transaction::statements)
            .any(|stmt| stmt.sql == "COMMIT")
    }

    #[tokio::test]
    async fn test_settle_balance_update_failure() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![sample_balance(1, "Alex", 25.0, true)]])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();

        let err = settle_balance(&db, 1).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(!err.is_validation());
        assert!(!committed(&db.into_transaction_log()));

        Ok(())
    }

    #[tokio::test]
    async fn test_settle_balance_history_failure_rolls_back() -> Result<()> {
        let open = sample_balance(1, "Alex", 25.0, true);
        let settled = balance::Model {
            is_settled: true,
            ..open.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![open], vec![settled]])
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();

        let err = settle_balance(&db, 1).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(!err.is_validation());

        let log = db.into_transaction_log();
        assert!(!committed(&log));
        assert!(
            log.iter()
                .flat_map(sea_orm::Transaction::statements)
                .any(|stmt| stmt.sql == "ROLLBACK")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_settle_balance_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = settle_balance(&db, 42).await;
        assert!(matches!(result.unwrap_err(), Error::BalanceNotFound { id: 42 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_balance_removes_transactions() -> Result<()> {
        let (db, balance) = setup_with_balance().await?;
        let other = create_test_balance(&db, "Mike", 120.0, true).await?;
        settle_balance(&db, balance.id).await?;
        settle_balance(&db, other.id).await?;

        delete_balance(&db, balance.id).await?;

        assert!(get_balance_by_id(&db, balance.id).await?.is_none());
        assert!(
            transaction::get_transactions_for_balance(&db, balance.id)
                .await?
                .is_empty()
        );
        // Other balances keep their history
        assert_eq!(
            transaction::get_transactions_for_balance(&db, other.id)
                .await?
                .len(),
            1
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_balance_twice() -> Result<()> {
        let (db, balance) = setup_with_balance().await?;

        delete_balance(&db, balance.id).await?;
        let result = delete_balance(&db, balance.id).await;
        assert!(matches!(result.unwrap_err(), Error::BalanceNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_balances_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_balance(&db, "Alex", 10.0, true).await?;
        let second = create_test_balance(&db, "Sarah", 20.0, true).await?;

        let balances = get_all_balances(&db).await?;
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].id, second.id);
        assert_eq!(balances[1].id, first.id);

        // Editing moves a balance back to the front
        edit_balance(&db, first.id, balance_input("11", "Lunch", "Alex", true)).await?;
        let balances = get_all_balances(&db).await?;
        assert_eq!(balances[0].id, first.id);

        Ok(())
    }
}
