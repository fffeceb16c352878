//! Transaction business logic - History attached to balances.
//!
//! Transactions never change a balance's amount; they record what happened to it.
//! Settlement transactions are written by `core::balance::settle_balance`; the other
//! kinds can be recorded with [`record_transaction`].

use crate::{
    entities::{Balance, Transaction, transaction, transaction::TransactionKind},
    errors::{Error, Result, ValidationError},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Retrieves all transactions for a balance, newest first.
pub async fn get_transactions_for_balance(
    db: &DatabaseConnection,
    balance_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::BalanceId.eq(balance_id))
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific transaction by its unique ID.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a payment, adjustment, interest or settlement entry for an existing balance.
///
/// # Errors
/// Returns an error if:
/// - The amount is zero or not finite
/// - The description is empty
/// - The balance does not exist
pub async fn record_transaction(
    db: &DatabaseConnection,
    balance_id: i64,
    kind: TransactionKind,
    amount: f64,
    description: &str,
) -> Result<transaction::Model> {
    if amount == 0.0 || !amount.is_finite() {
        return Err(ValidationError::InvalidAmount {
            input: amount.to_string(),
        }
        .into());
    }
    let description = crate::core::validate::require_text(description, "Description")?;

    Balance::find_by_id(balance_id)
        .one(db)
        .await?
        .ok_or(Error::BalanceNotFound { id: balance_id })?;

    insert_transaction(db, balance_id, kind, amount, &description).await
}

/// Inserts a transaction row without further checks. Works inside a database transaction.
pub(crate) async fn insert_transaction<C>(
    db: &C,
    balance_id: i64,
    kind: TransactionKind,
    amount: f64,
    description: &str,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let model = transaction::ActiveModel {
        balance_id: Set(balance_id),
        amount: Set(amount),
        description: Set(description.to_string()),
        transaction_type: Set(kind.as_str().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    debug!(balance_id, kind = %kind, "Transaction recorded");
    Ok(inserted)
}
