//! Transaction entity - History records attached to a balance.
//!
//! Each transaction has a `balance_id`, amount, description, `transaction_type` and
//! `created_at`. A `settlement` transaction is written automatically when a balance is settled.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the balance this transaction belongs to
    pub balance_id: i64,
    /// Transaction amount in dollars
    pub amount: f64,
    /// Human-readable description of the transaction
    pub description: String,
    /// Type of transaction, see [`TransactionKind`]
    pub transaction_type: String,
    /// When the transaction was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Parses the stored type tag. Unknown tags yield `None`.
    #[must_use]
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::try_from(self.transaction_type.as_str()).ok()
    }
}

/// Kinds of balance transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Partial or full payment toward the balance
    Payment,
    /// Manual correction of the amount
    Adjustment,
    /// Interest accrued on the balance
    Interest,
    /// Written when the balance is settled
    Settlement,
}

impl TransactionKind {
    /// Stored representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
            Self::Interest => "interest",
            Self::Settlement => "settlement",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "payment" => Ok(Self::Payment),
            "adjustment" => Ok(Self::Adjustment),
            "interest" => Ok(Self::Interest),
            "settlement" => Ok(Self::Settlement),
            other => Err(format!("invalid transaction type: {other}")),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one balance
    #[sea_orm(
        belongs_to = "super::balance::Entity",
        from = "Column::BalanceId",
        to = "super::balance::Column::Id",
        on_delete = "Cascade"
    )]
    Balance,
}

impl Related<super::balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Balance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
