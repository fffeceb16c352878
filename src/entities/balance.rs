//! Balance entity - A single tracked debt between the user and one other person.
//!
//! The direction is stored as `is_owed_to_me`: `true` means the other person owes
//! the user, `false` means the user owes the other person. Settled balances are kept
//! for history and excluded from every running total.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Balance database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "balances")]
pub struct Model {
    /// Unique identifier for the balance
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, if the balance was recorded under a profile
    pub user_id: Option<i64>,
    /// Amount in dollars, always positive
    pub amount: f64,
    /// What the debt is for (e.g., "Dinner split")
    pub description: String,
    /// `true` when the other person owes the user
    pub is_owed_to_me: bool,
    /// Name of the other party, matched exactly when grouping by person
    pub other_person_name: String,
    /// Optional phone number or email of the other party
    pub other_person_contact: Option<String>,
    /// Optional date by which the balance should be settled
    pub due_date: Option<DateTimeUtc>,
    /// Free-text categories attached to the balance
    #[sea_orm(column_type = "Json")]
    pub tags: Tags,
    /// When the balance was recorded
    pub created_at: DateTimeUtc,
    /// Refreshed on every mutation
    pub updated_at: DateTimeUtc,
    /// Whether the balance has been settled
    pub is_settled: bool,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Set of tags stored as a JSON array. Ordering is lexicographic and carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Tags(pub BTreeSet<String>);

impl Tags {
    /// Returns true if any tag of this set is contained in `selected`.
    #[must_use]
    pub fn intersects(&self, selected: &BTreeSet<String>) -> bool {
        self.0.iter().any(|tag| selected.contains(tag))
    }

    /// Iterates the tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// True when no tags are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Model {
    /// True while the balance still counts toward the running totals.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_settled
    }
}

/// Defines relationships between Balance and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each balance may belong to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// One balance has many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
