//! Group expense entity - One shared expense paid by somebody in a group.
//!
//! `paid_by` is free text (a name), not a foreign key, so people outside the
//! app can pay for things. `split_details` is an opaque blob whose meaning
//! depends on `split_type`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the group this expense belongs to
    pub group_id: i64,
    /// Amount in dollars
    pub amount: f64,
    /// What was paid for
    pub description: String,
    /// Name of whoever paid
    pub paid_by: String,
    /// How the expense is split, see [`SplitType`]
    pub split_type: String,
    /// Optional split breakdown, interpreted according to `split_type`
    pub split_details: Option<String>,
    /// Optional category (e.g., "Food")
    pub category: Option<String>,
    /// When the expense was recorded
    pub created_at: DateTimeUtc,
    /// Optional receipt image bytes
    pub receipt_image: Option<Vec<u8>>,
}

/// How a group expense is divided between members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    /// Everyone pays the same share
    #[default]
    Equal,
    /// Explicit amounts per member
    Exact,
    /// Percentages per member
    Percentage,
}

impl SplitType {
    /// Stored representation of the split type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Exact => "exact",
            Self::Percentage => "percentage",
        }
    }
}

impl TryFrom<&str> for SplitType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "equal" => Ok(Self::Equal),
            "exact" => Ok(Self::Exact),
            "percentage" => Ok(Self::Percentage),
            other => Err(format!("invalid split type: {other}")),
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines relationships between `GroupExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "Cascade"
    )]
    Group,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
