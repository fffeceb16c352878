//! Group entity - A set of people sharing expenses (a trip, a flat).
//!
//! `total_expenses` caches the sum of the group's expenses and is maintained by
//! `core::group`; it can always be recomputed from `group_expenses`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Group database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    /// Unique identifier for the group
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Group name (e.g., "NYC Trip 2025")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// When the group was created
    pub created_at: DateTimeUtc,
    /// Inactive groups are hidden from the groups list
    pub is_active: bool,
    /// Cached sum of all expense amounts in dollars
    pub total_expenses: f64,
}

/// Defines relationships between Group and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One group has many members
    #[sea_orm(has_many = "super::group_member::Entity")]
    Members,
    /// One group has many expenses
    #[sea_orm(has_many = "super::group_expense::Entity")]
    Expenses,
}

impl Related<super::group_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::group_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
