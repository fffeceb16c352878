//! Group business logic - Shared-expense groups, their members and expenses.
//!
//! A group's `total_expenses` is a cache of the sum of its expenses. It is bumped
//! atomically whenever an expense is added and can be rebuilt from the expense rows
//! with [`recalculate_group_total`].

use crate::{
    core::validate,
    entities::{
        Group, GroupExpense, GroupMember, User, group, group_expense, group_expense::SplitType,
        group_member, group_member::MemberRole,
    },
    errors::{Error, Result, ValidationError},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Form values for a new group.
#[derive(Debug, Clone, Default)]
pub struct GroupInput {
    /// Group name, required
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Form values for a new group expense.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    /// Amount as entered, must parse to a positive number
    pub amount: String,
    /// What was paid for
    pub description: String,
    /// Name of whoever paid
    pub paid_by: String,
    /// How the expense is split
    pub split_type: SplitType,
    /// Optional split breakdown
    pub split_details: Option<String>,
    /// Optional category
    pub category: Option<String>,
    /// Optional receipt image bytes
    pub receipt_image: Option<Vec<u8>>,
}

/// Group input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidGroup {
    name: String,
    description: Option<String>,
}

impl GroupInput {
    /// Trims the name and drops a blank description.
    pub(crate) fn validate(&self) -> std::result::Result<ValidGroup, ValidationError> {
        Ok(ValidGroup {
            name: validate::require_text(&self.name, "Group name")?,
            description: validate::optional_text(self.description.as_deref()),
        })
    }
}

/// Creates an active group with no expenses.
///
/// # Errors
/// Returns a validation error if the name is blank.
#[instrument(skip(db, input))]
pub async fn create_group(db: &DatabaseConnection, input: GroupInput) -> Result<group::Model> {
    let valid = input.validate()?;
    insert_group(db, valid).await
}

/// Inserts an already validated group. Works inside a database transaction.
pub(crate) async fn insert_group<C>(db: &C, valid: ValidGroup) -> Result<group::Model>
where
    C: ConnectionTrait,
{
    let model = group::ActiveModel {
        name: Set(valid.name),
        description: Set(valid.description),
        created_at: Set(Utc::now()),
        is_active: Set(true),
        total_expenses: Set(0.0),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(group_id = created.id, name = %created.name, "Group created");
    Ok(created)
}

/// Retrieves all active groups, ordered by name.
pub async fn get_active_groups(db: &DatabaseConnection) -> Result<Vec<group::Model>> {
    Group::find()
        .filter(group::Column::IsActive.eq(true))
        .order_by_asc(group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every group, active or not, ordered by name.
pub async fn get_all_groups(db: &DatabaseConnection) -> Result<Vec<group::Model>> {
    Group::find()
        .order_by_asc(group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a group by ID.
pub async fn get_group_by_id(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Option<group::Model>> {
    Group::find_by_id(group_id).one(db).await.map_err(Into::into)
}

/// Hides a group from the active list without deleting anything.
pub async fn archive_group(db: &DatabaseConnection, group_id: i64) -> Result<group::Model> {
    let mut group: group::ActiveModel = find_group(db, group_id).await?.into();
    group.is_active = Set(false);
    group.update(db).await.map_err(Into::into)
}

/// Adds a user to a group.
///
/// # Errors
/// Returns an error if the group or user does not exist, or if the user is already
/// a member of the group.
#[instrument(skip(db))]
pub async fn add_group_member(
    db: &DatabaseConnection,
    group_id: i64,
    user_id: i64,
    role: MemberRole,
) -> Result<group_member::Model> {
    find_group(db, group_id).await?;
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let existing = GroupMember::find()
        .filter(group_member::Column::GroupId.eq(group_id))
        .filter(group_member::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::AlreadyMember { group_id, user_id });
    }

    let model = group_member::ActiveModel {
        group_id: Set(group_id),
        user_id: Set(user_id),
        role: Set(role.as_str().to_string()),
        joined_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Members of a group in the order they joined.
pub async fn get_group_members(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Vec<group_member::Model>> {
    GroupMember::find()
        .filter(group_member::Column::GroupId.eq(group_id))
        .order_by_asc(group_member::Column::JoinedAt)
        .order_by_asc(group_member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records an expense and adds its amount to the group's running total.
///
/// Validation runs before anything is read or written. The insert and the total
/// update commit together.
///
/// # Errors
/// Returns a validation error for a non-positive amount or blank description/payer,
/// or [`Error::GroupNotFound`].
#[instrument(skip(db, input))]
pub async fn add_group_expense(
    db: &DatabaseConnection,
    group_id: i64,
    input: ExpenseInput,
) -> Result<group_expense::Model> {
    let amount = validate::parse_amount(&input.amount)?;
    let description = validate::require_text(&input.description, "Description")?;
    let paid_by = validate::require_text(&input.paid_by, "Paid by")?;

    let txn = db.begin().await?;
    Group::find_by_id(group_id)
        .one(&txn)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })?;

    let model = group_expense::ActiveModel {
        group_id: Set(group_id),
        amount: Set(amount),
        description: Set(description),
        paid_by: Set(paid_by),
        split_type: Set(input.split_type.as_str().to_string()),
        split_details: Set(input.split_details),
        category: Set(validate::optional_text(input.category.as_deref())),
        created_at: Set(Utc::now()),
        receipt_image: Set(input.receipt_image),
        ..Default::default()
    };
    let expense = model.insert(&txn).await?;

    Group::update_many()
        .col_expr(
            group::Column::TotalExpenses,
            Expr::col(group::Column::TotalExpenses).add(amount),
        )
        .filter(group::Column::Id.eq(group_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(group_id, expense_id = expense.id, amount, "Group expense added");
    Ok(expense)
}

/// Expenses of a group, newest first.
pub async fn get_group_expenses(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Vec<group_expense::Model>> {
    GroupExpense::find()
        .filter(group_expense::Column::GroupId.eq(group_id))
        .order_by_desc(group_expense::Column::CreatedAt)
        .order_by_desc(group_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Rebuilds `total_expenses` from the expense rows and stores it.
pub async fn recalculate_group_total(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<group::Model> {
    let group = find_group(db, group_id).await?;
    let total: f64 = get_group_expenses(db, group_id)
        .await?
        .iter()
        .map(|e| e.amount)
        .sum();

    let mut group: group::ActiveModel = group.into();
    group.total_expenses = Set(total);
    group.update(db).await.map_err(Into::into)
}

/// Deletes a group with its members and expenses.
#[instrument(skip(db))]
pub async fn delete_group(db: &DatabaseConnection, group_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let group = Group::find_by_id(group_id)
        .one(&txn)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })?;

    GroupMember::delete_many()
        .filter(group_member::Column::GroupId.eq(group_id))
        .exec(&txn)
        .await?;
    GroupExpense::delete_many()
        .filter(group_expense::Column::GroupId.eq(group_id))
        .exec(&txn)
        .await?;
    group.delete(&txn).await?;

    txn.commit().await?;
    info!(group_id, "Group deleted");
    Ok(())
}

async fn find_group(db: &DatabaseConnection, group_id: i64) -> Result<group::Model> {
    Group::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or(Error::GroupNotFound { id: group_id })
}
