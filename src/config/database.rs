//! Database configuration module for `PayBob`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Creation is idempotent and safe to run
//! on every startup.

use crate::entities::{Balance, Group, GroupExpense, GroupMember, Transaction, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/paybob.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database at `database_url`.
///
/// For file-backed URLs the parent directory is created first so a fresh checkout
/// can start without manual setup.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        std::fs::create_dir_all(dir)?;
    }
    debug!("Connecting to {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables (parents first) if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, User).await?;
    create_table(db, &schema, Balance).await?;
    create_table(db, &schema, Transaction).await?;
    create_table(db, &schema, Group).await?;
    create_table(db, &schema, GroupMember).await?;
    create_table(db, &schema, GroupExpense).await?;

    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Directory portion of a `sqlite://path/to/file.sqlite` URL, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&str> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    path.rsplit_once('/')
        .map(|(dir, _)| dir)
        .filter(|dir| !dir.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        balance::Model as BalanceModel, group::Model as GroupModel,
        group_expense::Model as GroupExpenseModel, group_member::Model as GroupMemberModel,
        transaction::Model as TransactionModel, user::Model as UserModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<BalanceModel> = Balance::find().limit(1).all(&db).await?;
        let _: Vec<TransactionModel> = Transaction::find().limit(1).all(&db).await?;
        let _: Vec<GroupModel> = Group::find().limit(1).all(&db).await?;
        let _: Vec<GroupMemberModel> = GroupMember::find().limit(1).all(&db).await?;
        let _: Vec<GroupExpenseModel> = GroupExpense::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/paybob.sqlite?mode=rwc"),
            Some("data")
        );
        assert_eq!(sqlite_parent_dir("sqlite://paybob.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/db"), None);
    }
}
