//! Entity module - Contains all SeaORM entity definitions for the database.
//! Tables are flat and reference each other through foreign-key columns.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod balance;
pub mod group;
pub mod group_expense;
pub mod group_member;
pub mod transaction;
pub mod user;

// Re-export specific types to avoid conflicts
pub use balance::{Column as BalanceColumn, Entity as Balance, Model as BalanceModel};
pub use group::{Column as GroupColumn, Entity as Group, Model as GroupModel};
pub use group_expense::{
    Column as GroupExpenseColumn, Entity as GroupExpense, Model as GroupExpenseModel,
};
pub use group_member::{
    Column as GroupMemberColumn, Entity as GroupMember, Model as GroupMemberModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
