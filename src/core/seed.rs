//! First-run sample data.
//!
//! Balances and groups from `config.toml` are inserted only into empty tables, so
//! restarting never duplicates them and user data is never touched.

use crate::{
    config::app::SeedConfig,
    core::{
        balance::{self, BalanceInput},
        group::{self, GroupInput},
    },
    entities::{Balance, Group},
    errors::{Result, ValidationError},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::{debug, info, instrument};

/// What [`seed_sample_data`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of balances inserted
    pub balances_inserted: usize,
    /// Number of groups inserted
    pub groups_inserted: usize,
}

/// Inserts the configured sample balances and groups into empty tables.
///
/// Each table is checked on its own: an empty `groups` table is seeded even if
/// balances already exist. Every entry is validated before anything is written, and
/// all inserts commit together, so a bad entry leaves both tables empty and the next
/// start seeds again.
///
/// # Errors
/// Returns an error if a seed entry fails validation or a write fails.
#[instrument(skip_all)]
pub async fn seed_sample_data(db: &DatabaseConnection, seed: &SeedConfig) -> Result<SeedReport> {
    let txn = db.begin().await?;

    let balances = if Balance::find().count(&txn).await? == 0 {
        seed.balances
            .iter()
            .map(|entry| {
                BalanceInput {
                    amount: entry.amount.to_string(),
                    description: entry.description.clone(),
                    is_owed_to_me: entry.is_owed_to_me,
                    other_person_name: entry.other_person_name.clone(),
                    tags: entry.tags.clone(),
                    ..Default::default()
                }
                .validate()
            })
            .collect::<std::result::Result<Vec<_>, ValidationError>>()?
    } else {
        debug!("Balances already present, skipping balance seed");
        Vec::new()
    };

    let groups = if Group::find().count(&txn).await? == 0 {
        seed.groups
            .iter()
            .map(|entry| {
                GroupInput {
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                }
                .validate()
            })
            .collect::<std::result::Result<Vec<_>, ValidationError>>()?
    } else {
        debug!("Groups already present, skipping group seed");
        Vec::new()
    };

    let report = SeedReport {
        balances_inserted: balances.len(),
        groups_inserted: groups.len(),
    };
    for valid in balances {
        balance::insert_balance(&txn, None, valid).await?;
    }
    for valid in groups {
        group::insert_group(&txn, valid).await?;
    }
    txn.commit().await?;

    info!(
        balances = report.balances_inserted,
        groups = report.groups_inserted,
        "Sample data seeded"
    );
    Ok(report)
}
