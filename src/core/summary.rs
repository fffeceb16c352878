//! Summary generation business logic.
//!
//! This module derives the dashboard totals, per-person summaries, overdue counts and
//! profile statistics from already-loaded records. Every function is pure: the caller
//! loads the balances once and passes `now` explicitly, so results are deterministic.

use crate::entities::{balance, group};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Net position with one other person.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonSummary {
    /// Other party's name, exactly as entered
    pub name: String,
    /// Unsettled amounts the person owes the user
    pub owed_to_me: f64,
    /// Unsettled amounts the user owes the person
    pub i_owe: f64,
    /// `owed_to_me - i_owe`
    pub net_balance: f64,
    /// Number of balances with this person, settled or not
    pub total_balances: usize,
    /// Number of unsettled balances with this person
    pub active_balances: usize,
    /// Latest `updated_at` across all of the person's balances
    pub last_activity: DateTime<Utc>,
}

/// Groups balances by `other_person_name` (exact, case-sensitive match).
///
/// Settled balances count toward `total_balances` and `last_activity` but not toward
/// any amount. The result is ordered by name; use [`people_view`] for display order.
#[must_use]
pub fn derive_person_summaries(balances: &[balance::Model]) -> Vec<PersonSummary> {
    let mut by_person: BTreeMap<&str, Vec<&balance::Model>> = BTreeMap::new();
    for b in balances {
        by_person.entry(b.other_person_name.as_str()).or_default().push(b);
    }

    by_person
        .into_iter()
        .filter_map(|(name, person_balances)| {
            let last_activity = person_balances.iter().map(|b| b.updated_at).max()?;
            let active: Vec<&&balance::Model> =
                person_balances.iter().filter(|b| b.is_active()).collect();
            let owed_to_me: f64 = active
                .iter()
                .filter(|b| b.is_owed_to_me)
                .map(|b| b.amount)
                .sum();
            let i_owe: f64 = active
                .iter()
                .filter(|b| !b.is_owed_to_me)
                .map(|b| b.amount)
                .sum();

            Some(PersonSummary {
                name: name.to_string(),
                owed_to_me,
                i_owe,
                net_balance: owed_to_me - i_owe,
                total_balances: person_balances.len(),
                active_balances: active.len(),
                last_activity,
            })
        })
        .collect()
}

/// Orders person summaries for display.
///
/// With a blank `search`, everyone is kept and sorted by absolute net balance, largest
/// first (ties broken by name). Otherwise only names containing `search`
/// (case-insensitive) are kept, sorted by name.
#[must_use]
pub fn people_view(mut people: Vec<PersonSummary>, search: &str) -> Vec<PersonSummary> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        people.sort_by(|a, b| {
            b.net_balance
                .abs()
                .total_cmp(&a.net_balance.abs())
                .then_with(|| a.name.cmp(&b.name))
        });
        return people;
    }

    people.retain(|p| p.name.to_lowercase().contains(&needle));
    people.sort_by(|a, b| a.name.cmp(&b.name));
    people
}

/// Unsettled balances split by direction, with their sums.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardTotals<'a> {
    /// Unsettled balances other people owe the user
    pub owed_to_me: Vec<&'a balance::Model>,
    /// Unsettled balances the user owes other people
    pub owed_by_me: Vec<&'a balance::Model>,
    /// Sum of `owed_to_me`
    pub total_owed_to_me: f64,
    /// Sum of `owed_by_me`
    pub total_owed_by_me: f64,
    /// `total_owed_to_me - total_owed_by_me`
    pub net: f64,
}

/// Partitions unsettled balances into owed-to-me and owed-by-me and sums both sides.
#[must_use]
pub fn derive_dashboard_totals(balances: &[balance::Model]) -> DashboardTotals<'_> {
    let (owed_to_me, owed_by_me): (Vec<&balance::Model>, Vec<&balance::Model>) = balances
        .iter()
        .filter(|b| b.is_active())
        .partition(|b| b.is_owed_to_me);

    let total_owed_to_me: f64 = owed_to_me.iter().map(|b| b.amount).sum();
    let total_owed_by_me: f64 = owed_by_me.iter().map(|b| b.amount).sum();

    DashboardTotals {
        owed_to_me,
        owed_by_me,
        total_owed_to_me,
        total_owed_by_me,
        net: total_owed_to_me - total_owed_by_me,
    }
}

/// True iff the balance is unsettled and its due date is strictly before `now`.
#[must_use]
pub fn is_overdue(balance: &balance::Model, now: DateTime<Utc>) -> bool {
    balance.is_active() && balance.due_date.is_some_and(|due| due < now)
}

/// Number of overdue balances.
#[must_use]
pub fn overdue_count(balances: &[balance::Model], now: DateTime<Utc>) -> usize {
    balances.iter().filter(|b| is_overdue(b, now)).count()
}

/// One person's balances, split for the person detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonBalances<'a> {
    /// Unsettled balances
    pub active: Vec<&'a balance::Model>,
    /// Settled balances
    pub settled: Vec<&'a balance::Model>,
}

/// Balances whose other party is exactly `name`, split into active and settled.
#[must_use]
pub fn balances_for_person<'a>(balances: &'a [balance::Model], name: &str) -> PersonBalances<'a> {
    let (active, settled) = balances
        .iter()
        .filter(|b| b.other_person_name == name)
        .partition(|b| b.is_active());
    PersonBalances { active, settled }
}

/// A previously used name with a contact, offered as a suggestion when adding a balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPerson {
    /// Other party's name
    pub name: String,
    /// First contact recorded for this name, if any
    pub contact: Option<String>,
}

/// Distinct people from `balances`, sorted by name.
///
/// A non-blank `query` keeps names containing it (case-insensitive). At most `limit`
/// people are returned.
#[must_use]
pub fn known_people(balances: &[balance::Model], query: &str, limit: usize) -> Vec<KnownPerson> {
    let mut people: BTreeMap<&str, Option<String>> = BTreeMap::new();
    for b in balances {
        let contact = people.entry(b.other_person_name.as_str()).or_default();
        if contact.is_none() {
            contact.clone_from(&b.other_person_contact);
        }
    }

    let needle = query.trim().to_lowercase();
    people
        .into_iter()
        .filter(|(name, _)| needle.is_empty() || name.to_lowercase().contains(&needle))
        .take(limit)
        .map(|(name, contact)| KnownPerson {
            name: name.to_string(),
            contact,
        })
        .collect()
}

/// Groups that are still active.
#[must_use]
pub fn active_groups(groups: &[group::Model]) -> Vec<&group::Model> {
    groups.iter().filter(|g| g.is_active).collect()
}

/// Figures shown on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    /// Unsettled amount the user owes
    pub total_owed_by_me: f64,
    /// Unsettled amount owed to the user
    pub total_owed_to_me: f64,
    /// `total_owed_to_me - total_owed_by_me`
    pub net: f64,
    /// Number of active groups
    pub active_groups: usize,
    /// Number of settled balances
    pub settled_balances: usize,
    /// Number of overdue balances
    pub overdue_balances: usize,
}

/// Computes the profile statistics.
#[must_use]
pub fn profile_stats(
    balances: &[balance::Model],
    groups: &[group::Model],
    now: DateTime<Utc>,
) -> ProfileStats {
    let totals = derive_dashboard_totals(balances);
    ProfileStats {
        total_owed_by_me: totals.total_owed_by_me,
        total_owed_to_me: totals.total_owed_to_me,
        net: totals.net,
        active_groups: active_groups(groups).len(),
        settled_balances: balances.iter().filter(|b| b.is_settled).count(),
        overdue_balances: overdue_count(balances, now),
    }
}

/// Formats an amount as dollars, e.g. `"$12.50"`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount.abs())
}

/// Formats a net balance with its sign, e.g. `"+$50.00"` or `"-$25.00"`.
#[must_use]
pub fn format_net(net: f64) -> String {
    if net >= 0.0 {
        format!("+${net:.2}")
    } else {
        format!("-${:.2}", net.abs())
    }
}
