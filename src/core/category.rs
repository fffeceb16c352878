//! Categories and tag filtering.
//!
//! Categories are the union of a built-in list and every tag in use. Filtering with an
//! empty selection returns everything: an empty filter means "no filter", not "match nothing".

use crate::entities::balance;
use std::collections::BTreeSet;

/// Categories offered before the user has tagged anything.
pub const BUILT_IN_CATEGORIES: [&str; 10] = [
    "Food",
    "Drinks",
    "Transportation",
    "Entertainment",
    "Travel",
    "Shopping",
    "Birthday",
    "Wedding",
    "Utilities",
    "Rent",
];

/// Union of `built_in` and all tags on `balances`, sorted and deduplicated.
#[must_use]
pub fn derive_categories<S: AsRef<str>>(
    balances: &[balance::Model],
    built_in: &[S],
) -> Vec<String> {
    let mut categories: BTreeSet<String> =
        built_in.iter().map(|c| c.as_ref().to_string()).collect();
    categories.extend(balances.iter().flat_map(|b| b.tags.iter().cloned()));
    categories.into_iter().collect()
}

/// Balances carrying at least one of the `selected` tags.
///
/// An empty selection passes every balance through unchanged.
#[must_use]
pub fn filter_by_categories<'a>(
    balances: &'a [balance::Model],
    selected: &BTreeSet<String>,
) -> Vec<&'a balance::Model> {
    if selected.is_empty() {
        return balances.iter().collect();
    }
    balances
        .iter()
        .filter(|b| b.tags.intersects(selected))
        .collect()
}

/// Cleans up a custom category typed by the user.
#[must_use]
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Adds `category` to the selection, or removes it if already selected.
/// Returns whether the category is selected afterwards.
pub fn toggle_category(selected: &mut BTreeSet<String>, category: &str) -> bool {
    if selected.remove(category) {
        false
    } else {
        selected.insert(category.to_string());
        true
    }
}
