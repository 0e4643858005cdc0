//! Display form of book titles.

use std::collections::BTreeSet;

/// Lowercase the title, then uppercase its first character.
///
/// "ALICE'S Adventures" becomes "Alice's adventures".
pub fn display_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display forms of a set of titles. Titles differing only in case merge.
pub fn display_titles<I>(titles: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    titles
        .into_iter()
        .map(|title| display_title(title.as_ref()))
        .collect()
}
